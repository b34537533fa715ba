use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use topo_order_commits::areas::repository::Repository;
use topo_order_commits::artifacts::branch::branch_name::BranchName;
use topo_order_commits::artifacts::objects::commit::{Author, Commit};
use topo_order_commits::artifacts::objects::object_id::ObjectId;

const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Builds commit histories in a fresh repository, addressing commits by name
pub struct History {
    repository: Repository,
    commits: HashMap<String, ObjectId>,
}

impl History {
    pub fn init(dir: &Path) -> Self {
        let repository =
            Repository::init(dir, Box::new(std::io::sink())).expect("Failed to init repository");
        Self {
            repository,
            commits: HashMap::new(),
        }
    }

    /// Store a commit named `name` whose parents are earlier named commits
    pub fn commit(&mut self, name: &str, parents: &[&str]) -> ObjectId {
        let parents = parents.iter().map(|parent| self.oid(parent)).collect();
        self.commit_with_parent_ids(name, parents)
    }

    pub fn commit_with_parent_ids(&mut self, name: &str, parents: Vec<ObjectId>) -> ObjectId {
        let commit = Commit::new(
            parents,
            ObjectId::try_parse(EMPTY_TREE.to_string()).unwrap(),
            author(),
            format!("{name}\n"),
        );
        let oid = self
            .repository
            .database()
            .store(&commit)
            .expect("Failed to store commit");
        self.commits.insert(name.to_string(), oid.clone());
        oid
    }

    /// Write a commit record under a chosen id, bypassing content addressing
    pub fn forge_commit(&mut self, name: &str, oid: &str, parents: &[&str]) {
        let mut body = format!("tree {EMPTY_TREE}\n");
        for parent in parents {
            body.push_str(&format!("parent {parent}\n"));
        }
        body.push_str(&format!("author {}\ncommitter {}\n\n{name}\n", author().display(), author().display()));

        let oid = ObjectId::try_parse(oid.to_string()).unwrap();
        self.write_loose(&oid, "commit", &body);
        self.commits.insert(name.to_string(), oid);
    }

    /// Write a blob under a chosen id
    pub fn blob(&self, oid: &str, content: &str) -> ObjectId {
        let oid = ObjectId::try_parse(oid.to_string()).unwrap();
        self.write_loose(&oid, "blob", content);
        oid
    }

    fn write_loose(&self, oid: &ObjectId, object_type: &str, body: &str) {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(format!("{object_type} {}\0{body}", body.len()).as_bytes())
            .unwrap();
        let compressed = encoder.finish().unwrap();

        let path = self.repository.database().objects_path().join(oid.to_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, compressed).unwrap();
    }

    pub fn branch(&self, branch: &str, commit: &str) {
        self.branch_to(branch, &self.oid(commit));
    }

    pub fn branch_to(&self, branch: &str, oid: &ObjectId) {
        let name = BranchName::try_parse(branch.to_string()).expect("Invalid branch name");
        self.repository
            .refs()
            .create_branch(&name, oid)
            .expect("Failed to create branch");
    }

    pub fn oid(&self, name: &str) -> ObjectId {
        self.commits
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("unknown commit {name}"))
    }
}

fn author() -> Author {
    Author::try_from("Test Author <test@example.com> 1700000000 +0000").unwrap()
}
