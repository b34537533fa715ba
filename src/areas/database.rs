//! Loose object store
//!
//! Every object lives in its own zlib-compressed file under
//! `.git/objects/<2 hex chars>/<38 hex chars>`. Pack files are not read, so an
//! object that has been packed away looks exactly like a missing one.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TopoError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// What to do when a referenced commit has no loose object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingObjectPolicy {
    /// Read the commit as if it had no parents. Indistinguishable from a
    /// genuine root commit in the resulting graph.
    #[default]
    TreatAsRoot,
    /// Fail with [`TopoError::MissingObject`].
    Fail,
}

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Parent hashes of a commit, in the order its record declares them
    pub fn read_parents(
        &self,
        object_id: &ObjectId,
        policy: MissingObjectPolicy,
    ) -> anyhow::Result<Vec<ObjectId>> {
        if !self.contains(object_id) {
            return match policy {
                MissingObjectPolicy::TreatAsRoot => {
                    warn!(oid = %object_id, "commit not in loose object store, treating it as a root");
                    Ok(Vec::new())
                }
                MissingObjectPolicy::Fail => Err(TopoError::MissingObject {
                    oid: object_id.clone(),
                }
                .into()),
            };
        }

        let corrupt = |err: anyhow::Error| TopoError::CorruptObject {
            oid: object_id.clone(),
            reason: format!("{err:#}"),
        };
        let parents = Commit::parse_parents(self.read_commit_body(object_id)?).map_err(corrupt)?;
        trace!(oid = %object_id, parents = parents.len(), "read commit");

        Ok(parents)
    }

    /// Decompressed body of a commit object, positioned after its header
    fn read_commit_body(&self, object_id: &ObjectId) -> anyhow::Result<Cursor<Bytes>> {
        let object_path = self.path.join(object_id.to_path());
        let corrupt = |err: anyhow::Error| TopoError::CorruptObject {
            oid: object_id.clone(),
            reason: format!("{err:#}"),
        };

        let object_content = self.read_object(object_path).map_err(corrupt)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, _) =
            ObjectType::parse_object_header(&mut object_reader).map_err(corrupt)?;
        if object_type != ObjectType::Commit {
            return Err(TopoError::NotACommit {
                oid: object_id.clone(),
                object_type,
            }
            .into());
        }

        Ok(object_reader)
    }

    /// Write an object unless it already exists, returning its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
