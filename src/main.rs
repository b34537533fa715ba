use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use topo_order_commits::areas::database::MissingObjectPolicy;
use topo_order_commits::areas::repository::Repository;
use topo_order_commits::commands::porcelain::topo_order::TopoOrderOptions;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "TOPO_LOG";

#[derive(Parser)]
#[command(
    name = "topo-order-commits",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Print commit history in topological order",
    long_about = "Reads every local branch of the enclosing git repository, \
    orders all reachable commits so that each commit comes before its ancestors, \
    and prints them with branch labels. Where two consecutive commits are not \
    parent and child, boundary lines list the edges that were skipped.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "Directory to start looking for the repository from")]
    path: Option<PathBuf>,
    #[arg(
        long,
        help = "Fail when a commit is missing from the loose object store instead of treating it as a root"
    )]
    strict: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let start = match cli.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let repository = Repository::discover(
        &start,
        Box::new(std::io::BufWriter::new(std::io::stdout())),
    )?;

    let opts = TopoOrderOptions {
        missing_objects: if cli.strict {
            MissingObjectPolicy::Fail
        } else {
            MissingObjectPolicy::TreatAsRoot
        },
    };
    repository.topo_order(&opts)?;

    Ok(())
}
