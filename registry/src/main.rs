use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use cemetery_registry::{Config, RegistryManager, RegistryStore, outbox};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cemetery-registry", version, about = "Cemetery registry outbox exchange")]
struct Cli {
    /// Registry state snapshot
    #[arg(long, default_value = "registry.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write all records as an outbox batch
    Export,
    /// Upsert an outbox file into the registry
    Import {
        /// Outbox file to read
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let today = shared::util::today();

    let store = load_store(&cli.state)?;
    let mut manager = RegistryManager::with_store(store, config.policy);

    match cli.command {
        Command::Export => {
            let batch = outbox::collect_all(manager.store());
            match outbox::write_batch(&config, &batch, today)? {
                Some(path) => println!("exported {} burials to {}", batch.burials.len(), path.display()),
                None => println!("nothing to export"),
            }
        }
        Command::Import { file } => {
            let batch = outbox::read_batch(&file)
                .with_context(|| format!("reading outbox file {}", file.display()))?;
            let summary = outbox::import(&mut manager, &batch, today)?;
            println!(
                "imported {} cemeteries, {} burials ({} skipped)",
                summary.cemeteries, summary.burials, summary.skipped
            );
            save_store(&cli.state, manager.store())?;
        }
    }
    Ok(())
}

fn load_store(path: &PathBuf) -> anyhow::Result<RegistryStore> {
    if !path.exists() {
        return Ok(RegistryStore::new());
    }
    let data = fs::read(path).with_context(|| format!("reading state file {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing state file {}", path.display()))
}

fn save_store(path: &PathBuf, store: &RegistryStore) -> anyhow::Result<()> {
    let data = serde_json::to_vec_pretty(store)?;
    fs::write(path, data).with_context(|| format!("writing state file {}", path.display()))?;
    Ok(())
}
