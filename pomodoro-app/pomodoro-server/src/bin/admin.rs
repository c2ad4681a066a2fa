//! Out-of-band store maintenance.

use clap::{Parser, Subcommand};

use pomodoro_core::DocumentStore;
use pomodoro_infrastructure::{build_store, schema};
use pomodoro_shared::config::AppConfig;

#[derive(Parser)]
#[command(name = "pomodoro-admin")]
#[command(about = "Maintenance actions for the pomodoro document store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the unique indexes
    Init,
    /// Delete every document of a collection and drop it
    Reset { collection: String },
    /// Print every document of a collection
    Dump { collection: String },
    /// List the indexes of a collection
    Indexes { collection: String },
    /// List collections
    Collections,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;
    let _log_guard = pomodoro_shared::telemetry::init_telemetry(&config.log)?;

    let cli = Cli::parse();
    let store = build_store(&config.store);

    match cli.command {
        Commands::Init => {
            schema::initialize(store.as_ref()).await?;
            println!("Indexes ensured.");
        }
        Commands::Reset { collection } => {
            let removed = schema::reset_collection(store.as_ref(), &collection).await?;
            println!("Removed {} documents, dropped {}.", removed, collection);
        }
        Commands::Dump { collection } => {
            println!("{}", schema::dump_collection(store.as_ref(), &collection).await?);
        }
        Commands::Indexes { collection } => {
            for index in store.index_information(&collection).await? {
                println!(
                    "{}\t{}\t{}",
                    index.name,
                    index.field,
                    if index.unique { "unique" } else { "" }
                );
            }
        }
        Commands::Collections => {
            for name in store.collection_names().await? {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
