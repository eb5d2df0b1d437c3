use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lancer_reserves::config::AppConfig;
use lancer_reserves::core::logging;
use lancer_reserves::core::reserves::{
    ListQuery, LoadOutcome, ReserveClient, ReserveInput, ReserveStore, ReserveType,
};

/// Command-line client for the Lancer reserves catalog.
///
/// The API root comes from the config file or `RESERVES_API_BASE_URL`
/// (default http://localhost:8000); `RESERVES_CONFIG` overrides the config
/// file location.
#[derive(Parser, Debug)]
#[command(name = "reserves", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List reserves, optionally of one type (bonus, resource, mech, tactical)
    List {
        #[arg(value_name = "TYPE")]
        reserve_type: Option<ReserveType>,
    },
    /// Show one reserve
    Get { id: String },
    /// Random sample from the server
    Random {
        count: u32,
        #[arg(value_name = "TYPE")]
        reserve_type: Option<ReserveType>,
    },
    /// Reserves whose label matches
    Search { label: String },
    /// Bulk import a JSON array of reserves
    Import { file: PathBuf },
    /// Catalog counts
    Stats,
    /// Check the API server
    Health,
}

type BoxError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Usage errors exit here, before any log writer exists.
    let cli = Cli::parse();

    let config = AppConfig::load();
    let log_guard = logging::init(&config);

    tracing::debug!("lancer-reserves v{} running {:?}", lancer_reserves::VERSION, cli.command);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("Error: {e}");
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<(), BoxError> {
    let client = ReserveClient::from_config(&config.api)?;
    let page = ListQuery::default().page(0, config.api.page_size);

    match command {
        Command::List { reserve_type } => {
            let query = ListQuery { reserve_type, ..page };
            print_json(&client.list(query).await?)
        }
        Command::Get { id } => match client.get_by_id(&id).await? {
            Some(reserve) => print_json(&reserve),
            None => Err(format!("no reserve with id '{id}'").into()),
        },
        Command::Random { count, reserve_type } => {
            print_json(&client.random_sample(count, reserve_type).await?)
        }
        Command::Search { label } => print_json(&client.search_by_label(&label).await?),
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let inputs: Vec<ReserveInput> = serde_json::from_str(&raw)?;
            let inputs: Vec<ReserveInput> = inputs
                .into_iter()
                .map(|input| match input.id {
                    Some(_) => input,
                    None => input.with_generated_id(),
                })
                .collect();

            let created = client.import(&inputs).await?;
            eprintln!(
                "Imported {} of {} reserves ({} already present)",
                created.len(),
                inputs.len(),
                inputs.len().saturating_sub(created.len())
            );
            print_json(&created)
        }
        Command::Stats => {
            let store = ReserveStore::new(client).with_list_query(page);
            match store.load().await {
                LoadOutcome::Failed => Err(store
                    .error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "load failed".to_string())
                    .into()),
                _ => print_json(&store.stats()),
            }
        }
        Command::Health => {
            if client.executor().health_check().await? {
                println!("healthy ({})", config.api.base_url);
                Ok(())
            } else {
                Err(format!("server at {} reported unhealthy", config.api.base_url).into())
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
