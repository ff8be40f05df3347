use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use floe::bootstrap;
use floe::config::Settings;
use floe::error::FloeError;
use floe_connector_minio::{Connector, Split};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse an object-store catalog: buckets as databases, key prefixes as tables.", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List databases (buckets matching the configured prefix)
    Databases,
    /// List the tables of a database
    Tables { database: String },
    /// List the column names of a table
    Columns { database: String, table: String },
    /// Show the derived schema of a table
    Schema { database: String, table: String },
    /// Show the retrieval splits planned for a table
    Splits { database: String, table: String },
    /// Materialize and print a table's records
    Records { database: String, table: String },
}

#[tokio::main]
async fn main() -> Result<(), FloeError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let settings = Settings::new()?;
    let credentials = bootstrap::credential_source(&settings).fetch().await?;
    let connector = bootstrap::build_connector(&settings, &credentials)?;

    match args.command {
        Command::Databases => print_json(&connector.databases().await?)?,
        Command::Tables { database } => print_json(&connector.tables(&database).await?)?,
        Command::Columns { database, table } => {
            print_json(&connector.columns(&database, &table).await?)?;
        }
        Command::Schema { database, table } => {
            let schema = connector.schema(&database, &table).await?;
            println!("{schema:#?}");
        }
        Command::Splits { database, table } => {
            print_json(&connector.splits(&database, &table).await?)?;
        }
        Command::Records { database, table } => {
            let splits = connector.splits(&database, &table).await?;
            let split = splits.into_iter().next().unwrap_or_else(Split::whole_table);
            print_json(&connector.records(&database, &table, &split).await?)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), FloeError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
