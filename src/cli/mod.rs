use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod chat;
pub mod export;
pub mod field_data;

use crate::api::public::ai::TimeRange;
use crate::api::{ApiClient, routes};
use crate::core::AppConfig;
use crate::export::ExportFormat;
use field_data::FieldDataAction;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SupabaseTable {
    FieldData,
    Users,
}

#[derive(Subcommand)]
enum Command {
    /// Start a chat session with the field data assistant
    Chat {},
    /// Check that the backend is up
    Health {},
    /// Fetch everything the backend holds
    Sync {},
    /// Read a Supabase table through the backend
    Supabase {
        #[arg(value_enum)]
        table: SupabaseTable,
    },
    /// Create, read, update and delete field reports
    FieldData {
        #[command(subcommand)]
        action: FieldDataAction,
    },
    /// Ask the AI to analyze one report, or all of them
    Analyze {
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value = "general")]
        data_type: String,
    },
    /// Ask the AI for insights across all reports
    Insights {
        #[arg(long, value_enum, default_value = "30d")]
        time_range: TimeRange,
    },
    /// Export field reports to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Base filename, the current date is appended
        #[arg(long, default_value = "field_data")]
        filename: String,
        /// Directory to write to, defaults to EASYTRACK_EXPORT_DIR
        #[arg(long)]
        out_dir: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Only reports created on or after this day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only reports created on or before this day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL, overrides EASYTRACK_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let mut config = AppConfig::default();
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    let client = ApiClient::new(&config);
    tracing::debug!(api = client.base_url(), "Using backend");

    // Handle each sub command
    match args.command {
        Some(Command::Chat {}) => {
            chat::run(&config, &client).await?;
        }
        Some(Command::Health {}) => {
            print_json(&routes::health::check(&client).await?)?;
        }
        Some(Command::Sync {}) => {
            print_json(&routes::sync::all_data(&client).await?)?;
        }
        Some(Command::Supabase { table }) => {
            let resp = match table {
                SupabaseTable::FieldData => routes::supabase::field_data(&client).await?,
                SupabaseTable::Users => routes::supabase::users(&client).await?,
            };
            print_json(&resp)?;
        }
        Some(Command::FieldData { action }) => {
            field_data::run(&client, action).await?;
        }
        Some(Command::Analyze { id, data_type }) => {
            field_data::analyze(&client, id, data_type).await?;
        }
        Some(Command::Insights { time_range }) => {
            field_data::insights(&client, time_range).await?;
        }
        Some(Command::Export {
            format,
            filename,
            out_dir,
            search,
            category,
            location,
            from,
            to,
        }) => {
            let filters = export::FilterArgs {
                search,
                category,
                location,
                from,
                to,
            };
            let out_dir = out_dir.unwrap_or_else(|| config.export_dir.clone());
            export::run(&config, &client, format, &filename, &out_dir, filters).await?;
        }
        None => {}
    }

    Ok(())
}
