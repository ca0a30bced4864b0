use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::public::ai::{AnalyzeRequest, InsightsRequest, TimeRange};
use crate::api::public::field_data::{Category, FieldDataRecord};
use crate::api::{ApiClient, routes};

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[arg(long)]
    title: String,
    #[arg(long, value_enum)]
    category: Category,
    #[arg(long)]
    location: String,
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    user_id: String,
    /// When the observation was made (RFC 3339)
    #[arg(long)]
    time_taken: Option<String>,
}

impl From<RecordArgs> for FieldDataRecord {
    fn from(args: RecordArgs) -> Self {
        FieldDataRecord {
            id: None,
            title: args.title,
            category: args.category,
            location: args.location,
            latitude: args.latitude,
            longitude: args.longitude,
            description: args.description,
            user_id: args.user_id,
            time_taken: args.time_taken,
            created_at: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FieldDataAction {
    /// List every report
    List {},
    /// Show one report
    Get { id: String },
    /// Submit a new report
    Create {
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace an existing report
    Update {
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a report
    Delete { id: String },
}

pub async fn run(client: &ApiClient, action: FieldDataAction) -> Result<()> {
    let resp = match action {
        FieldDataAction::List {} => Value::Array(routes::field_data::list(client).await?),
        FieldDataAction::Get { id } => routes::field_data::get(client, &id).await?,
        FieldDataAction::Create { record } => {
            routes::field_data::create(client, &record.into()).await?
        }
        FieldDataAction::Update { id, record } => {
            routes::field_data::update(client, &id, &record.into()).await?
        }
        FieldDataAction::Delete { id } => routes::field_data::delete(client, &id).await?,
    };
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

pub async fn analyze(client: &ApiClient, id: Option<String>, data_type: String) -> Result<()> {
    let field_data = match id {
        Some(id) => routes::field_data::get(client, &id).await?,
        None => Value::Array(routes::field_data::list(client).await?),
    };
    let request = AnalyzeRequest {
        field_data,
        data_type,
    };
    let resp = routes::ai::analyze_field_data(client, &request).await?;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

pub async fn insights(client: &ApiClient, time_range: TimeRange) -> Result<()> {
    let request = InsightsRequest {
        all_field_data: routes::field_data::list(client).await?,
        time_range,
    };
    let resp = routes::ai::insights(client, &request).await?;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}
