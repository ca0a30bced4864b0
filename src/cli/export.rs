use anyhow::Result;

use crate::api::{ApiClient, routes};
use crate::core::AppConfig;
use crate::export::{DirectorySink, ExportFormat, Exporter, records_from_values};
use crate::filter::{FilterBuilder, FilterDescriptor, apply_filters};

#[derive(Debug, Default)]
pub struct FilterArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Runs the flags through the filter builder the same way the filter
/// panel does.
pub fn build_filters(config: &AppConfig, args: FilterArgs) -> Result<Vec<FilterDescriptor>> {
    let mut builder = FilterBuilder::new(config.filter_options.clone());
    if let Some(search) = &args.search {
        builder.set_search(search);
    }
    if let Some(category) = &args.category {
        builder.set_category(category)?;
    }
    if let Some(location) = &args.location {
        builder.set_location(location)?;
    }
    if let Some(from) = &args.from {
        builder.set_date_from(from);
    }
    if let Some(to) = &args.to {
        builder.set_date_to(to);
    }
    Ok(builder.apply().to_vec())
}

pub async fn run(
    config: &AppConfig,
    client: &ApiClient,
    format: ExportFormat,
    filename: &str,
    out_dir: &str,
    filters: FilterArgs,
) -> Result<()> {
    let descriptors = build_filters(config, filters)?;
    let all = routes::field_data::list(client).await?;
    let kept = apply_filters(&descriptors, &all);
    tracing::info!(
        total = all.len(),
        kept = kept.len(),
        filters = descriptors.len(),
        "Filtered field data"
    );

    let records = records_from_values(&kept)?;
    let mut exporter = Exporter::new(DirectorySink::new(out_dir));
    let notice = exporter.export(&records, filename, format)?;
    println!("{}", notice);
    Ok(())
}
