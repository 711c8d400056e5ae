//! Options and execution shared by every data subcommand.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use cthru_lib::{
    build, render, save_export, CthruError, Destination, FilterSpec, OutputFormat,
};

use super::Context;
use crate::output;

#[derive(Args)]
pub struct CommonArgs {
    /// Number of records
    #[arg(short = 'n', long, default_value = "100", allow_negative_numbers = true)]
    pub limit: i64,

    /// Starting record offset for pagination
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,

    /// Output format: table, json, csv
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Save output to file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// General text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by field, e.g. "amount DESC"
    #[arg(long)]
    pub sort: Option<String>,

    /// Show links to view the data in a web browser
    #[arg(long)]
    pub url: bool,

    /// Also save the records with query metadata to a timestamped JSON file
    #[arg(long)]
    pub save_json: bool,
}

impl CommonArgs {
    /// Starts a filter spec carrying the options every dataset accepts.
    pub fn filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::default().with_limit(self.limit);
        spec.offset = self.offset;
        spec.search = self.search.clone();
        spec.sort = self.sort.clone();
        spec
    }
}

/// Resolve, build, fetch, render. Stops at the first error.
pub async fn run(ctx: &Context, dataset_id: &str, spec: FilterSpec, args: &CommonArgs) -> Result<()> {
    let dataset = ctx.registry.resolve(dataset_id)?;
    let query = build(dataset, &spec)?;
    tracing::debug!(dataset = %dataset.id, clauses = query.predicates.len(), "query built");

    let creds = ctx.settings.load_credentials()?;
    let client = ctx.settings.client();
    let result = client
        .execute(dataset, &query, creds.as_ref())
        .await
        .map_err(CthruError::from)?;

    if args.save_json {
        let path = save_export(Path::new("."), &dataset.id, &spec, &result)?;
        eprintln!("JSON saved to {}", path.display());
    }

    let destination = match &args.output {
        Some(path) => Destination::File(path.clone()),
        None => Destination::Stdout,
    };
    render(&result, dataset, args.format, &destination)?;
    output::print_summary(&result, &destination);

    if args.url {
        output::print_urls(&result);
    }

    Ok(())
}
