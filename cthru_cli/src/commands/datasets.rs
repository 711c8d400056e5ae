use anyhow::Result;
use clap::Args;
use cthru_lib::CthruError;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct DatasetsArgs {
    /// Show fields and remote column metadata for one dataset
    #[arg(long, value_name = "NAME")]
    pub info: Option<String>,
}

pub async fn run(args: &DatasetsArgs, ctx: &Context) -> Result<()> {
    let Some(name) = &args.info else {
        output::print_datasets(ctx.registry.list());
        return Ok(());
    };

    let dataset = ctx.registry.resolve(name)?;
    let creds = ctx.settings.load_credentials()?;
    let columns = ctx
        .settings
        .client()
        .fetch_columns(&dataset.resource_id, creds.as_ref())
        .await
        .map_err(CthruError::from)?;
    output::print_dataset_info(dataset, &columns);
    Ok(())
}
