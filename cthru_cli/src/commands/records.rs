//! Settlements and revenue: datasets with only the common options.

use anyhow::Result;

use super::common::{self, CommonArgs};
use super::Context;

pub async fn run(dataset_id: &str, args: &CommonArgs, ctx: &Context) -> Result<()> {
    common::run(ctx, dataset_id, args.filter_spec(), args).await
}
