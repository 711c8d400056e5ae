use anyhow::Result;
use clap::Args;

use super::common::{self, CommonArgs};
use super::Context;

#[derive(Args)]
pub struct SpendingArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Filter by fiscal year (e.g. 2024)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Filter by department name
    #[arg(short, long)]
    pub dept: Option<String>,

    /// Filter by vendor name
    #[arg(short, long)]
    pub vendor: Option<String>,

    /// Filter by fund name (e.g. "opioid")
    #[arg(long)]
    pub fund: Option<String>,

    /// Minimum dollar amount
    #[arg(long, allow_negative_numbers = true)]
    pub min_amount: Option<f64>,

    /// Maximum dollar amount
    #[arg(long, allow_negative_numbers = true)]
    pub max_amount: Option<f64>,
}

pub async fn run(args: &SpendingArgs, ctx: &Context) -> Result<()> {
    let mut spec = args.common.filter_spec();
    spec.year = args.year;
    spec.department = args.dept.clone();
    spec.vendor = args.vendor.clone();
    spec.fund = args.fund.clone();
    spec.min_amount = args.min_amount;
    spec.max_amount = args.max_amount;

    common::run(ctx, "spending", spec, &args.common).await
}
