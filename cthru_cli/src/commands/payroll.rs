use anyhow::Result;
use clap::Args;

use super::common::{self, CommonArgs};
use super::Context;

#[derive(Args)]
pub struct PayrollArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Filter by year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Filter by department/division
    #[arg(short, long)]
    pub dept: Option<String>,

    /// Filter by employee first or last name
    #[arg(long)]
    pub name: Option<String>,

    /// Minimum total pay
    #[arg(long, allow_negative_numbers = true)]
    pub min_amount: Option<f64>,

    /// Maximum total pay
    #[arg(long, allow_negative_numbers = true)]
    pub max_amount: Option<f64>,
}

pub async fn run(args: &PayrollArgs, ctx: &Context) -> Result<()> {
    let mut spec = args.common.filter_spec();
    spec.year = args.year;
    spec.department = args.dept.clone();
    spec.name = args.name.clone();
    spec.min_amount = args.min_amount;
    spec.max_amount = args.max_amount;

    common::run(ctx, "payroll", spec, &args.common).await
}
