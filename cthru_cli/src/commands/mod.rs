//! CLI subcommand implementations.

pub mod common;
pub mod datasets;
pub mod payroll;
pub mod records;
pub mod spending;

use cthru_lib::{Registry, Settings};

/// What every subcommand runs against.
pub struct Context {
    pub registry: Registry,
    pub settings: Settings,
}
