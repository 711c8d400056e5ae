//! User-facing text that is not record output: summaries, links, the
//! dataset listing and error reports. All of it goes to stderr except the
//! `datasets` listing, which is the command's actual output.

use std::process::ExitCode;

use cthru_lib::cthru_api;
use cthru_lib::credentials::{SECRET_ENV, TOKEN_ENV};
use cthru_lib::types::{ColumnMetadata, DatasetDescriptor, ResultSet};
use cthru_lib::{CthruError, Destination};

pub fn print_summary(result: &ResultSet, destination: &Destination) {
    eprintln!("{}", summary_line(result.len(), destination));
}

fn summary_line(count: usize, destination: &Destination) -> String {
    match destination {
        Destination::File(path) => format!("Results saved to {} ({} records)", path.display(), count),
        Destination::Stdout => format!("--- {} records ---", count),
    }
}

pub fn print_urls(result: &ResultSet) {
    eprintln!("\nAPI URL:    {}", result.request_url);
    eprintln!("Portal URL: {}", result.portal_url);
}

pub fn print_datasets(datasets: &[DatasetDescriptor]) {
    print!("{}", dataset_listing(datasets));
}

fn dataset_listing(datasets: &[DatasetDescriptor]) -> String {
    let mut out = String::from("Available CTHRU datasets:\n\n");
    for d in datasets {
        out.push_str(&format!("  {:<12} {}\n", d.id, d.name));
        out.push_str(&format!("  {:<12} {}\n", "", d.description));
        out.push_str(&format!("  {:<12} ID: {}\n\n", "", d.resource_id));
    }
    out
}

pub fn print_dataset_info(dataset: &DatasetDescriptor, columns: &[ColumnMetadata]) {
    print!("{}", dataset_info(dataset, columns));
}

fn dataset_info(dataset: &DatasetDescriptor, columns: &[ColumnMetadata]) -> String {
    let mut out = format!("{} ({})\n", dataset.name, dataset.id);
    out.push_str(&format!("Resource: {}\n", dataset.resource_id));
    out.push_str(&format!("{}\n", dataset.description));

    if dataset.known_fields.is_empty() {
        out.push_str("\nNo curated fields; any column name is accepted for --sort.\n");
    } else {
        out.push_str("\nDisplay fields:\n");
        for field in &dataset.known_fields {
            match &field.label {
                Some(label) => out.push_str(&format!("  {:<24} {}\n", field.name, label)),
                None => out.push_str(&format!("  {}\n", field.name)),
            }
        }
    }

    out.push_str(&format!("\nRemote columns ({}):\n", columns.len()));
    for col in columns {
        out.push_str(&format!("  {:<24} {}", col.field_name, col.data_type_name));
        if let Some(desc) = col.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("  {}", desc.trim()));
        }
        out.push('\n');
    }
    out
}

/// Prints the error chain and picks the process exit code.
pub fn report_error(err: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {}", err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
    if is_missing_credentials(err) {
        eprint!("{}", credentials_help());
    }
    ExitCode::from(exit_code(err))
}

fn is_missing_credentials(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CthruError>(),
        Some(CthruError::Api(cthru_api::Error::MissingCredentials))
    )
}

fn credentials_help() -> String {
    format!(
        "\nTo configure credentials, either:\n  \
         - set {} (and optionally {}), or\n  \
         - create a file named `cthru_api` containing:\n      ID: <app token>\n      secret: <secret>\n  \
         - or pass --anonymous to query without credentials (lower rate limits)\n",
        TOKEN_ENV, SECRET_ENV
    )
}

/// 2 bad input, 3 credentials, 4 remote rejection, 5 timeout, 6 output, 1 anything else.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CthruError>() {
        Some(e) if e.is_user_input() => 2,
        Some(CthruError::Credentials(_)) => 3,
        Some(CthruError::Api(api)) => match api {
            cthru_api::Error::MissingCredentials => 3,
            cthru_api::Error::RemoteQuery { .. } => 4,
            cthru_api::Error::Timeout { .. } => 5,
            _ => 1,
        },
        Some(CthruError::Render(_)) => 6,
        _ => 1,
    }
}
