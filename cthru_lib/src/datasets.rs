//! The compiled-in dataset table.
//!
//! Adding a dataset is a data-only change here: the builder reads the field
//! map on each descriptor and never branches on dataset names.

use cthru_api::types::{DatasetDescriptor, FieldDescriptor, FieldKind, LogicalFilter};

use crate::error::CthruError;

/// Immutable set of datasets, built once and passed to whoever needs it.
#[derive(Clone, Debug)]
pub struct Registry {
    datasets: Vec<DatasetDescriptor>,
}

impl Registry {
    pub fn new(datasets: Vec<DatasetDescriptor>) -> Self {
        Self { datasets }
    }

    /// The four CTHRU datasets the CLI exposes.
    pub fn builtin() -> Self {
        Self::new(vec![spending(), payroll(), settlements(), revenue()])
    }

    pub fn resolve(&self, name: &str) -> Result<&DatasetDescriptor, CthruError> {
        self.datasets
            .iter()
            .find(|d| d.id == name)
            .ok_or_else(|| CthruError::UnknownDataset {
                name: name.to_string(),
                available: self.ids(),
            })
    }

    pub fn list(&self) -> &[DatasetDescriptor] {
        &self.datasets
    }

    pub fn fields_for(&self, name: &str) -> Result<&[FieldDescriptor], CthruError> {
        Ok(&self.resolve(name)?.known_fields)
    }

    pub fn ids(&self) -> Vec<String> {
        self.datasets.iter().map(|d| d.id.clone()).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn spending() -> DatasetDescriptor {
    DatasetDescriptor::new("spending", "pegc-naaa")
        .with_name("Comptroller Spending")
        .with_description("Vendor payments and department expenditures")
        .with_field("vendor", Some("Vendor"))
        .with_field("department", Some("Department"))
        .with_field("amount", Some("Amount"))
        .with_field("date", Some("Date"))
        .with_field("budget_fiscal_year", Some("Fiscal Year"))
        .with_field("object_class", Some("Object Class"))
        .with_field("fund", Some("Fund"))
        // Fiscal year is stored as text on this resource.
        .with_mapping(LogicalFilter::Year, &["budget_fiscal_year"], FieldKind::Text)
        .with_mapping(LogicalFilter::Department, &["department"], FieldKind::Text)
        .with_mapping(LogicalFilter::Vendor, &["vendor"], FieldKind::Text)
        .with_mapping(LogicalFilter::Fund, &["fund"], FieldKind::Text)
        .with_mapping(LogicalFilter::Amount, &["amount"], FieldKind::Number)
        .with_mapping(LogicalFilter::Search, &["vendor", "department"], FieldKind::Text)
}

fn payroll() -> DatasetDescriptor {
    DatasetDescriptor::new("payroll", "9ttk-7vz6")
        .with_name("Commonwealth Payroll")
        .with_description("State employee salaries and compensation")
        .with_field("name_first", Some("First Name"))
        .with_field("name_last", Some("Last Name"))
        .with_field("department_division", Some("Department"))
        .with_field("position_title", Some("Position"))
        .with_field("pay_total_actual", Some("Total Pay"))
        .with_field("year", Some("Year"))
        .with_mapping(LogicalFilter::Year, &["year"], FieldKind::Number)
        .with_mapping(LogicalFilter::Department, &["department_division"], FieldKind::Text)
        .with_mapping(LogicalFilter::Name, &["name_first", "name_last"], FieldKind::Text)
        .with_mapping(LogicalFilter::Amount, &["pay_total_actual"], FieldKind::Number)
        .with_mapping(
            LogicalFilter::Search,
            &["name_first", "name_last", "department_division"],
            FieldKind::Text,
        )
}

// Settlements and revenue have no catalogued columns; search goes through
// the portal's full-text `$q` parameter.
fn settlements() -> DatasetDescriptor {
    DatasetDescriptor::new("settlements", "gpqz-7ppn")
        .with_name("Settlements & Judgments")
        .with_description("Legal settlement payments")
}

fn revenue() -> DatasetDescriptor {
    DatasetDescriptor::new("revenue", "kcy7-ivxi")
        .with_name("Revenue Collections")
        .with_description("Tax and non-tax revenue")
}
