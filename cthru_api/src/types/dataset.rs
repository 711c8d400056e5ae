//! Dataset descriptors: which remote resource a CLI name points at and how
//! logical filters map onto that resource's field names.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A filter the CLI knows about, independent of any dataset's column names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalFilter {
    Year,
    Department,
    Vendor,
    Fund,
    Name,
    Amount,
    Search,
}

impl fmt::Display for LogicalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LogicalFilter::Year => "year",
                LogicalFilter::Department => "department",
                LogicalFilter::Vendor => "vendor",
                LogicalFilter::Fund => "fund",
                LogicalFilter::Name => "name",
                LogicalFilter::Amount => "amount",
                LogicalFilter::Search => "search",
            }
        )
    }
}

/// How values compared against a remote field must be written in SoQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Stored as text; literals are quoted.
    Text,
    /// Stored as a number; literals are bare.
    Number,
}

/// The remote field(s) a logical filter is applied to.
///
/// More than one field means the filter matches when any of them matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTarget {
    pub fields: Vec<String>,
    pub kind: FieldKind,
}

impl FieldTarget {
    /// The field single-column filters (year, amount) compare against.
    pub fn primary(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }
}

/// A column name with an optional human-readable label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: Option<String>,
}

/// A queryable portal resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Short name used on the command line (e.g. `spending`).
    pub id: String,
    /// Socrata four-by-four identifier (e.g. `pegc-naaa`).
    pub resource_id: String,
    pub name: String,
    pub description: String,
    /// Catalogued columns, in display order. Empty for datasets whose schema
    /// is not catalogued.
    pub known_fields: Vec<FieldDescriptor>,
    field_map: BTreeMap<LogicalFilter, FieldTarget>,
}

impl DatasetDescriptor {
    pub fn new(id: &str, resource_id: &str) -> Self {
        Self {
            id: id.to_string(),
            resource_id: resource_id.to_string(),
            name: id.to_string(),
            description: String::new(),
            known_fields: Vec::new(),
            field_map: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_field(mut self, name: &str, label: Option<&str>) -> Self {
        self.known_fields.push(FieldDescriptor {
            name: name.to_string(),
            label: label.map(str::to_string),
        });
        self
    }

    /// Maps a logical filter onto one or more remote fields. An empty
    /// `fields` list leaves the filter unsupported.
    pub fn with_mapping(mut self, filter: LogicalFilter, fields: &[&str], kind: FieldKind) -> Self {
        if fields.is_empty() {
            self.field_map.remove(&filter);
            return self;
        }
        self.field_map.insert(
            filter,
            FieldTarget {
                fields: fields.iter().map(|f| f.to_string()).collect(),
                kind,
            },
        );
        self
    }

    /// Returns where `filter` applies on this dataset, or `None` if the
    /// dataset has no column for it.
    pub fn target(&self, filter: LogicalFilter) -> Option<&FieldTarget> {
        self.field_map.get(&filter)
    }

    /// Logical filters this dataset supports, in a stable order.
    pub fn supported_filters(&self) -> impl Iterator<Item = LogicalFilter> + '_ {
        self.field_map.keys().copied()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.known_fields.iter().any(|f| f.name == name)
    }

    /// True when no columns are catalogued, so field names cannot be checked
    /// locally.
    pub fn is_open_schema(&self) -> bool {
        self.known_fields.is_empty()
    }
}
