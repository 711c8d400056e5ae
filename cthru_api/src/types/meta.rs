use serde::{Deserialize, Serialize};

/// Subset of the `/api/views/{id}.json` document the client reads.
#[derive(Serialize, Deserialize, Debug)]
pub struct ViewMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub field_name: String,
    #[serde(default)]
    pub data_type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}
