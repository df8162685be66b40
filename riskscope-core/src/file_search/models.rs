use crate::response::Citation;
use serde::{Deserialize, Serialize};

/// Response to an `upload` operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub operation_name: String,
    #[serde(default)]
    pub size_bytes: u64,
}

/// Response to a `search` operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub store_name: String,
}

/// One document in the File Search store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Resource name, used for deletion
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub mime_type: String,
}

impl DocumentInfo {
    /// Display name, or the resource name when the store has none
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Response to a `list` operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<DocumentInfo>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub pages_fetched: usize,
    #[serde(default)]
    pub store_name: String,
}

/// Response to a `delete` operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub document_name: String,
}

/// Request bodies; the service dispatches on the `operation` field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub(crate) enum Operation<'a> {
    Upload {
        file_data: String,
        filename: &'a str,
        mime_type: &'a str,
        display_name: &'a str,
    },
    Search {
        query: &'a str,
    },
    List,
    Delete {
        document_name: &'a str,
    },
}

impl Operation<'_> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Operation::Upload { .. } => "upload",
            Operation::Search { .. } => "search",
            Operation::List => "list",
            Operation::Delete { .. } => "delete",
        }
    }
}
