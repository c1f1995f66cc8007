use serde::{Deserialize, Serialize};

/// Replace content, optionally bounded by a line range.
///
/// `start_line` and `end_line` are independent; nothing checks that one
/// precedes the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modify {
    pub start_line: Option<u64>,
    pub end_line: Option<u64>,
    pub content: String,
}

/// Append content to the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Add {
    pub content: String,
}

/// Delete the file. Carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {}

/// Every operation requested against one file, in document order per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub file_name: String,
    #[serde(default)]
    pub modifications: Vec<Modify>,
    #[serde(default)]
    pub additions: Vec<Add>,
    #[serde(default)]
    pub deletions: Vec<Delete>,
}

impl Change {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            modifications: Vec::new(),
            additions: Vec::new(),
            deletions: Vec::new(),
        }
    }

    pub fn operation_count(&self) -> usize {
        self.modifications.len() + self.additions.len() + self.deletions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }
}
