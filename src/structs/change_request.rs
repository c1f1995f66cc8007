use serde::{Deserialize, Serialize};

use crate::structs::change::Change;
use crate::structs::file_ref::FileRef;

/// A parsed change request. Built in one piece by the markup parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub summary: String,
    #[serde(default)]
    pub files_to_change: Vec<FileRef>,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub additional_steps: Vec<String>,
    #[serde(default)]
    pub verification_steps: Vec<String>,
}

impl ChangeRequest {
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files_to_change.iter().map(|file| file.name.as_str())
    }

    pub fn total_operations(&self) -> usize {
        self.changes.iter().map(Change::operation_count).sum()
    }

    pub fn changes_for<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a Change> + 'a {
        self.changes.iter().filter(move |change| change.file_name == file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::change::{Add, Delete};

    #[test]
    fn deserializes_with_missing_lists_defaulted() {
        let request: ChangeRequest = serde_json::from_str(r#"{"summary":"Simple change"}"#).unwrap();
        assert_eq!(request.summary, "Simple change");
        assert!(request.files_to_change.is_empty());
        assert!(request.changes.is_empty());
        assert_eq!(request.total_operations(), 0);
    }

    #[test]
    fn changes_for_keeps_duplicates_in_order() {
        let mut first = Change::new("a.py");
        first.additions.push(Add { content: "one".into() });
        let mut second = Change::new("a.py");
        second.deletions.push(Delete {});

        let request = ChangeRequest {
            summary: "s".into(),
            files_to_change: vec![FileRef::new("a.py")],
            changes: vec![first, Change::new("b.py"), second],
            additional_steps: vec![],
            verification_steps: vec![],
        };

        let matching: Vec<_> = request.changes_for("a.py").collect();
        assert_eq!(matching.len(), 2);
        assert_eq!(matching[0].additions.len(), 1);
        assert_eq!(matching[1].deletions.len(), 1);
        assert_eq!(request.file_names().collect::<Vec<_>>(), vec!["a.py"]);
        assert_eq!(request.total_operations(), 2);
    }
}
