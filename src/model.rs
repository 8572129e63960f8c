// ABOUTME: Data models for deployments, file trees, and export outcomes
// ABOUTME: Deployment documents stay untyped; tree entries are validated variants

use serde_json::Value;

/// A deployment as returned by the metadata endpoint.
///
/// Only `id` and `url` are lifted out of the document; the rest is kept
/// verbatim in `document` and persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub id: String,
    pub url: Option<String>,
    pub document: Value,
}

impl Deployment {
    /// Builds a deployment from its raw document. Returns `None` when the
    /// document has no string `id`.
    pub fn from_document(document: Value) -> Option<Self> {
        let id = document.get("id")?.as_str()?.to_string();
        let url = document
            .get("url")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Some(Deployment { id, url, document })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    File {
        name: String,
        content_id: Option<String>,
    },
    Directory {
        name: String,
        children: Vec<TreeEntry>,
    },
}

impl TreeEntry {
    pub fn file(name: impl Into<String>, content_id: impl Into<String>) -> Self {
        TreeEntry::File {
            name: name.into(),
            content_id: Some(content_id.into()),
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<TreeEntry>) -> Self {
        TreeEntry::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeEntry::File { name, .. } | TreeEntry::Directory { name, .. } => name,
        }
    }
}

/// One downloadable file: slash-joined path relative to the deployment root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub path: String,
    pub content_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResult {
    pub deployment_id: String,
    pub tree_available: bool,
    pub attempted: usize,
    pub persisted: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ExportResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True when every attempted file was written.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}


#[cfg(test)]
mod result_tests {
    use super::*;

    #[test]
    fn test_export_result_counts() {
        let mut result = ExportResult {
            deployment_id: "dpl_1".into(),
            tree_available: true,
            attempted: 3,
            persisted: 2,
            skipped: Vec::new(),
        };
        assert!(result.is_complete());

        result.skipped.push(SkippedEntry {
            path: "src/a.js".into(),
            reason: "API error 500".into(),
        });
        assert_eq!(result.skipped_count(), 1);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_tree_entry_name() {
        assert_eq!(TreeEntry::file("a.js", "u1").name(), "a.js");
        assert_eq!(TreeEntry::dir("src", vec![]).name(), "src");
    }
}
