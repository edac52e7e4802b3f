use serde_json::{Map, Value};
use std::path::PathBuf;

/// Field injected into every record, holding the note's file stem.
pub(super) const FILENAME_FIELD: &str = "_filename";

pub(super) type BookRecord = Map<String, Value>;

#[derive(Debug, Clone)]
pub(super) struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub stem: String,
}

#[derive(Debug)]
pub(crate) struct Summary {
    pub written: usize,
    /// notes without frontmatter
    pub skipped: usize,
    pub failed: Vec<String>,
    pub out_file: PathBuf,
}
