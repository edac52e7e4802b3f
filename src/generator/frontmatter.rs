use crate::{
    error::FrontmatterError,
    metadata::{self, MetaValue},
};

pub(super) const DELIMITER: &str = "---";

/// Parses the YAML block between a leading `---` and the next `---` line.
///
/// `Ok(None)` when the content has no frontmatter or the block is blank.
/// Whatever YAML produced is handed back as is, mapping or not.
pub(super) fn extract(content: &str) -> Result<Option<MetaValue>, FrontmatterError> {
    if !content.starts_with(DELIMITER) {
        return Ok(None);
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let end = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == DELIMITER)
        .map(|i| i + 1)
        .ok_or(FrontmatterError::Unterminated)?;

    let block = lines[1..end].join("\n");
    let value = metadata::load(&block)?;

    Ok((!value.is_blank()).then_some(value))
}
