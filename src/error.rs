use thiserror::Error;

/// Reasons a frontmatter block that was opened could not be turned into metadata.
#[derive(Error, Debug)]
pub(crate) enum FrontmatterError {
    #[error("frontmatter is not closed by a `---` line")]
    Unterminated,

    #[error("invalid YAML in frontmatter: {0}")]
    Yaml(#[from] yaml_rust2::scanner::ScanError),

    #[error("invalid date or timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),
}

/// Per-file failure. Reported by the generator, never fatal for the run.
#[derive(Error, Debug)]
pub(crate) enum BookError {
    #[error("failed to read: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error("frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}
