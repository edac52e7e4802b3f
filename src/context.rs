use std::path::PathBuf;

pub(crate) const DEFAULT_VAULT_DIR: &str =
    "/home/clawdbot/obsidian/Default Vault/Bases/_base_data/Books I Have Read";
pub(crate) const DEFAULT_OUT_FILE: &str = "/home/clawdbot/clawd/books-viz-app/dist/books.json";
pub(crate) const DEFAULT_INDEX_FILE_NAME: &str = "Content.md";

pub(crate) const VAULT_DIR_VAR: &str = "BOOKS_VAULT_DIR";
pub(crate) const OUT_FILE_VAR: &str = "BOOKS_OUT_FILE";
pub(crate) const INDEX_FILE_VAR: &str = "BOOKS_INDEX_FILE";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Context {
    /// Directory holding one markdown note per book.
    pub vault_dir: PathBuf,
    /// JSON file to (over)write.
    pub out_file: PathBuf,
    /// The vault's own index note. Never turned into a record.
    pub index_file_name: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            vault_dir: PathBuf::from(DEFAULT_VAULT_DIR),
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
            index_file_name: DEFAULT_INDEX_FILE_NAME.to_string(),
        }
    }
}

impl Context {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let default = Self::default();

        Self {
            vault_dir: var(VAULT_DIR_VAR).map_or(default.vault_dir, PathBuf::from),
            out_file: var(OUT_FILE_VAR).map_or(default.out_file, PathBuf::from),
            index_file_name: var(INDEX_FILE_VAR).unwrap_or(default.index_file_name),
        }
    }
}
