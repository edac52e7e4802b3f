use anyhow::bail;
use context::Context;
use generator::generate;
use log::{debug, info};

mod context;
mod error;
mod generator;
mod metadata;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::from_env();
    debug!("{ctx:?}");

    if !ctx.vault_dir.exists() || !ctx.vault_dir.is_dir() {
        bail!("vault_dir({:?}) must be a directory.", ctx.vault_dir);
    }
    if ctx.out_file.is_dir() {
        bail!("out_file({:?}) must not be a directory.", ctx.out_file);
    }

    let summary = generate(&ctx)?;
    info!(
        "{:?}: {} written, {} without frontmatter, {} failed ({:?})",
        summary.out_file,
        summary.written,
        summary.skipped,
        summary.failed.len(),
        summary.failed
    );

    Ok(())
}
