use std::path::Path;

use anyhow::Context as _;
use log::{debug, info, warn};

use crate::{context::Context, error::BookError, metadata::MetaValue};

mod data;
mod frontmatter;
mod normalize;

pub(crate) use data::Summary;
use data::{BookRecord, SourceFile, FILENAME_FIELD};

/// Markdown notes directly under `vault_dir`, ordered by file name.
fn collect_sources(ctx: &Context) -> anyhow::Result<Vec<SourceFile>> {
    let mut sources = vec![];

    for entry in std::fs::read_dir(&ctx.vault_dir)
        .with_context(|| format!("while reading {:?}", ctx.vault_dir))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "md") {
            continue;
        }
        if !path.is_file() {
            debug!("{path:?} is not a file. ignoring...");
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name == ctx.index_file_name {
            debug!("{file_name} is the index note. ignoring...");
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        sources.push(SourceFile {
            path,
            file_name,
            stem,
        });
    }

    sources.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(sources)
}

fn process_file(source: &SourceFile) -> Result<Option<BookRecord>, BookError> {
    let content = std::fs::read_to_string(&source.path)?;

    let mut metadata = match frontmatter::extract(&content)? {
        None => return Ok(None),
        Some(MetaValue::Mapping(metadata)) => metadata,
        Some(other) => return Err(BookError::NotAMapping(other.kind())),
    };

    let filename = MetaValue::String(source.stem.clone());
    if let Some(previous) = metadata.insert(FILENAME_FIELD, filename) {
        warn!(
            "{}: frontmatter field `{FILENAME_FIELD}` ({previous:?}) is overwritten by the file name",
            source.file_name
        );
    }
    debug!("{}: {} fields", source.file_name, metadata.len());

    Ok(Some(normalize::normalize_metadata(&metadata)))
}

fn write_output(out_file: &Path, books: &[BookRecord]) -> anyhow::Result<()> {
    if let Some(parent) = out_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("while creating {parent:?}"))?;
        }
    }

    let json = serde_json::to_string_pretty(books)?;
    std::fs::write(out_file, json).with_context(|| format!("while writing {out_file:?}"))?;

    Ok(())
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<Summary> {
    let sources = collect_sources(ctx)?;
    info!("{} notes found in {:?}", sources.len(), ctx.vault_dir);

    let mut books = vec![];
    let mut skipped = 0;
    let mut failed = vec![];

    for source in sources.iter() {
        match process_file(source) {
            Ok(Some(book)) => books.push(book),
            Ok(None) => {
                debug!("{} has no frontmatter. skipping...", source.file_name);
                skipped += 1;
            }
            Err(e) => {
                println!("  ⚠️  {}: {}", source.file_name, e);
                failed.push(source.file_name.clone());
            }
        }
    }

    write_output(&ctx.out_file, &books)?;

    let out_name = ctx
        .out_file
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy());
    println!(
        "✅ Generated {out_name}: {} books → {}",
        books.len(),
        ctx.out_file.display()
    );

    Ok(Summary {
        written: books.len(),
        skipped,
        failed,
        out_file: ctx.out_file.clone(),
    })
}
