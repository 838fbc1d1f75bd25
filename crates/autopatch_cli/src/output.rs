use anyhow::{Context, Result};
use autopatch_core::{Catalog, Patch, WriteOptions, write_patch};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write a patch file at `path`.
///
/// The document goes to a temporary file next to `path` and is renamed into
/// place once fully flushed, so a failed run never leaves a truncated file.
pub fn save_patch(
    path: &Path,
    patch: &Patch,
    catalog: &Catalog,
    options: &WriteOptions,
) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    let mut writer = BufWriter::new(temp);
    write_patch(&mut writer, patch, catalog, options).context("Failed to serialize patch")?;
    writer.flush().context("Failed to flush patch")?;

    let temp = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush patch")?;
    temp.persist(path)
        .with_context(|| format!("Failed to write patch to {}", path.display()))?;

    tracing::debug!(path = %path.display(), "patch written");
    Ok(())
}
