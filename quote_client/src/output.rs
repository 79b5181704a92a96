//! Writing the formatted quotation to disk.
//!
//! The line is written to a temporary file in the destination directory and
//! then renamed over the target, so readers never observe a partial file.
use std::io::Write;
use std::path::Path;

use log::info;
use quote_common::{QuoteError, Result};
use tempfile::NamedTempFile;

/// Format the bid as the single output line.
pub fn format_line(bid: f64) -> String {
    format!("Dólar: {:.4}", bid)
}

/// Atomically replace `path` with the formatted line for `bid`.
pub fn write_quote(path: &Path, bid: f64) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(format_line(bid).as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| QuoteError::Io(e.error))?;

    info!("Quotation written to {}", path.display());
    Ok(())
}
