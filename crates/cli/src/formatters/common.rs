//! Common utilities for formatters.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// String printed for missing values in tables.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

pub fn format_missing(opt: Option<&str>) -> &str {
    opt.unwrap_or(DEFAULT_MISSING_VALUE)
}

pub fn format_missing_display<T: std::fmt::Display>(opt: Option<T>) -> String {
    opt.map(|v| v.to_string())
        .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
}

/// Shorten `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print output to stdout, or write it to `output_file` when given.
pub fn output_result(
    output: &str,
    format: crate::formatters::OutputFormat,
    output_file: Option<&std::path::PathBuf>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output.as_bytes(), path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write bytes to a file atomically (temp file in the same directory, then rename).
pub fn write_to_file(content: &[u8], path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory {}", parent_dir.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in {}", parent_dir.display()))?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
