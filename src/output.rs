//! CSV output for review exports.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::error::{HarvestError, Result};
use crate::types::OutputRow;

/// Serialize rows as CSV into any writer.
///
/// The header row comes from the [`OutputRow`] field names, written by the
/// csv crate on the first serialized record.
pub fn write_csv<W: Write>(rows: &[OutputRow], writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save output rows as a CSV file.
///
/// Refuses to write an empty export: zero rows indicates a misconfigured
/// query, so the file is not created at all. Uses the atomic write pattern
/// (temp file, sync, rename) so a crash cannot leave a partial file behind.
///
/// # Arguments
/// * `rows` - Output rows, already in final order
/// * `output_file` - Destination path
///
/// # Returns
/// Path to the saved file.
pub fn save_csv(rows: &[OutputRow], output_file: &Path) -> Result<PathBuf> {
    if rows.is_empty() {
        return Err(HarvestError::EmptyExport);
    }

    let file_name = output_file.file_name().ok_or_else(|| {
        HarvestError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Output path has no file name: {}", output_file.display()),
        ))
    })?;
    let parent = match output_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let temp_file = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    // Write to temp file first, then sync and rename for atomicity
    {
        let file = File::create(&temp_file)?;
        let mut csv_writer = Writer::from_writer(file);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        let file = csv_writer.into_inner().map_err(|e| {
            HarvestError::Io(io::Error::other(format!(
                "Failed to finalize CSV writer: {e}"
            )))
        })?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(output_file)?;
    }

    fs::rename(&temp_file, output_file)?;

    Ok(output_file.to_path_buf())
}
