//! Reading and writing the pipeline's JSON artifacts.
//!
//! Two files flow through the pipeline:
//! - `data/headlines.json`: the flat corpus, a JSON array of raw records.
//!   Written by `fetch`, updated in place by `dates` and `clean`.
//! - `data/by-day.json`: the day index, written by `build` and loaded by
//!   [`crate::archive::Archive`].
//!
//! Both are pretty-printed with two-space indentation. Serialization order
//! is deterministic, so rebuilding from an unchanged corpus rewrites the
//! index byte for byte.

use std::error::Error;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::{DayIndex, RawHeadline};

/// Read the flat headline corpus from `path`.
///
/// # Errors
///
/// Fails when the file is missing or not a JSON array of records; pipeline
/// steps treat that as fatal.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_headlines(path: &Path) -> Result<Vec<RawHeadline>, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let records: Vec<RawHeadline> = serde_json::from_str(&raw)?;
    info!(records = records.len(), "Read headline corpus");
    Ok(records)
}

/// Write the flat headline corpus to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_headlines(path: &Path, records: &[RawHeadline]) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;
    create_parent(path).await?;
    fs::write(path, json).await?;
    info!(records = records.len(), "Wrote headline corpus");
    Ok(())
}

/// Read the day index artifact from `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_day_index(path: &Path) -> Result<DayIndex, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let index: DayIndex = serde_json::from_str(&raw)?;
    info!(days = index.len(), "Read day index");
    Ok(index)
}

/// Write the day index artifact to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_day_index(path: &Path, index: &DayIndex) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(index)?;
    create_parent(path).await?;
    fs::write(path, json).await?;
    info!(days = index.len(), "Wrote day index");
    Ok(())
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Crawling steps call this up front so a bad output location fails before
/// any network work, not after it. The check is a probe file created and
/// immediately removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable(path: &Path) -> Result<(), Box<dyn Error>> {
    create_parent(path).await?;
    let probe = parent_dir(path).join(".__probe_write__");
    match stdfs::File::create(&probe) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe);
            info!("Artifact directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

async fn create_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    let dir = parent_dir(path);
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create artifact directory");
        return Err(e.into());
    }
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
