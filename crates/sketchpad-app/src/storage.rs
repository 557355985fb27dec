//! Saving exported drawings to disk.

use crate::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: u64 = 86_400;

/// Writes PNG drawings to a fixed, timestamped file chosen when the session starts.
///
/// Saving twice in one session overwrites the same file.
#[derive(Debug, Clone)]
pub struct ImageSaver {
    path: PathBuf,
}

impl ImageSaver {
    /// Choose `<dir>/<yyyyMMdd_HHmmss>.png` for `now` (UTC).
    pub fn new(dir: impl Into<PathBuf>, now: SystemTime) -> Self {
        let path = dir.into().join(timestamp_filename(now));
        Self { path }
    }

    /// The file drawings are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write PNG bytes, creating the output directory if needed.
    pub fn save(&self, png_data: &[u8]) -> AppResult<&Path> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|source| AppError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        std::fs::write(&self.path, png_data).map_err(|source| AppError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Image is saved: {}", self.path.display());
        Ok(&self.path)
    }
}

/// `yyyyMMdd_HHmmss.png` for the given instant, in UTC.
pub fn timestamp_filename(now: SystemTime) -> String {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let (year, month, day) = civil_from_days((secs / SECS_PER_DAY) as i64);
    let rem = secs % SECS_PER_DAY;
    format!(
        "{year:04}{month:02}{day:02}_{:02}{:02}{:02}.png",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Proleptic Gregorian (year, month, day) for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
