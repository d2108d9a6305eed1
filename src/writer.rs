use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `<stem>.svg` into `dir`, creating it if needed. With `stamp`, also
/// write `<stem>-<YYYYMMDDTHHMMSSZ>.svg`. Returns every path written.
pub fn write_card(dir: &Path, stem: &str, svg: &str, stamp: Option<DateTime<Utc>>) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::new();

    let path = dir.join(format!("{stem}.svg"));
    fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    written.push(path);

    if let Some(at) = stamp {
        let path = dir.join(format!("{stem}-{}.svg", at.format("%Y%m%dT%H%M%SZ")));
        fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
