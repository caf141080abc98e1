use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{info, warn};

/// Temp files younger than this may belong to a concurrent writer.
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes orphaned temp files that belong to `target` from `dir`.
pub(crate) async fn purge_tmp(dir: &Path, target: &Path) {
    let Some(prefix) = target.file_name().and_then(|n| n.to_str()).map(|n| format!("{n}{TMP_MARKER}"))
    else {
        return;
    };

    let Ok(mut entries) = fs::read_dir(dir).await else {
        return;
    };

    let now = SystemTime::now();
    let mut removed = 0_usize;

    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let is_tmp = name.to_str().is_some_and(|n| n.starts_with(&prefix));
        if !is_tmp || !is_stale(&entry, now).await {
            continue;
        }
        match fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(err) => warn!(path = %entry.path().display(), error = %err, "Temp cleanup failed"),
        }
    }

    if removed > 0 {
        info!(removed, "Cleaned up temporary store files");
    }
}

async fn is_stale(entry: &fs::DirEntry, now: SystemTime) -> bool {
    entry
        .metadata()
        .await
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > STALE_AFTER)
}
