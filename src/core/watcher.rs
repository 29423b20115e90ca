//! Watches the mod folder so the list follows changes made outside the app

use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Non-recursive watcher on a single folder
pub struct FolderWatcher {
    // Dropping the watcher stops the notifications
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
}

impl FolderWatcher {
    /// Start watching a folder
    pub fn watch(folder: &Path) -> Result<Self> {
        let (tx, receiver) = channel();
        let mut watcher = notify::recommended_watcher(tx)
            .context("Failed to create file watcher")?;
        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", folder.display()))?;

        tracing::debug!("Watching mod folder: {}", folder.display());
        Ok(Self {
            _watcher: watcher,
            receiver,
        })
    }

    /// Drain pending events, returning true if the folder content changed
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => changed = true,
                Ok(_) => {}
                Err(e) => tracing::warn!("File watcher error: {}", e),
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[test]
    fn test_quiet_folder_reports_no_change() {
        let dir = TempDir::new().unwrap();
        let watcher = FolderWatcher::watch(dir.path()).unwrap();
        assert!(!watcher.changed());
    }

    #[test]
    fn test_new_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let watcher = FolderWatcher::watch(dir.path()).unwrap();
        std::fs::write(dir.path().join("Foo_P.pak"), b"data").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = false;
        while !changed && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
            changed = watcher.changed();
        }
        assert!(changed);
    }
}
