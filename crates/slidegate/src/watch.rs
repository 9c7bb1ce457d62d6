use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the deck file for changes. Events arrive on the notify thread and
/// are drained by the frame loop.
pub struct DeckWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebounceEventResult>,
    file_name: Option<OsString>,
}

impl DeckWatcher {
    /// `wake` is called from the watcher thread whenever events are queued.
    pub fn new(file: &Path, wake: impl Fn() + Send + 'static) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            if tx.send(result).is_ok() {
                wake();
            }
        })
        .context("Failed to start file watcher")?;

        // Editors often replace the file, so watch its directory.
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "watching for deck changes");

        Ok(Self {
            _debouncer: debouncer,
            rx,
            file_name: file.file_name().map(OsString::from),
        })
    }

    /// Drain pending events; true if any touched the deck file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events
                        .iter()
                        .any(|e| is_deck_event(&e.path, self.file_name.as_deref()));
                }
                Err(e) => tracing::warn!(error = ?e, "file watcher error"),
            }
        }
        changed
    }
}

fn is_deck_event(path: &Path, file_name: Option<&std::ffi::OsStr>) -> bool {
    file_name.is_some_and(|name| path.file_name() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_only_deck_file_counts() {
        let name = Some(OsStr::new("talk.md"));
        assert!(is_deck_event(Path::new("/decks/talk.md"), name));
        assert!(!is_deck_event(Path::new("/decks/.talk.md.swp"), name));
        assert!(!is_deck_event(Path::new("/decks/other.md"), name));
        assert!(!is_deck_event(Path::new("/decks/talk.md"), None));
    }

    #[test]
    fn test_watcher_starts_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("talk.md");
        std::fs::write(&file, "# One").unwrap();
        let watcher = DeckWatcher::new(&file, || {}).unwrap();
        assert_eq!(watcher.file_name.as_deref(), Some(OsStr::new("talk.md")));
    }
}
