//! Rebuild-on-change loop.
//!
//! Builds run on the thread that consumes the watcher events. Changes that come in while a build is running
//! queue up in the channel and get merged into a single follow-up build once it finishes.

use crate::{Compiler, Error, Result, SourceSet};
use notify_debouncer_full::{
    notify::{self, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};
use std::{
    fs,
    path::PathBuf,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    time::{Duration, Instant},
};
use tanuki_config::watch::Configuration;

/// Live subscription to changes of the stylesheet sources.
///
/// Dropping the handle stops the underlying watcher.
pub struct WatchHandle {
    sources: SourceSet,
    events: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl WatchHandle {
    pub fn new(config: &Configuration, sources: &SourceSet) -> Result<Self> {
        let base = fs::canonicalize(sources.base())
            .map_err(|_| Error::MissingSourceDir(sources.base().to_path_buf()))?;

        let (sender, events) = mpsc::channel();
        let mut debouncer = notify_debouncer_full::new_debouncer(config.debounce(), None, sender)?;
        debouncer.watch(&base, RecursiveMode::Recursive)?;

        info!(path = %base.display(), "watching for stylesheet changes");

        Ok(Self {
            sources: sources.clone(),
            events,
            _debouncer: debouncer,
        })
    }

    fn relevant_paths(&self, result: DebounceEventResult) -> Vec<PathBuf> {
        let events = match result {
            Ok(events) => events,
            Err(errors) => {
                for error in errors {
                    warn!(?error, "file watcher reported an error");
                }
                return Vec::new();
            }
        };

        events
            .into_iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    notify::EventKind::Create(..)
                        | notify::EventKind::Modify(..)
                        | notify::EventKind::Remove(..)
                )
            })
            .flat_map(|event| event.event.paths)
            .filter(|path| self.sources.matches(path))
            .collect()
    }

    /// Block until a source changes, or until `timeout` runs out.
    ///
    /// Everything already queued when the first relevant event arrives is folded into the same change.
    pub fn next_change(&self, timeout: Option<Duration>) -> Result<Option<Vec<PathBuf>>> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let result = match deadline {
                Some(deadline) => {
                    match self
                        .events
                        .recv_timeout(deadline.saturating_duration_since(Instant::now()))
                    {
                        Ok(result) => result,
                        Err(RecvTimeoutError::Timeout) => return Ok(None),
                        Err(RecvTimeoutError::Disconnected) => return Err(Error::WatcherClosed),
                    }
                }
                None => self.events.recv().map_err(|_| Error::WatcherClosed)?,
            };

            let mut paths = self.relevant_paths(result);
            while let Ok(result) = self.events.try_recv() {
                paths.extend(self.relevant_paths(result));
            }

            if !paths.is_empty() {
                paths.sort();
                paths.dedup();
                return Ok(Some(paths));
            }
        }
    }

    /// Rebuild everything whenever a source changes. Only returns on a fatal error.
    pub fn run(&self, compiler: &Compiler) -> Result<()> {
        loop {
            let Some(paths) = self.next_change(None)? else {
                continue;
            };

            debug!(?paths, "stylesheet sources changed");
            info!("Rebuilding stylesheets");

            compiler.run()?;
        }
    }
}
