use notify_debouncer_full::notify;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid browser query: {0}")]
    BrowserQuery(String),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error("source directory \"{}\" does not exist", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("source directory \"{}\" is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error(transparent)]
    Notify(#[from] notify::Error),

    #[error("\"{}\" is outside of the source directory", .0.display())]
    OutsideSourceDir(PathBuf),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error("file watcher shut down unexpectedly")]
    WatcherClosed,

    #[error("failed to write \"{}\"", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
