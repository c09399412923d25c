pub mod scss;
pub mod watch;

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub scss: scss::Configuration,
    pub watch: watch::Configuration,
}

impl Configuration {
    pub fn load<P>(path: P) -> eyre::Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(eyre::Report::from)
    }

    /// Load the configuration file, falling back to the defaults if it doesn't exist
    pub fn load_or_default<P>(path: P) -> eyre::Result<Self>
    where
        P: AsRef<Path>,
    {
        match Self::load(path.as_ref()) {
            Err(report)
                if report
                    .downcast_ref::<io::Error>()
                    .is_some_and(|err| err.kind() == io::ErrorKind::NotFound) =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }
}
