use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStyle {
    Expanded,
    #[default]
    Compressed,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub source_dir: PathBuf,
    pub pattern: SmolStr,
    pub output_dir: PathBuf,
    pub style: OutputStyle,
    /// Browserslist queries used to decide which vendor prefixes are emitted
    pub browsers: Vec<SmolStr>,
    /// Don't emit files whose name starts with an underscore
    pub skip_partials: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("sass"),
            pattern: SmolStr::new_inline("**/*.scss"),
            output_dir: PathBuf::from("static"),
            style: OutputStyle::Compressed,
            browsers: vec![SmolStr::new_inline("last 2 versions")],
            skip_partials: true,
        }
    }
}
