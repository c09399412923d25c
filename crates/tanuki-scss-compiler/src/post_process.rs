use crate::{Error, Result};
use lightningcss::{
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet},
    targets::{Browsers, Targets},
};

/// Vendor-prefixing step run over the compiler output
#[derive(Clone, Debug)]
pub struct PostProcessor {
    targets: Targets,
    minify: bool,
}

impl PostProcessor {
    pub fn new<S>(browsers: &[S], minify: bool) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let browsers = Browsers::from_browserslist(browsers.iter().map(AsRef::<str>::as_ref))
            .map_err(|err| Error::BrowserQuery(err.to_string()))?;

        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
            minify,
        })
    }

    pub fn process(&self, filename: &str, css: &str) -> Result<String, String> {
        let options = ParserOptions {
            filename: filename.to_owned(),
            ..ParserOptions::default()
        };
        let mut stylesheet = StyleSheet::parse(css, options).map_err(|err| err.to_string())?;

        // Prefixes get added while minifying, so this runs for expanded output too
        stylesheet
            .minify(MinifyOptions {
                targets: self.targets,
                ..MinifyOptions::default()
            })
            .map_err(|err| err.to_string())?;

        let output = stylesheet
            .to_css(PrinterOptions {
                minify: self.minify,
                targets: self.targets,
                ..PrinterOptions::default()
            })
            .map_err(|err| err.to_string())?;

        Ok(output.code)
    }
}
