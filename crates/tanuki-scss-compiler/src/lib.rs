#[macro_use]
extern crate tracing;

use rsass::output::{Format, Style};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tanuki_config::scss::{Configuration, OutputStyle};

pub use self::{
    error::{Error, Result},
    post_process::PostProcessor,
    report::{BatchReport, Diagnostic, Outcome, Stage},
    source::SourceSet,
};

mod error;
mod post_process;
mod report;
mod source;

pub mod watch;

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn write_output(destination: &Path, css: &str) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    fs::write(destination, css).map_err(write_error(destination))?;

    Ok(())
}

/// Stylesheet pipeline: SCSS compilation, vendor prefixing and writing into the output directory
#[derive(Clone, Debug)]
pub struct Compiler {
    sources: SourceSet,
    output_dir: PathBuf,
    format: Format,
    post_processor: PostProcessor,
}

impl Compiler {
    pub fn new(config: &Configuration) -> Result<Self> {
        let style = match config.style {
            OutputStyle::Compressed => Style::Compressed,
            OutputStyle::Expanded => Style::Expanded,
        };

        Ok(Self {
            sources: SourceSet::new(&config.source_dir, &config.pattern, config.skip_partials)?,
            output_dir: config.output_dir.clone(),
            format: Format {
                style,
                ..Format::default()
            },
            post_processor: PostProcessor::new(
                &config.browsers,
                config.style == OutputStyle::Compressed,
            )?,
        })
    }

    #[must_use]
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the CSS for `source` ends up. `None` if the file lives outside the source directory.
    #[must_use]
    pub fn destination_for(&self, source: &Path) -> Option<PathBuf> {
        let mut destination = self.output_dir.join(self.sources.relative(source)?);
        destination.set_extension("css");
        Some(destination)
    }

    pub fn compile_file(&self, path: &Path) -> Result<String, Diagnostic> {
        let compiled = rsass::compile_scss_path(path, self.format)
            .map_err(|err| Diagnostic::new(Stage::Compile, err))?;
        let compiled =
            String::from_utf8(compiled).map_err(|err| Diagnostic::new(Stage::Compile, err))?;

        self.post_processor
            .process(&path.display().to_string(), &compiled)
            .map_err(|message| Diagnostic::new(Stage::PostProcess, message))
    }

    /// Build every source once.
    ///
    /// A stylesheet that fails to compile is logged, recorded in the report and skipped.
    /// Anything else (missing source directory, unwritable output) aborts the whole batch.
    pub fn run(&self) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for source in self.sources.discover()? {
            let destination = self
                .destination_for(&source)
                .ok_or_else(|| Error::OutsideSourceDir(source.clone()))?;

            info!("Compiling \"{}\" into CSS", source.display());
            match self.compile_file(&source) {
                Ok(css) => {
                    write_output(&destination, &css)?;
                    debug!(destination = %destination.display(), "wrote stylesheet");
                    report.push(Outcome::Compiled {
                        source,
                        destination,
                    });
                }
                Err(diagnostic) => {
                    error!(source = %source.display(), %diagnostic, "failed to build stylesheet");
                    report.push(Outcome::Failed { source, diagnostic });
                }
            }
        }

        info!(
            compiled = report.compiled().count(),
            failed = report.failed().count(),
            "finished building stylesheets"
        );

        Ok(report)
    }
}
