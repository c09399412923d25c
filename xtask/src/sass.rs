use color_eyre::eyre::{self, Context};
use tanuki_config::Configuration;
use tanuki_scss_compiler::Compiler;

pub fn sass(config: &Configuration) -> eyre::Result<()> {
    info!("Building SCSS..");

    let compiler = Compiler::new(&config.scss).wrap_err("Invalid SCSS configuration")?;
    let report = compiler.run().wrap_err("Failed to build the stylesheets")?;

    // Per-file failures were already logged and don't affect the exit status
    if report.has_failures() {
        warn!(
            failed = report.failed().count(),
            "some stylesheets failed to compile"
        );
    }

    Ok(())
}
