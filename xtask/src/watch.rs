use color_eyre::eyre::{self, Context};
use tanuki_config::Configuration;
use tanuki_scss_compiler::{watch::WatchHandle, Compiler};

pub fn watch(config: &Configuration) -> eyre::Result<()> {
    let compiler = Compiler::new(&config.scss).wrap_err("Invalid SCSS configuration")?;
    let handle = WatchHandle::new(&config.watch, compiler.sources())
        .wrap_err("Failed to start the file watcher")?;

    handle
        .run(&compiler)
        .wrap_err("Stopped watching the stylesheets")
}
