#[macro_use]
extern crate tracing;

use argh::FromArgs;
use color_eyre::eyre;
use tanuki_config::Configuration;

mod sass;
mod watch;

#[derive(FromArgs)]
#[argh(subcommand, name = "sass")]
/// Compile the SCSS sources into the static directory once
struct Sass {
    #[argh(option, short = 'c', default = "\"tanuki.toml\".into()")]
    /// path to the configuration file
    config: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "watch")]
/// Watch the SCSS sources and rebuild the stylesheets on every change
struct Watch {
    #[argh(option, short = 'c', default = "\"tanuki.toml\".into()")]
    /// path to the configuration file
    config: String,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Sass(Sass),
    Watch(Watch),
}

#[derive(FromArgs)]
/// Tanuki stylesheet taskrunner
struct Command {
    #[argh(subcommand)]
    subcommand: Subcommand,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tanuki_observability::initialise()?;

    let command: Command = argh::from_env();
    match command.subcommand {
        Subcommand::Sass(Sass { config }) => {
            sass::sass(&Configuration::load_or_default(config)?)?;
        }
        Subcommand::Watch(Watch { config }) => {
            watch::watch(&Configuration::load_or_default(config)?)?;
        }
    }

    Ok(())
}
