//! A terminal user interface profile form with schema-driven validation.

mod app;
mod config;
mod error;
mod events;
mod logger;
mod schema;
mod state;
mod ui;
mod utils;

use anyhow::Result;
use app::App;
use clap::{App as Cli, Arg};
use config::Config;

fn main() -> Result<()> {
    let matches = Cli::new("profile-tui")
        .version(clap::crate_version!())
        .about("A terminal user interface profile form")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config)?;
    Ok(())
}
