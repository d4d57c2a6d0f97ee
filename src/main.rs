use std::io;
use std::process;

use clap::Parser;
use ecseal::cli::{Cli, Config};
use ecseal::commands;
use log::debug;

fn main() {
    let config = Config::from(Cli::parse());

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level().as_str()),
    )
    .init();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let result = commands::run(&config, &mut stdout.lock(), &mut stderr.lock());

    if let Err(e) = result {
        debug!("command failed: {:?}", e);
        eprintln!("ecseal: {}", e);
        process::exit(e.exit_code());
    }
}
