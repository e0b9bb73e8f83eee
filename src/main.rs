//! Главный исполняемый файл ddlparser

use clap::Parser;
use ddlparser::cli::{init_logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging.level);

    log::debug!("effective configuration: {:?}", config);
    let output = cli.execute(&config)?;
    println!("{}", output);

    Ok(())
}
