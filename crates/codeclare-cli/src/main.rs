//! coDECLARE Command Line Interface
//!
//! This crate contains the coDECLARE CLI that reads coDECLARE business
//! process models, builds LTLf assume-guarantee contracts over their
//! activities, exports them in the TLSF format and runs reactive
//! synthesis on them with LydiaSyft.

use ::config::Config;

use clap::Parser;
use cli::{Cli, export_contract, initialize_logger};
use human_panic::setup_panic;
use log::{info, warn};

use crate::cli::engine::{SynthesisVerdict, run_synthesis};
use crate::cli::strategy::render_strategy;

mod cli;
mod codeclare_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_panic!();

    // parse the cli arguments
    let cli = Cli::parse();
    initialize_logger(cli.log_config)?;
    info!("Welcome to the coDECLARE synthesis toolchain!");
    match cli.command {
        cli::Commands::Export { input, output } => {
            export_contract(input, &output)?;

            info!("Finished exporting the contract. Goodbye!");
            Ok(())
        }
        cli::Commands::Synthesize {
            input,
            output,
            config_file,
            container,
            render,
        } => {
            let exported = export_contract(input, &output)?;

            // Check whether a configuration file was supplied
            let mut settings = Config::builder();
            if let Some(config_file) = config_file {
                if !config_file.exists() {
                    return Err(anyhow::anyhow!(
                        "Specified configuration file '{}' does not exist.",
                        config_file.display()
                    )
                    .into());
                }

                settings = settings.add_source(config::File::from(config_file));
            }

            // Parse configuration from environment variables
            settings = settings.add_source(config::Environment::with_prefix("CODECLARE"));
            let mut config = settings
                .build()?
                .try_deserialize::<codeclare_config::CodeclareConfig>()?;

            // Check whether the container was overridden via CLI
            if let Some(container) = container {
                config.set_container(container);
            }

            let outcome = run_synthesis(&exported.tlsf_file, &output.output_dir, &config.engine())?;

            match outcome.verdict() {
                SynthesisVerdict::Realizable => {
                    info!("The contract is REALIZABLE, a winning strategy for the system exists")
                }
                SynthesisVerdict::Unrealizable => info!(
                    "The contract is UNREALIZABLE, the environment can force a violation of the guarantees"
                ),
                SynthesisVerdict::Unknown => {
                    warn!("The engine reported no verdict, check its output")
                }
            }

            if let Some(format) = render {
                match outcome.strategy_file() {
                    Some(strategy_file) => {
                        render_strategy(strategy_file, format)?;
                    }
                    None => warn!("No strategy to render, skipping the rendering step"),
                }
            }

            info!("Finished the synthesis pipeline. Goodbye!");
            Ok(())
        }
    }
}
