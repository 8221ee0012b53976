//! Command Line Interface for the coDECLARE toolchain
//!
//! The CLI uses the `clap` crate to parse command line arguments. This
//! module defines all available commands and options (and their
//! documentation) as well as the export pipeline shared by the
//! `export` and `synthesize` commands.

use std::result::Result::Ok;
use std::{fs, path::PathBuf};

use anyhow::{Context, anyhow};

use clap::{Args, Parser, Subcommand};

use log::{LevelFilter, info};
use log4rs::{
    Config,
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use codeclare_contract::build_contract;
use codeclare_parser::parse_model;
use codeclare_tlsf::export_tlsf;

pub(crate) mod engine;
pub(crate) mod strategy;

/// coDECLARE synthesis toolchain - Command Line Interface
///
/// This is the command line interface for the coDECLARE synthesis
/// toolchain. It reads a coDECLARE business process model, builds the
/// LTLf assume-guarantee contract over its activities, serializes the
/// contract into the TLSF format and optionally runs reactive synthesis
/// on it with LydiaSyft.
/// You can use the --help / -h flag to get all available commands and
/// options.
#[derive(Parser, Debug)]
#[command(version, name = "coDECLARE CLI", about, long_about)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) log_config: LoggerConfig,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Read a model document and export its contract as `.ltlf` and `.tlsf`
    Export {
        #[command(flatten)]
        input: ModelFileInput,

        #[command(flatten)]
        output: ExportOutput,
    },
    /// Export the contract and run LydiaSyft synthesis on it
    Synthesize {
        #[command(flatten)]
        input: ModelFileInput,

        #[command(flatten)]
        output: ExportOutput,

        /// Configuration file for the synthesis pipeline
        #[arg(short, long, value_name = "CONFIG_FILE")]
        config_file: Option<PathBuf>,

        /// Name of the Docker container running LydiaSyft
        #[arg(long, value_name = "CONTAINER")]
        container: Option<String>,

        /// Render the synthesized strategy in the given format
        ///
        /// Supported formats are: `pdf`, `svg`, `png`. Rendering requires
        /// the `graphviz` library to be installed on the system
        #[arg(short, long, value_name = "RENDER_FORMAT")]
        render: Option<strategy::RenderFormat>,
    },
}

#[derive(Args, Debug)]
pub(crate) struct ModelFileInput {
    /// Location and name of the JSON model document
    input_file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ExportOutput {
    /// Directory the generated files are written to (created if absent)
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = "outputs")]
    pub(crate) output_dir: PathBuf,

    /// Title recorded in the TLSF INFO section
    ///
    /// Defaults to `coDECLARE contract (<input file stem>)`
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct LoggerConfig {
    /// Read the logger configuration from file.
    /// Logger configuration can be provided in the log4rs specification format.
    #[arg(long)]
    logger_config_file: Option<String>,

    /// Enable debug output.
    /// **Note**: This flag must be passed first, before any command.
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Initialize the logger as specified in `cfg`
///
/// By default the logger is configured to log to stdout. If a log4rs
/// configuration file is given in `cfg`, the configuration from that file will
/// be used instead
pub(crate) fn initialize_logger(cfg: LoggerConfig) -> Result<(), anyhow::Error> {
    if let Some(f) = cfg.logger_config_file {
        // Read logger configuration file
        log4rs::init_file(f, Default::default())
            .with_context(|| "Failed to read logger config file")?;
        return Ok(());
    }

    let p_encoder = match cfg.debug {
        true => PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} - {h({l})} - [{f}:{L} - {M}] - {m}{n}"),
        false => PatternEncoder::new("{d(%H:%M:%S)} - {h({l})} - {m}{n}"),
    };

    // Log to stdout
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(p_encoder))
        .build();

    let mut level = LevelFilter::Info;
    if cfg.debug {
        level = LevelFilter::Debug;
    }

    let log_config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .expect("Failed to initialize logger");

    log4rs::init_config(log_config).expect("Failed to initialize console logger");
    Ok(())
}

/// Files written by the export pipeline
pub(crate) struct ExportedContract {
    /// Rendered contract formula
    pub(crate) ltlf_file: PathBuf,
    /// TLSF document handed to the synthesis engine
    pub(crate) tlsf_file: PathBuf,
}

/// Build the contract of the given model document and write the `.ltlf`
/// and `.tlsf` files into the output directory
///
/// The output directory is created if it does not exist. The written
/// files take their stem from the input file.
pub(crate) fn export_contract(
    input: ModelFileInput,
    output: &ExportOutput,
) -> Result<ExportedContract, anyhow::Error> {
    let document = fs::read_to_string(&input.input_file)
        .with_context(|| format!("Unable to read model file '{}'", input.input_file.display()))?;

    let model = parse_model(&document)
        .with_context(|| format!("Failed to parse model file '{}'", input.input_file.display()))?;

    info!(
        "Parsed model with {} environment and {} system activities",
        model.environment().count(),
        model.system().count()
    );

    let contract = build_contract(&model).with_context(|| "Failed to build contract")?;
    info!("Built assume-guarantee contract: {contract}");

    let stem = input
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            anyhow!(
                "Model file '{}' has no usable file name",
                input.input_file.display()
            )
        })?;

    let title = output
        .title
        .clone()
        .unwrap_or_else(|| format!("coDECLARE contract ({stem})"));
    let tlsf_document =
        export_tlsf(&contract, &model, title).with_context(|| "Failed to build TLSF document")?;

    fs::create_dir_all(&output.output_dir).with_context(|| {
        format!(
            "Failed to create output directory '{}'",
            output.output_dir.display()
        )
    })?;

    let ltlf_file = output.output_dir.join(format!("{stem}.ltlf"));
    let tlsf_file = output.output_dir.join(format!("{stem}.tlsf"));

    fs::write(&ltlf_file, contract.text()).with_context(|| "Failed to write LTLf file")?;
    fs::write(&tlsf_file, format!("{tlsf_document}\n"))
        .with_context(|| "Failed to write TLSF file")?;

    info!("Wrote contract formula to '{}'", ltlf_file.display());
    info!("Wrote TLSF document to '{}'", tlsf_file.display());

    Ok(ExportedContract {
        ltlf_file,
        tlsf_file,
    })
}
