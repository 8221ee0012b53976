//! Rendering of synthesized strategies
//!
//! LydiaSyft emits the winning strategy as a Graphviz `.dot` file. This
//! module converts that file into a viewable format by invoking the
//! `dot` binary, which must be installed on the system.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use log::info;

/// Formats the strategy can be rendered to
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum RenderFormat {
    /// Render as PDF
    Pdf,
    /// Render as SVG
    Svg,
    /// Render as PNG
    Png,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
        }
    }

    fn dot_arg(self) -> &'static str {
        match self {
            RenderFormat::Pdf => "-Tpdf",
            RenderFormat::Svg => "-Tsvg",
            RenderFormat::Png => "-Tpng",
        }
    }
}

/// Render a strategy `.dot` file in the given format
///
/// The rendered file is placed next to the input file, with the
/// extension of the chosen format.
pub(crate) fn render_strategy(
    strategy_file: &Path,
    format: RenderFormat,
) -> Result<PathBuf, anyhow::Error> {
    if Command::new("dot")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .is_err()
    {
        return Err(anyhow!("Graphviz is not installed on the system"));
    }

    let output_file = strategy_file.with_extension(format.extension());

    let output = Command::new("dot")
        .arg(format.dot_arg())
        .arg("-o")
        .arg(&output_file)
        .arg(strategy_file)
        .output()
        .with_context(|| "Failed to execute graphviz")?;

    if !output.status.success() {
        return Err(anyhow!(
            "Graphviz failed to render the strategy: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    info!("Rendered strategy to '{}'", output_file.display());
    Ok(output_file)
}
