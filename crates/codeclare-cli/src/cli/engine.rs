//! Invocation of the LydiaSyft synthesis engine
//!
//! LydiaSyft runs inside a Docker container. The pipeline ensures the
//! container is running, copies the TLSF document in, runs
//! `./bin/LydiaSyft -p synthesis -f <file>` and reads the verdict from
//! its output. For a realizable contract the synthesized strategy is
//! copied back to the host as a Graphviz `.dot` file.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, anyhow};
use log::{debug, info};

use crate::codeclare_config::EngineConfig;

/// Realizability verdict reported by the engine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum SynthesisVerdict {
    /// A winning strategy for the system exists
    Realizable,
    /// The environment can force a violation of the contract
    Unrealizable,
    /// The engine output contained no verdict
    Unknown,
}

impl Display for SynthesisVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisVerdict::Realizable => write!(f, "REALIZABLE"),
            SynthesisVerdict::Unrealizable => write!(f, "UNREALIZABLE"),
            SynthesisVerdict::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Result of a synthesis run
pub(crate) struct SynthesisOutcome {
    verdict: SynthesisVerdict,
    strategy_file: Option<PathBuf>,
}

impl SynthesisOutcome {
    pub(crate) fn verdict(&self) -> SynthesisVerdict {
        self.verdict
    }

    /// Strategy file on the host, present only for realizable contracts
    pub(crate) fn strategy_file(&self) -> Option<&Path> {
        self.strategy_file.as_deref()
    }
}

/// Run LydiaSyft synthesis on the given TLSF file
///
/// The strategy of a realizable contract is copied to
/// `<output_dir>/strategy.dot`.
pub(crate) fn run_synthesis(
    tlsf_file: &Path,
    output_dir: &Path,
    cfg: &EngineConfig,
) -> Result<SynthesisOutcome, anyhow::Error> {
    ensure_container_running(&cfg.container)?;

    let tlsf_abs = tlsf_file
        .canonicalize()
        .with_context(|| format!("Failed to resolve TLSF file '{}'", tlsf_file.display()))?;
    let tlsf_path = tlsf_abs
        .to_str()
        .ok_or_else(|| anyhow!("TLSF file path '{}' is not valid UTF-8", tlsf_abs.display()))?;
    let tlsf_name = tlsf_abs
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("TLSF file '{}' has no usable file name", tlsf_abs.display()))?;
    let container_tlsf = format!("{}/{}", cfg.outputs_dir, tlsf_name);

    // Ensure the outputs directory exists inside the container
    run_docker(
        [
            "exec",
            cfg.container.as_str(),
            "mkdir",
            "-p",
            cfg.outputs_dir.as_str(),
        ],
        "Failed to create outputs directory in container",
    )?;

    let copy_target = format!("{}:{}", cfg.container, container_tlsf);
    run_docker(
        ["cp", tlsf_path, copy_target.as_str()],
        "Failed to copy TLSF file into container",
    )?;

    info!("Running LydiaSyft synthesis in container '{}'", cfg.container);
    let synthesis_cmd = format!(
        "cd {} && ./bin/LydiaSyft -p synthesis -f {}",
        cfg.build_dir, container_tlsf
    );
    let output = Command::new("docker")
        .args([
            "exec",
            cfg.container.as_str(),
            "bash",
            "-c",
            synthesis_cmd.as_str(),
        ])
        .output()
        .with_context(|| "Failed to invoke docker")?;

    if !output.status.success() {
        return Err(anyhow!(
            "LydiaSyft synthesis failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!("LydiaSyft output: {stdout}");
    let verdict = parse_verdict(&stdout);

    let mut strategy_file = None;
    if verdict == SynthesisVerdict::Realizable {
        let host_strategy = output_dir.join("strategy.dot");
        let host_strategy_path = host_strategy.to_str().ok_or_else(|| {
            anyhow!(
                "Output path '{}' is not valid UTF-8",
                host_strategy.display()
            )
        })?;
        let copy_source = format!("{}:{}", cfg.container, cfg.strategy_path);
        run_docker(
            ["cp", copy_source.as_str(), host_strategy_path],
            "Failed to copy strategy out of container",
        )?;

        if !host_strategy.exists() {
            return Err(anyhow!("No strategy file produced by LydiaSyft"));
        }
        info!("Copied strategy to '{}'", host_strategy.display());
        strategy_file = Some(host_strategy);
    }

    Ok(SynthesisOutcome {
        verdict,
        strategy_file,
    })
}

/// Ensure the engine container exists and is running, starting it if needed
fn ensure_container_running(container: &str) -> Result<(), anyhow::Error> {
    let output = Command::new("docker")
        .args(["inspect", "-f", "{{.State.Running}}", container])
        .output()
        .with_context(|| "Failed to invoke docker")?;

    if !output.status.success() {
        return Err(anyhow!(
            "Engine container '{container}' does not exist: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    if !String::from_utf8_lossy(&output.stdout).contains("true") {
        info!("Starting engine container '{container}'");
        run_docker(["start", container], "Failed to start engine container")?;
    }

    Ok(())
}

/// Run a docker command, failing on a non-zero exit status
fn run_docker<'a>(
    args: impl IntoIterator<Item = &'a str>,
    error_msg: &'static str,
) -> Result<(), anyhow::Error> {
    let output = Command::new("docker")
        .args(args)
        .output()
        .with_context(|| "Failed to invoke docker")?;

    if !output.status.success() {
        return Err(anyhow!(
            "{error_msg} ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    Ok(())
}

/// Read the realizability verdict out of the engine output
///
/// `UNREALIZABLE` must be checked first since it contains `REALIZABLE`
/// as a substring.
fn parse_verdict(stdout: &str) -> SynthesisVerdict {
    if stdout.contains("UNREALIZABLE") {
        return SynthesisVerdict::Unrealizable;
    }
    if stdout.contains("REALIZABLE") {
        return SynthesisVerdict::Realizable;
    }
    SynthesisVerdict::Unknown
}
