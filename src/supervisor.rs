// src/supervisor.rs

//! Handoff to the external PM2 supervisor.
//!
//! This crate does not manage worker processes itself; clustering, restart
//! backoff, memory sampling, and signal handling all live inside PM2. The
//! only job here is to spawn `pm2 start <ecosystem file>` with the resolved
//! spec and relay its output through `tracing`.

use std::path::Path;
use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::SupervisorSpec;
use crate::ecosystem;

/// Options for the PM2 handoff.
#[derive(Debug, Clone)]
pub struct HandoffOptions {
    /// PM2 binary to invoke; usually just `"pm2"` on PATH.
    pub pm2_bin: String,
}

impl Default for HandoffOptions {
    fn default() -> Self {
        Self {
            pm2_bin: "pm2".to_string(),
        }
    }
}

/// Write the ecosystem file for `spec` into a temp directory and hand it to
/// PM2, waiting for the `pm2 start` invocation to finish.
///
/// Runs PM2 with `--no-daemon` so the supervisor stays in the foreground and
/// its logs flow through ours. Fails if PM2 cannot be spawned or exits
/// non-zero.
pub async fn start(spec: &SupervisorSpec, opts: &HandoffOptions) -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir for ecosystem file")?;
    let path = dir.path().join("ecosystem.json");
    ecosystem::write_file(spec, &path)?;
    start_with_file(spec, opts, &path).await
}

/// Hand an already-written ecosystem file to PM2.
pub async fn start_with_file(
    spec: &SupervisorSpec,
    opts: &HandoffOptions,
    path: &Path,
) -> Result<()> {
    info!(
        app = %spec.name,
        instances = ?spec.instances,
        exec_mode = spec.exec_mode.as_str(),
        "handing spec to pm2"
    );

    let mut cmd = Command::new(&opts.pm2_bin);
    cmd.arg("start")
        .arg(path)
        .arg("--no-daemon")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning supervisor '{}'", opts.pm2_bin))?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(source = "pm2", "{}", line);
            }
        });
    }

    // Always consume stderr so buffers don't fill.
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(source = "pm2", "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for supervisor '{}'", opts.pm2_bin))?;

    let code = status.code().unwrap_or(-1);
    info!(exit_code = code, success = status.success(), "pm2 exited");

    if !status.success() {
        return Err(anyhow!(
            "supervisor '{}' exited with code {}",
            opts.pm2_bin,
            code
        ));
    }
    Ok(())
}
