// src/lib.rs

pub mod cli;
pub mod config;
pub mod ecosystem;
pub mod errors;
pub mod logging;
pub mod supervisor;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::SupervisorSpec;
use crate::supervisor::HandoffOptions;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - environment snapshot + spec resolution
/// - dry-run / emit short-circuits
/// - the PM2 handoff
pub async fn run(args: CliArgs) -> Result<()> {
    // The environment is read exactly once, here at the boundary; resolution
    // itself only ever sees the explicit mapping.
    let env = config::process_env();
    let spec = config::resolve(&env)?;

    if args.dry_run {
        print_dry_run(&spec)?;
        return Ok(());
    }

    if let Some(path) = args.emit {
        ecosystem::write_file(&spec, &path)?;
        info!(path = %path, "ecosystem file written");
        return Ok(());
    }

    let opts = HandoffOptions {
        pm2_bin: args.pm2_bin,
    };
    supervisor::start(&spec, &opts).await
}

/// Simple dry-run output: print the resolved spec and the rendered document.
fn print_dry_run(spec: &SupervisorSpec) -> Result<()> {
    println!("directus-supervisor dry-run");
    println!("  name: {}", spec.name);
    println!("  command: {} {}", spec.command, spec.args);
    println!("  instances: {:?}", spec.instances);
    println!("  exec_mode: {}", spec.exec_mode.as_str());
    println!("  autorestart: {}", spec.auto_restart);
    println!("  max_memory_restart: {}", spec.max_memory_restart);
    println!("  max_restarts: {}", spec.env.max_restarts);
    println!("  restart_delay_ms: {}", spec.env.restart_delay_ms);
    println!("  kill_timeout_ms: {}", spec.env.kill_timeout_ms);
    println!("  listen_timeout_ms: {}", spec.env.listen_timeout_ms);
    println!();
    println!("{}", ecosystem::render(spec)?);
    Ok(())
}
