// src/config/resolver.rs

use std::collections::BTreeMap;

use crate::config::model::{ExecMode, Instances, SupervisorSpec, WorkerEnv};
use crate::errors::ConfigError;

/// Name of the managed process group.
pub const APP_NAME: &str = "directus";
/// Launch command and argument string handed to the OS process-start call.
pub const APP_COMMAND: &str = "npx";
pub const APP_ARGS: &str = "directus start";

/// Environment keys for every tunable, in one place.
pub mod keys {
    pub const INSTANCES: &str = "PM2_INSTANCES";
    pub const EXEC_MODE: &str = "PM2_EXEC_MODE";
    pub const AUTO_RESTART: &str = "PM2_AUTO_RESTART";
    pub const MAX_MEMORY_RESTART: &str = "PM2_MAX_MEMORY_RESTART";
    pub const MAX_RESTARTS: &str = "PM2_MAX_RESTARTS";
    pub const RESTART_DELAY: &str = "PM2_RESTART_DELAY";
    pub const KILL_TIMEOUT: &str = "PM2_KILL_TIMEOUT";
    pub const LISTEN_TIMEOUT: &str = "PM2_LISTEN_TIMEOUT";
}

/// Documented defaults, applied when the corresponding key is absent.
pub mod defaults {
    pub const MAX_MEMORY_RESTART: &str = "1G";
    pub const MAX_RESTARTS: u32 = 10;
    pub const RESTART_DELAY_MS: u32 = 3000;
    pub const KILL_TIMEOUT_MS: u32 = 3000;
    pub const LISTEN_TIMEOUT_MS: u32 = 10_000;
}

/// Snapshot the ambient process environment into an explicit mapping.
///
/// This is the only place the crate touches `std::env`; everything below it
/// takes the mapping as an argument so [`resolve`] stays pure and testable.
pub fn process_env() -> BTreeMap<String, String> {
    std::env::vars().collect()
}

/// Resolve a [`SupervisorSpec`] from an environment mapping.
///
/// Every tunable is looked up by its `PM2_*` key; absent keys fall back to
/// the documented default. Present values are validated: integer tunables
/// must parse as strict base-10 non-negative integers, `PM2_EXEC_MODE` must
/// be `"cluster"` or `"fork"`. There are no partial results; the caller gets
/// either a fully valid spec or the first [`ConfigError`].
///
/// Deterministic and side-effect free: the same mapping always yields the
/// same spec (or the same error).
pub fn resolve(env: &BTreeMap<String, String>) -> Result<SupervisorSpec, ConfigError> {
    let instances = match raw(env, keys::INSTANCES) {
        None => Instances::Max,
        Some("max") => Instances::Max,
        Some(value) => Instances::Count(positive_int(keys::INSTANCES, value)?),
    };

    let exec_mode = match raw(env, keys::EXEC_MODE) {
        None => ExecMode::Cluster,
        Some("cluster") => ExecMode::Cluster,
        Some("fork") => ExecMode::Fork,
        Some(value) => {
            return Err(ConfigError::InvalidExecMode {
                value: value.to_string(),
            });
        }
    };

    // Deliberately lenient: only the exact string "true" enables restarts.
    // "TRUE", "1", or an empty value all mean false, never an error.
    let auto_restart = raw(env, keys::AUTO_RESTART) == Some("true");

    let max_memory_restart = raw(env, keys::MAX_MEMORY_RESTART)
        .unwrap_or(defaults::MAX_MEMORY_RESTART)
        .to_string();

    let env_block = WorkerEnv {
        node_env: "production".to_string(),
        max_restarts: int_tunable(env, keys::MAX_RESTARTS, defaults::MAX_RESTARTS)?,
        restart_delay_ms: int_tunable(env, keys::RESTART_DELAY, defaults::RESTART_DELAY_MS)?,
        kill_timeout_ms: int_tunable(env, keys::KILL_TIMEOUT, defaults::KILL_TIMEOUT_MS)?,
        listen_timeout_ms: int_tunable(env, keys::LISTEN_TIMEOUT, defaults::LISTEN_TIMEOUT_MS)?,
    };

    Ok(SupervisorSpec {
        name: APP_NAME.to_string(),
        command: APP_COMMAND.to_string(),
        args: APP_ARGS.to_string(),
        instances,
        exec_mode,
        auto_restart,
        watch: false,
        max_memory_restart,
        env: env_block,
    })
}

fn raw<'a>(env: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str)
}

/// Strict base-10 non-negative parse for an integer tunable.
///
/// A missing key takes the default; a present but malformed value (including
/// negatives) is a hard error, since a bad numeric tunable means the
/// deployment is misconfigured and nothing should be started.
fn int_tunable(
    env: &BTreeMap<String, String>,
    key: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    match raw(env, key) {
        None => Ok(default),
        Some(value) => parse_u32(key, value),
    }
}

/// Like [`parse_u32`] but additionally rejects zero, for `PM2_INSTANCES`.
fn positive_int(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    let n = parse_u32(key, value)?;
    if n == 0 {
        return Err(ConfigError::InvalidInteger {
            key,
            value: value.to_string(),
        });
    }
    Ok(n)
}

fn parse_u32(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidInteger {
            key,
            value: value.to_string(),
        })
}
