// src/config/model.rs

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// How many worker processes the supervisor should run.
///
/// Serializes the way PM2 expects it: the string `"max"` ("one worker per
/// available CPU core") or a plain positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instances {
    /// One worker per available CPU core.
    Max,
    /// A fixed worker count, always >= 1.
    Count(u32),
}

impl Serialize for Instances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Instances::Max => serializer.serialize_str("max"),
            Instances::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

/// PM2 execution mode.
///
/// - `Cluster`: workers share a single listening socket. Requires the target
///   application to support shared-socket workers; that capability is the
///   caller's responsibility and is not verified here.
/// - `Fork`: each worker runs as an independent, non-port-sharing process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    Cluster,
    Fork,
}

impl ExecMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecMode::Cluster => "cluster",
            ExecMode::Fork => "fork",
        }
    }
}

/// Environment variables injected into each worker process.
///
/// `node_env` is fixed to `"production"`; the remaining fields are the timing
/// and restart-cap tunables the supervisor reads back out of the worker
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerEnv {
    pub node_env: String,
    /// Cap on restart attempts before the supervisor gives up on a worker.
    pub max_restarts: u32,
    /// Delay between a worker exit and its restart.
    pub restart_delay_ms: u32,
    /// Grace period after the termination signal before a force-kill.
    pub kill_timeout_ms: u32,
    /// How long to wait for a worker's ready signal at startup.
    pub listen_timeout_ms: u32,
}

impl Serialize for WorkerEnv {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // PM2 wire names: uppercase, PM2_-prefixed.
        let mut s = serializer.serialize_struct("WorkerEnv", 5)?;
        s.serialize_field("NODE_ENV", &self.node_env)?;
        s.serialize_field("PM2_MAX_RESTARTS", &self.max_restarts)?;
        s.serialize_field("PM2_RESTART_DELAY", &self.restart_delay_ms)?;
        s.serialize_field("PM2_KILL_TIMEOUT", &self.kill_timeout_ms)?;
        s.serialize_field("PM2_LISTEN_TIMEOUT", &self.listen_timeout_ms)?;
        s.end()
    }
}

/// Immutable description of how one managed application instance should be
/// launched by the external supervisor.
///
/// Built once at startup by [`crate::config::resolve`], handed off by value,
/// and never mutated afterwards. It has no persisted form of its own; the
/// PM2-facing JSON rendering lives in [`crate::ecosystem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorSpec {
    /// Identifier for the managed process group; always non-empty.
    pub name: String,
    /// Launch command, passed to the OS process-start call.
    #[serde(rename = "script")]
    pub command: String,
    /// Argument string for the launch command.
    pub args: String,
    pub instances: Instances,
    pub exec_mode: ExecMode,
    #[serde(rename = "autorestart")]
    pub auto_restart: bool,
    /// File watching is always off; restarts are driven by exit/memory policy.
    pub watch: bool,
    /// Resident-memory threshold (e.g. `"1G"`) past which a worker is
    /// proactively restarted.
    pub max_memory_restart: String,
    pub env: WorkerEnv,
}
