// src/config/mod.rs

//! Configuration resolution for directus-supervisor.
//!
//! Responsibilities:
//! - Define the immutable launch description (`model.rs`).
//! - Resolve it from `PM2_*` environment variables with documented defaults
//!   and strict validation (`resolver.rs`).

pub mod model;
pub mod resolver;

pub use model::{ExecMode, Instances, SupervisorSpec, WorkerEnv};
pub use resolver::{process_env, resolve};
