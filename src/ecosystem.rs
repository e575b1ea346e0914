// src/ecosystem.rs

//! Rendering of a [`SupervisorSpec`] into a PM2 ecosystem document.
//!
//! PM2's `start` entry point consumes a JSON file shaped like
//! `{"apps": [{...}]}`; this module produces that document so the resolved
//! spec can be handed to the external supervisor as-is.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::SupervisorSpec;

/// The document PM2 consumes: a list of app descriptions.
///
/// We only ever manage a single app, but the wire shape keeps the list.
#[derive(Debug, Serialize)]
pub struct EcosystemFile<'a> {
    pub apps: Vec<&'a SupervisorSpec>,
}

/// Render the spec as a pretty-printed ecosystem JSON string.
pub fn render(spec: &SupervisorSpec) -> Result<String> {
    let doc = EcosystemFile { apps: vec![spec] };
    serde_json::to_string_pretty(&doc).context("serializing ecosystem document")
}

/// Render the spec and write it to `path`.
pub fn write_file(spec: &SupervisorSpec, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = render(spec)?;
    fs::write(path, json).with_context(|| format!("writing ecosystem file to {:?}", path))?;
    Ok(())
}
