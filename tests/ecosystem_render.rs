use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

use directus_supervisor::config::resolve;
use directus_supervisor::ecosystem;
use serde_json::Value;

type TestResult = Result<(), Box<dyn Error>>;

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn default_spec_renders_pm2_field_names() -> TestResult {
    let spec = resolve(&BTreeMap::new())?;
    let json: Value = serde_json::from_str(&ecosystem::render(&spec)?)?;

    let apps = json["apps"].as_array().ok_or("apps should be an array")?;
    assert_eq!(apps.len(), 1);
    let app = &apps[0];

    assert_eq!(app["name"], "directus");
    assert_eq!(app["script"], "npx");
    assert_eq!(app["args"], "directus start");
    assert_eq!(app["instances"], "max");
    assert_eq!(app["exec_mode"], "cluster");
    assert_eq!(app["autorestart"], false);
    assert_eq!(app["watch"], false);
    assert_eq!(app["max_memory_restart"], "1G");

    assert_eq!(app["env"]["NODE_ENV"], "production");
    assert_eq!(app["env"]["PM2_MAX_RESTARTS"], 10);
    assert_eq!(app["env"]["PM2_RESTART_DELAY"], 3000);
    assert_eq!(app["env"]["PM2_KILL_TIMEOUT"], 3000);
    assert_eq!(app["env"]["PM2_LISTEN_TIMEOUT"], 10000);

    Ok(())
}

#[test]
fn numeric_instances_render_as_json_number() -> TestResult {
    let spec = resolve(&env(&[
        ("PM2_INSTANCES", "4"),
        ("PM2_EXEC_MODE", "fork"),
        ("PM2_AUTO_RESTART", "true"),
    ]))?;
    let json: Value = serde_json::from_str(&ecosystem::render(&spec)?)?;
    let app = &json["apps"][0];

    assert_eq!(app["instances"], 4);
    assert_eq!(app["exec_mode"], "fork");
    assert_eq!(app["autorestart"], true);

    Ok(())
}

#[test]
fn write_file_produces_parseable_document() -> TestResult {
    let spec = resolve(&env(&[("PM2_MAX_MEMORY_RESTART", "512M")]))?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ecosystem.json");
    ecosystem::write_file(&spec, &path)?;

    let json: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(json["apps"][0]["max_memory_restart"], "512M");

    Ok(())
}
