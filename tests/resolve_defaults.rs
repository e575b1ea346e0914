use std::collections::BTreeMap;
use std::error::Error;

use directus_supervisor::config::{ExecMode, Instances, resolve};

type TestResult = Result<(), Box<dyn Error>>;

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn empty_environment_resolves_to_documented_defaults() -> TestResult {
    let spec = resolve(&BTreeMap::new())?;

    assert_eq!(spec.name, "directus");
    assert_eq!(spec.command, "npx");
    assert_eq!(spec.args, "directus start");
    assert_eq!(spec.instances, Instances::Max);
    assert_eq!(spec.exec_mode, ExecMode::Cluster);
    assert!(!spec.auto_restart);
    assert!(!spec.watch);
    assert_eq!(spec.max_memory_restart, "1G");
    assert_eq!(spec.env.node_env, "production");
    assert_eq!(spec.env.max_restarts, 10);
    assert_eq!(spec.env.restart_delay_ms, 3000);
    assert_eq!(spec.env.kill_timeout_ms, 3000);
    assert_eq!(spec.env.listen_timeout_ms, 10_000);

    Ok(())
}

#[test]
fn resolution_is_deterministic_and_idempotent() -> TestResult {
    let mapping = env(&[
        ("PM2_INSTANCES", "2"),
        ("PM2_MAX_RESTARTS", "7"),
        ("PM2_AUTO_RESTART", "true"),
    ]);

    let first = resolve(&mapping)?;
    let second = resolve(&mapping)?;
    assert_eq!(first, second);

    // The mapping itself is untouched by resolution.
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.get("PM2_INSTANCES").map(String::as_str), Some("2"));

    Ok(())
}

#[test]
fn overrides_apply_and_remaining_tunables_keep_defaults() -> TestResult {
    let mapping = env(&[
        ("PM2_INSTANCES", "4"),
        ("PM2_EXEC_MODE", "fork"),
        ("PM2_AUTO_RESTART", "true"),
        ("PM2_MAX_MEMORY_RESTART", "512M"),
        ("PM2_MAX_RESTARTS", "3"),
    ]);

    let spec = resolve(&mapping)?;

    assert_eq!(spec.instances, Instances::Count(4));
    assert_eq!(spec.exec_mode, ExecMode::Fork);
    assert!(spec.auto_restart);
    assert_eq!(spec.max_memory_restart, "512M");
    assert_eq!(spec.env.max_restarts, 3);

    // Untouched tunables stay at their defaults.
    assert_eq!(spec.env.restart_delay_ms, 3000);
    assert_eq!(spec.env.kill_timeout_ms, 3000);
    assert_eq!(spec.env.listen_timeout_ms, 10_000);

    Ok(())
}

#[test]
fn instances_max_keyword_and_explicit_count() -> TestResult {
    let spec = resolve(&env(&[("PM2_INSTANCES", "max")]))?;
    assert_eq!(spec.instances, Instances::Max);

    let spec = resolve(&env(&[("PM2_INSTANCES", "1")]))?;
    assert_eq!(spec.instances, Instances::Count(1));

    Ok(())
}

#[test]
fn unrelated_environment_keys_are_ignored() -> TestResult {
    let mapping = env(&[("PATH", "/usr/bin"), ("HOME", "/root"), ("PM2", "nope")]);
    let spec = resolve(&mapping)?;
    assert_eq!(spec.instances, Instances::Max);
    assert_eq!(spec.env.max_restarts, 10);
    Ok(())
}
