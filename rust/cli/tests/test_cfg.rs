use headsup_cli::run;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "HEADSUP_CONFIG",
    "HEADSUP_SEED",
    "HEADSUP_INITIAL_STACK",
    "HEADSUP_SMALL_BLIND",
    "HEADSUP_BIG_BLIND",
    "HEADSUP_OPPONENT",
];

fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

fn set_env(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

fn cfg() -> (i32, serde_json::Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["headsup", "cfg"], &mut out, &mut err);
    let json = if code == 0 {
        serde_json::from_slice(&out).unwrap()
    } else {
        serde_json::Value::Null
    };
    (code, json, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn defaults_are_reported_as_default() {
    clear_env();
    let (code, v, _) = cfg();
    assert_eq!(code, 0);
    assert_eq!(v["initial_stack"]["value"], 100);
    assert_eq!(v["small_blind"]["value"], 1);
    assert_eq!(v["big_blind"]["value"], 2);
    assert_eq!(v["opponent"]["value"], "baseline");
    assert!(v["seed"]["value"].is_null());
    for key in ["initial_stack", "small_blind", "big_blind", "seed", "opponent"] {
        assert_eq!(v[key]["source"], "default", "{key}");
    }
}

#[test]
#[serial]
fn env_overrides_are_tracked() {
    clear_env();
    set_env("HEADSUP_BIG_BLIND", "4");
    set_env("HEADSUP_SEED", "99");
    let (code, v, _) = cfg();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(v["big_blind"]["value"], 4);
    assert_eq!(v["big_blind"]["source"], "env");
    assert_eq!(v["seed"]["value"], 99);
    assert_eq!(v["seed"]["source"], "env");
    assert_eq!(v["small_blind"]["source"], "default");
}

#[test]
#[serial]
fn empty_env_values_are_ignored() {
    clear_env();
    set_env("HEADSUP_SEED", "");
    let (code, v, _) = cfg();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(v["seed"]["source"], "default");
}

#[test]
#[serial]
fn file_values_sit_between_defaults_and_env() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "initial_stack = 50").unwrap();
    writeln!(file, "big_blind = 4").unwrap();
    writeln!(file, "opponent = \"random\"").unwrap();
    set_env("HEADSUP_CONFIG", file.path().to_str().unwrap());
    set_env("HEADSUP_BIG_BLIND", "6");
    let (code, v, _) = cfg();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(v["initial_stack"]["value"], 50);
    assert_eq!(v["initial_stack"]["source"], "file");
    assert_eq!(v["opponent"]["value"], "random");
    assert_eq!(v["opponent"]["source"], "file");
    assert_eq!(v["big_blind"]["value"], 6);
    assert_eq!(v["big_blind"]["source"], "env");
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "level = 3").unwrap();
    set_env("HEADSUP_CONFIG", file.path().to_str().unwrap());
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.starts_with("Error: Configuration error: cannot parse config file"), "{err}");
}

#[test]
#[serial]
fn invalid_blinds_fail_with_exit_2() {
    clear_env();
    set_env("HEADSUP_SMALL_BLIND", "5");
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("big blind must be >= small blind"), "{err}");
}

#[test]
#[serial]
fn unparsable_env_value_fails() {
    clear_env();
    set_env("HEADSUP_INITIAL_STACK", "lots");
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("HEADSUP_INITIAL_STACK"), "{err}");
}

#[test]
#[serial]
fn configured_opponent_drives_sim() {
    clear_env();
    set_env("HEADSUP_OPPONENT", "random");
    set_env("HEADSUP_SEED", "8");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["headsup", "sim", "--hands", "3"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Seed: 8"));
    assert!(out.contains("Wins opponent (random)"));
}
