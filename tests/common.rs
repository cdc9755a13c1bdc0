#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// `ecopot` with HOME pointed at a per-test directory, so the user's real
/// configuration is never read or written.
pub fn eco(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("ecopot");
    cmd.env("HOME", home).env_remove("EDITOR").env_remove("VISUAL");
    cmd
}

/// Create a clean home directory for one test.
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ecopot_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ecopot.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh home + initialized database for one test.
pub fn init_env(name: &str) -> (String, String) {
    let home = setup_home(name);
    let db = setup_test_db(name);

    eco(&home)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();

    (home, db)
}

/// Add a plant through the CLI.
pub fn add_plant(home: &str, db: &str, name: &str, frequency: &str) {
    eco(home)
        .args(["--db", db, "add", "--name", name, "--frequency", frequency])
        .assert()
        .success();
}
