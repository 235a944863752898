use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn loanboard(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("loanboard").unwrap();
    cmd.env("LOANBOARD_HOME", home).env_remove("LOANBOARD_LOG");
    cmd
}

fn add(home: &Path, name: &str) {
    loanboard(home)
        .args(["add", "--name", name])
        .args(["--image", "https://img.example/x.jpg"])
        .args(["--link", "https://example.com"])
        .assert()
        .success();
}

fn stored_names(home: &Path) -> Vec<String> {
    let raw = std::fs::read_to_string(home.join("products.json")).unwrap();
    let products: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    products
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_empty_catalog_lists_hint() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No products yet"));
}

#[test]
fn test_add_persists_and_lists() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .args(["add", "--name", "Cayvang", "--image", "i", "--link", "l"])
        .args(["--amount", "3", "--procedure", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product saved (1): Cayvang"))
        .stdout(predicate::str::contains("1-5 Tỷ"));

    let raw = std::fs::read_to_string(temp.path().join("products.json")).unwrap();
    assert!(raw.contains("\"procedure\": \"CMND\""));
    assert!(raw.contains("\"unit\": \"Tỷ\""));

    loanboard(temp.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Cayvang"));
}

#[test]
fn test_add_without_required_fields_fails() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "First");

    loanboard(temp.path())
        .args(["add", "--name", "Second", "--image", "i", "--link", "   "])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("required"));

    assert_eq!(stored_names(temp.path()), vec!["First"]);
}

#[test]
fn test_out_of_range_preset_pick_fails() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .args(["add", "--name", "A", "--image", "i", "--link", "l", "--age", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Age preset 9"));
    assert!(!temp.path().join("products.json").exists());
}

#[test]
fn test_edit_keeps_position_and_unspecified_fields() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "A");
    add(temp.path(), "B");

    loanboard(temp.path())
        .args(["edit", "1", "--name", "A2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product updated (1): A2"));

    assert_eq!(stored_names(temp.path()), vec!["A2", "B"]);
    let raw = std::fs::read_to_string(temp.path().join("products.json")).unwrap();
    assert!(raw.contains("https://img.example/x.jpg"));
}

#[test]
fn test_move_and_boundaries() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "A");
    add(temp.path(), "B");
    add(temp.path(), "C");

    loanboard(temp.path())
        .args(["mv", "3", "up"])
        .assert()
        .success();
    assert_eq!(stored_names(temp.path()), vec!["A", "C", "B"]);

    loanboard(temp.path())
        .args(["move", "1", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already at the top"));
    assert_eq!(stored_names(temp.path()), vec!["A", "C", "B"]);
}

#[test]
fn test_delete_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "A");
    add(temp.path(), "B");

    loanboard(temp.path())
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete cancelled."));
    assert_eq!(stored_names(temp.path()), vec!["A", "B"]);

    loanboard(temp.path())
        .args(["rm", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product deleted: A"));
    assert_eq!(stored_names(temp.path()), vec!["B"]);

    loanboard(temp.path())
        .args(["rm", "1", "--yes"])
        .assert()
        .success();
    assert!(stored_names(temp.path()).is_empty());
}

#[test]
fn test_unknown_index_fails() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .args(["show", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product 4"));
}

#[test]
fn test_show_marks_selected_presets() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .args(["add", "--name", "Cayvang", "--image", "i", "--link", "l"])
        .args(["--period", "2"])
        .assert()
        .success();

    loanboard(temp.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Cayvang"))
        .stdout(predicate::str::contains("6 tháng"));
}

#[test]
fn test_one_shot_preset_commands() {
    let temp = TempDir::new().unwrap();

    loanboard(temp.path())
        .args(["presets", "add", "age"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mới"));

    loanboard(temp.path())
        .args(["presets", "set", "age", "5", "30-70"])
        .assert()
        .success();

    loanboard(temp.path())
        .args(["presets", "set", "amount", "1", "Tỷ", "--field", "unit"])
        .assert()
        .success();

    loanboard(temp.path())
        .args(["presets", "rm", "discount", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed discount preset 1: 0% lãi"));

    let raw = std::fs::read_to_string(temp.path().join("presets.json")).unwrap();
    assert!(raw.contains("30-70"));
    assert!(!raw.contains("0% lãi"));

    loanboard(temp.path())
        .args(["presets", "set", "age", "1", "x", "--field", "value"])
        .assert()
        .failure();
}

#[test]
fn test_preset_manager_save_and_quit() {
    let temp = TempDir::new().unwrap();

    loanboard(temp.path())
        .args(["presets", "edit"])
        .write_stdin("add period\nset period 4 24 tháng\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preset changes discarded."));
    assert!(!temp.path().join("presets.json").exists());

    loanboard(temp.path())
        .args(["presets", "edit"])
        .write_stdin("add period\nset period 4 24 tháng\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Presets saved."));
    let raw = std::fs::read_to_string(temp.path().join("presets.json")).unwrap();
    assert!(raw.contains("24 tháng"));
}

#[test]
fn test_settings_round_trip() {
    let temp = TempDir::new().unwrap();

    loanboard(temp.path())
        .args(["settings", "token", "ghp_verysecret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cret"))
        .stdout(predicate::str::contains("ghp_").not());

    loanboard(temp.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("file-name"))
        .stdout(predicate::str::contains("zalocash"));

    loanboard(temp.path())
        .args(["settings", "file-name", ""])
        .assert()
        .failure();

    loanboard(temp.path())
        .args(["settings", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_status_and_push_without_remote() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "A");

    loanboard(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured"))
        .stdout(predicate::str::contains("idle"));

    loanboard(temp.path())
        .arg("push")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn test_invalid_remote_address_does_not_block_edits() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .args(["settings", "api-url", "https://example.com/not-a-gist"])
        .assert()
        .success();
    loanboard(temp.path())
        .args(["settings", "token", "tok"])
        .assert()
        .success();

    add(temp.path(), "A");
    assert_eq!(stored_names(temp.path()), vec!["A"]);

    loanboard(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("Invalid remote URL"));
}

#[test]
fn test_storefront_falls_back_to_sample() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("index.html");

    loanboard(temp.path())
        .args(["storefront", "--url", "http://127.0.0.1:9/catalog.json"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("class=\"item\"").count(), 1);
    assert!(html.contains("Cayvang"));
}

#[test]
fn test_storefront_needs_url() {
    let temp = TempDir::new().unwrap();
    loanboard(temp.path())
        .arg("storefront")
        .assert()
        .failure()
        .stderr(predicate::str::contains("storefront-url"));
}
