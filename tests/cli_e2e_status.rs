//! End-to-end tests for the `muxplug status` command.

mod common;
use common::prelude::*;

fn status_json(fixture: &TestFixture) -> serde_json::Value {
    let output = fixture
        .command()
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_status_json_reports_decision() {
    let fixture = TestFixture::new()
        .with_plugins(&["tmux-plugins/tmux-yank", "tmux-plugins/tmux-sensible#v3"])
        .with_installed("tmux-yank")
        .with_installed("tmux-stale");

    let value = status_json(&fixture);

    assert_eq!(
        value["to_install"],
        serde_json::json!(["tmux-plugins/tmux-sensible#v3"])
    );

    let to_update = value["to_update"].as_array().unwrap();
    assert_eq!(to_update.len(), 1);
    assert!(to_update[0].as_str().unwrap().ends_with("tmux-yank"));

    let to_remove = value["to_remove"].as_array().unwrap();
    assert_eq!(to_remove.len(), 1);
    assert!(to_remove[0].as_str().unwrap().ends_with("tmux-stale"));
}

#[test]
fn test_status_has_no_side_effects() {
    let fixture = TestFixture::new()
        .with_plugins(&["a/b"])
        .with_installed("stale");

    fixture.command().arg("status").assert().success();

    assert!(fixture.plugin("stale").is_dir());
    assert!(!fixture.plugin("b").exists());
}

#[test]
fn test_status_human_output_uses_markers() {
    let fixture = TestFixture::new()
        .with_plugins(&["a/new", "a/kept"])
        .with_installed("kept")
        .with_installed("stale");

    fixture
        .command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ a/new"))
        .stdout(predicate::str::contains("~ "))
        .stdout(predicate::str::contains("- "))
        .stdout(predicate::str::contains("stale"));
}

#[test]
fn test_status_in_sync() {
    let fixture = TestFixture::new()
        .with_plugins(&["a/b"])
        .with_installed("b");

    fixture
        .command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugins are in sync."));
}

#[test]
fn test_status_without_declarations_lists_everything_for_removal() {
    let fixture = TestFixture::new()
        .with_config("# no plugins\n")
        .with_installed("one")
        .with_installed("two");

    let value = status_json(&fixture);

    assert_eq!(value["to_install"], serde_json::json!([]));
    assert_eq!(value["to_remove"].as_array().unwrap().len(), 2);
}

#[test]
fn test_status_reads_dotfile_config() {
    let fixture = TestFixture::new();
    std::fs::write(
        fixture.path().join(".tmux.conf"),
        "set -g @plugin 'tmux-plugins/tpm'\n",
    )
    .unwrap();
    std::fs::create_dir_all(fixture.path().join(".tmux/plugins/stale")).unwrap();

    let output = fixture
        .command()
        .env_remove("XDG_CONFIG_HOME")
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["to_install"], serde_json::json!(["tmux-plugins/tpm"]));
    let to_remove = value["to_remove"].as_array().unwrap();
    assert!(to_remove[0]
        .as_str()
        .unwrap()
        .ends_with(".tmux/plugins/stale"));
}
