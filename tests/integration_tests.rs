//! Integration tests for the feedbackhub CLI
//!
//! These run the real binary against a temporary project directory.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use feedbackhub::roadmap::db::RoadmapDb;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "FEEDBACKHUB_HOST",
    "FEEDBACKHUB_PORT",
    "FEEDBACKHUB_DB_PATH",
    "FEEDBACKHUB_LOG",
    "FEEDBACKHUB_LOG_JSON",
    "RUST_LOG",
];

/// Helper to create a feedbackhub Command isolated from the caller's env
fn hub(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("feedbackhub");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--project-dir").arg(dir.path());
    cmd
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join(".feedbackhub").join("hub.db")
}

/// Creates an org with the default statuses plus one post in "planned".
fn seed_org_with_post(dir: &TempDir) -> i64 {
    fs::create_dir_all(dir.path().join(".feedbackhub")).unwrap();
    let db = RoadmapDb::new(&db_path(dir)).unwrap();
    let org = db.create_organization("Acme").unwrap();
    let board = db.create_board(org.id, "Ideas").unwrap();
    db.create_post(org.id, board.id, "Dark mode", Some("planned"))
        .unwrap();
    org.id
}

fn status_id(dir: &TempDir, org_id: i64, key: &str) -> i64 {
    let db = RoadmapDb::new(&db_path(dir)).unwrap();
    db.list_statuses(org_id)
        .unwrap()
        .into_iter()
        .find(|s| s.key == key)
        .unwrap()
        .id
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("serve"))
            .stdout(predicate::str::contains("statuses"));
    }

    #[test]
    fn test_version() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("feedbackhub"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let dir = TempDir::new().unwrap();
        hub(&dir).arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Database and organization commands
// =============================================================================

mod database {
    use super::*;

    #[test]
    fn test_init_creates_database() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Roadmap database initialized"));
        assert!(db_path(&dir).exists());
    }

    #[test]
    fn test_init_honors_db_path_flag() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("data").join("custom.db");
        hub(&dir)
            .args(["init", "--db-path"])
            .arg(&custom)
            .assert()
            .success();
        assert!(custom.exists());
    }

    #[test]
    fn test_org_create_seeds_default_statuses() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .args(["org", "create", "Acme"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created organization 1 (Acme)"))
            .stdout(predicate::str::contains("in_progress"));

        hub(&dir)
            .args(["statuses", "list", "--org", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("open"))
            .stdout(predicate::str::contains("planned"))
            .stdout(predicate::str::contains("completed"))
            .stdout(predicate::str::contains("(system)"));
    }

    #[test]
    fn test_org_list() {
        let dir = TempDir::new().unwrap();
        hub(&dir).args(["org", "list"]).assert().success().stdout(predicate::str::contains("No organizations."));
        hub(&dir).args(["org", "create", "Acme"]).assert().success();
        hub(&dir)
            .args(["org", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Acme"));
    }

    #[test]
    fn test_statuses_list_unknown_org_fails() {
        let dir = TempDir::new().unwrap();
        hub(&dir).arg("init").assert().success();
        hub(&dir)
            .args(["statuses", "list", "--org", "42"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("42"));
    }
}

// =============================================================================
// Status deletion protocol
// =============================================================================

mod status_delete {
    use super::*;

    #[test]
    fn test_delete_unused_status_removes_it() {
        let dir = TempDir::new().unwrap();
        let org = seed_org_with_post(&dir);
        let id = status_id(&dir, org, "completed");

        hub(&dir)
            .args(["statuses", "delete", "--org", &org.to_string(), &id.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Deleted status {}.", id)));

        hub(&dir)
            .args(["statuses", "list", "--org", &org.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("completed").not());
    }

    #[test]
    fn test_delete_used_status_without_target_reports_posts() {
        let dir = TempDir::new().unwrap();
        let org = seed_org_with_post(&dir);
        let id = status_id(&dir, org, "planned");

        hub(&dir)
            .args(["statuses", "delete", "--org", &org.to_string(), &id.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("still holds 1 post(s)"))
            .stdout(predicate::str::contains("--reassign-to"))
            .stdout(predicate::str::contains("open"));

        // Probe leaves everything in place.
        let db = RoadmapDb::new(&db_path(&dir)).unwrap();
        assert_eq!(db.count_posts_with_status(org, "planned").unwrap(), 1);
    }

    #[test]
    fn test_delete_with_reassignment_moves_posts() {
        let dir = TempDir::new().unwrap();
        let org = seed_org_with_post(&dir);
        let id = status_id(&dir, org, "planned");

        hub(&dir)
            .args(["statuses", "delete", "--org", &org.to_string(), &id.to_string()])
            .args(["--reassign-to", "in_progress"])
            .assert()
            .success()
            .stdout(predicate::str::contains("moved 1 post(s)"));

        let db = RoadmapDb::new(&db_path(&dir)).unwrap();
        assert_eq!(db.count_posts_with_status(org, "in_progress").unwrap(), 1);
        assert!(db.list_statuses(org).unwrap().iter().all(|s| s.key != "planned"));
    }

    #[test]
    fn test_delete_with_self_target_fails() {
        let dir = TempDir::new().unwrap();
        let org = seed_org_with_post(&dir);
        let id = status_id(&dir, org, "planned");

        hub(&dir)
            .args(["statuses", "delete", "--org", &org.to_string(), &id.to_string()])
            .args(["--reassign-to", "planned"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid reassignment target"));
    }
}

// =============================================================================
// Configuration commands
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No hub.toml found"))
            .stdout(predicate::str::contains("port = 3142"));
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));
        assert!(dir.path().join(".feedbackhub/hub.toml").exists());

        hub(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Config file:"));
    }

    #[test]
    fn test_config_env_override_is_shown() {
        let dir = TempDir::new().unwrap();
        hub(&dir)
            .env("FEEDBACKHUB_PORT", "9999")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("port = 9999"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".feedbackhub")).unwrap();
        fs::write(
            dir.path().join(".feedbackhub/hub.toml"),
            "[logging]\nlevel = \"shouting\"\n",
        )
        .unwrap();

        hub(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("shouting"));
    }

    #[test]
    fn test_config_validate_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".feedbackhub")).unwrap();
        fs::write(dir.path().join(".feedbackhub/hub.toml"), "[server\nport = ").unwrap();

        hub(&dir)
            .args(["config", "validate"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("hub.toml"));
    }
}
