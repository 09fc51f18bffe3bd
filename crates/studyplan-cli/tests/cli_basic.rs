//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a temporary config directory and
//! settings document, and verify outputs.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn settings(&self) -> PathBuf {
        self.dir.path().join("study_settings.json")
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_studyplan"))
            .env("STUDYPLAN_CONFIG_DIR", self.config_dir())
            .env_remove("STUDYPLAN_LOG")
            .arg("--file")
            .arg(self.settings())
            .args(args)
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    fn write_settings(&self, content: &str) {
        std::fs::write(self.settings(), content).unwrap();
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

const MONDAY_MORNING: &str = r#"{
    "subjects": [{"name": "Math", "difficulty": 3, "priority": 1, "goal_hours": 0}],
    "available_time": {"Monday": [{"start": "09:00", "end": "12:00"}]},
    "settings": {"break_minutes": 10, "min_session_minutes": 30,
                 "max_session_minutes": 120, "pomodoro_mode": false}
}"#;

#[test]
fn test_init_writes_defaults() {
    let env = Env::new();
    let (_, stderr, code) = env.run(&["init"]);
    assert_eq!(code, 0, "init failed: {stderr}");

    let doc: serde_json::Value = serde_json::from_str(&read(&env.settings())).unwrap();
    assert_eq!(doc["settings"]["break_minutes"], 10);
    assert_eq!(doc["available_time"]["Sunday"][0]["start"], "09:00");
    assert!(doc["subjects"].as_array().unwrap().is_empty());
}

#[test]
fn test_init_refuses_overwrite() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (_, stderr, code) = env.run(&["init"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already exists"));
    assert_eq!(read(&env.settings()), MONDAY_MORNING);

    let (_, _, code) = env.run(&["init", "--force"]);
    assert_eq!(code, 0);
}

#[test]
fn test_subject_add_and_list() {
    let env = Env::new();
    let (stdout, _, code) = env.run(&["subject", "add", "Math", "--difficulty", "4", "--priority", "2"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Subject added: Math"));

    let (stdout, _, code) = env.run(&["subject", "list", "--json"]);
    assert_eq!(code, 0);
    let subjects: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(subjects[0]["name"], "Math");
    assert_eq!(subjects[0]["difficulty"], 4);
    assert_eq!(subjects[0]["priority"], 2);
}

#[test]
fn test_subject_add_duplicate_fails() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (_, stderr, code) = env.run(&["subject", "add", "Math"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Math"));
}

#[test]
fn test_subject_difficulty_out_of_range_rejected_by_parser() {
    let env = Env::new();
    let (_, _, code) = env.run(&["subject", "add", "Math", "--difficulty", "9"]);
    assert_ne!(code, 0);
    assert!(!env.settings().exists());
}

#[test]
fn test_availability_add_and_remove() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (_, _, code) = env.run(&["availability", "add", "tue", "14:00", "16:30"]);
    assert_eq!(code, 0);
    let doc: serde_json::Value = serde_json::from_str(&read(&env.settings())).unwrap();
    assert_eq!(doc["available_time"]["Tuesday"][0]["end"], "16:30");

    let (_, _, code) = env.run(&["availability", "remove", "Tuesday", "0"]);
    assert_eq!(code, 0);
    let (_, _, code) = env.run(&["availability", "remove", "Tuesday", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_availability_rejects_bad_time() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (_, stderr, code) = env.run(&["availability", "add", "Monday", "25:00", "26:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("25:00"));
    assert_eq!(read(&env.settings()), MONDAY_MORNING);
}

#[test]
fn test_generate_table() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (stdout, stderr, code) = env.run(&["generate", "--format", "table"]);
    assert_eq!(code, 0, "generate failed: {stderr}");
    assert!(stdout.contains("Monday     09:00 - 11:00  Math     120 min"));
    assert!(stdout.contains("Monday     11:10 - 12:00  Math     50 min"));
    assert!(stdout.contains("Sunday     No sessions"));
}

#[test]
fn test_generate_json() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (stdout, _, code) = env.run(&["generate", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let monday = parsed["schedule"]["Monday"].as_array().unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0]["start"], "09:00");
    assert_eq!(monday[0]["duration"], 120);
    assert!(parsed["schedule"]["Friday"].as_array().unwrap().is_empty());
    assert_eq!(parsed["summary"]["scheduled_minutes"], 170);
}

#[test]
fn test_generate_csv_to_file() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);
    let out = env.dir.path().join("plan.csv");

    let (_, _, code) = env.run(&["generate", "--format", "csv", "--output", out.to_str().unwrap()]);
    assert_eq!(code, 0);
    let csv = read(&out);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("day,start,end,subject,duration"));
    assert_eq!(lines.next(), Some("Monday,09:00,11:00,Math,120"));
    assert!(csv.contains("Tuesday,,,No sessions,"));
}

#[test]
fn test_generate_is_repeatable() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let first = env.run(&["generate", "--format", "json"]).0;
    let second = env.run(&["generate", "--format", "json"]).0;
    assert_eq!(first, second);
}

#[test]
fn test_generate_malformed_document() {
    let env = Env::new();
    let broken = r#"{"subjects": [{"name": "Math", "difficulty": "hard"}]"#;
    env.write_settings(broken);

    let (_, stderr, code) = env.run(&["generate"]);
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error:"));

    // Editing commands must not replace a document they cannot read.
    let (_, _, code) = env.run(&["subject", "add", "Art"]);
    assert_ne!(code, 0);
    assert_eq!(read(&env.settings()), broken);
}

#[test]
fn test_generate_invalid_session_bounds() {
    let env = Env::new();
    env.write_settings(
        r#"{"settings": {"min_session_minutes": 90, "max_session_minutes": 60}}"#,
    );

    let (stdout, stderr, code) = env.run(&["generate"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error:"));
}

#[test]
fn test_settings_set_rejects_invalid_bounds() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);

    let (_, _, code) = env.run(&["settings", "set", "min_session_minutes", "500"]);
    assert_ne!(code, 0);

    let (_, _, code) = env.run(&["settings", "set", "pomodoro_mode", "true"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = env.run(&["settings", "get", "pomodoro_mode"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_set_and_get() {
    let env = Env::new();
    let (_, _, code) = env.run(&["config", "set", "output.format", "csv"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = env.run(&["config", "get", "output.format"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "csv");

    let (_, _, code) = env.run(&["config", "set", "output.format", "pdf"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_format_used_by_generate() {
    let env = Env::new();
    env.write_settings(MONDAY_MORNING);
    env.run(&["config", "set", "output.format", "csv"]);

    let (stdout, _, code) = env.run(&["generate"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("day,start,end,subject,duration"));
}
