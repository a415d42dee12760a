//! End-to-end tests for the chat-archiver binary.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{fixtures_dir, CliEnv};

fn run(env: &CliEnv, args: &[&str]) -> assert_cmd::assert::Assert {
    Command::from_std(env.command()).args(args).assert()
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let env = CliEnv::new();
    run(&env, &["--help"])
        .success()
        .stdout(predicate::str::contains("capture"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("print"));
}

#[test]
fn sites_lists_supported_adapters() {
    let env = CliEnv::new();
    run(&env, &["sites"])
        .success()
        .stdout(predicate::str::contains("ChatGPT"))
        .stdout(predicate::str::contains("gemini.google.com"))
        .stdout(predicate::str::contains("DeepSeek"));
}

// ============================================================================
// Capture → List → Export → Print
// ============================================================================

#[test]
fn capture_then_list_export_and_print() {
    let env = CliEnv::new();

    run(&env, &["capture", &fixture("chatgpt.html")])
        .success()
        .stdout(predicate::str::contains("Saved 3 messages as chat"));

    let chats = env.store().list().unwrap();
    assert_eq!(chats.len(), 1);
    let id = chats[0].id.clone();

    run(&env, &["list"])
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Quadratic formula"));

    run(&env, &["export", &id, "--format", "txt"])
        .success()
        .stdout(predicate::str::contains("Exported"));
    let exported = env.dir.path().join(format!("ChatExport_ChatGPT_{}.txt", id));
    let content = std::fs::read_to_string(&exported).unwrap();
    assert!(content.starts_with("Title: Quadratic formula\r\nWebsite: ChatGPT\r\n"));

    let print_path = env.dir.path().join("print.html");
    run(&env, &["print", &id, "--output", &print_path.display().to_string()])
        .success();
    let html = std::fs::read_to_string(&print_path).unwrap();
    assert!(html.contains("window.print()"));
}

#[test]
fn capture_with_explicit_url_overrides_markup() {
    let env = CliEnv::new();
    run(
        &env,
        &[
            "capture",
            &fixture("unsupported.html"),
            "--url",
            "https://chat.deepseek.com/a/chat/s/1",
        ],
    )
    .success()
    .stdout(predicate::str::contains("No chat messages found to save!"));
}

#[test]
fn unsupported_page_is_reported_without_saving() {
    let env = CliEnv::new();
    run(&env, &["capture", &fixture("unsupported.html")])
        .success()
        .stdout(predicate::str::contains("not a supported chat site"));
    assert!(env.store().list().unwrap().is_empty());
}

#[test]
fn export_to_stdout_as_json() {
    let env = CliEnv::new();
    run(&env, &["capture", &fixture("gemini.html")]).success();
    let id = env.store().list().unwrap()[0].id.clone();

    run(&env, &["export", &id, "--format", "json", "--stdout"])
        .success()
        .stdout(predicate::str::contains("\"title\": \"Gemini Chat\""))
        .stdout(predicate::str::contains("\"html\"").not());
}

// ============================================================================
// Store Management
// ============================================================================

#[test]
fn rename_and_delete_round_trip() {
    let env = CliEnv::new();
    run(&env, &["capture", &fixture("deepseek.html")]).success();
    let id = env.store().list().unwrap()[0].id.clone();

    run(&env, &["rename", &id, "Multiplication"])
        .success()
        .stdout(predicate::str::contains("Multiplication"));
    assert_eq!(env.store().get(&id).unwrap().unwrap().title, "Multiplication");

    run(&env, &["delete", &id, "--yes"]).success();
    assert!(env.store().list().unwrap().is_empty());
}

#[test]
fn first_run_creates_store_with_defaults() {
    let env = CliEnv::new();
    assert!(!env.store_path().exists());

    run(&env, &["list"]).success();

    let content = std::fs::read_to_string(env.store_path()).unwrap();
    let data: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(data, serde_json::json!({ "chats": [], "autoSave": false }));
}

#[test]
fn existing_store_is_not_reset() {
    let env = CliEnv::new();
    run(&env, &["autosave", "on"]).success();
    run(&env, &["list"]).success();
    assert!(env.store().auto_save().unwrap());
}

#[test]
fn autosave_toggle_persists() {
    let env = CliEnv::new();
    run(&env, &["autosave"])
        .success()
        .stdout(predicate::str::contains("Autosave is off"));
    run(&env, &["autosave", "on"]).success();
    assert!(env.store().auto_save().unwrap());
}

#[test]
fn watch_requires_autosave() {
    let env = CliEnv::new();
    run(&env, &["watch", &fixture("chatgpt.html")])
        .failure()
        .stderr(predicate::str::contains("Autosave is off"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn print_unknown_id_fails_with_notice() {
    let env = CliEnv::new();
    run(&env, &["print", "12345"])
        .failure()
        .stderr(predicate::str::contains("Chat not found in local storage."));
}

#[test]
fn print_without_id_fails_with_notice() {
    let env = CliEnv::new();
    run(&env, &["print"])
        .failure()
        .stderr(predicate::str::contains("No chat ID provided."));
}

#[test]
fn export_unknown_id_fails() {
    let env = CliEnv::new();
    run(&env, &["export", "999"])
        .failure()
        .stderr(predicate::str::contains("999"));
}

#[test]
fn capture_missing_file_fails() {
    let env = CliEnv::new();
    run(&env, &["capture", "does-not-exist.html"])
        .failure()
        .stderr(predicate::str::contains("does-not-exist.html"));
}

#[test]
fn config_path_honors_environment() {
    let env = CliEnv::new();
    run(&env, &["config", "path"])
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
