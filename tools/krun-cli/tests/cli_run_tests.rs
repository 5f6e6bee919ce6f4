use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Temp dir holding a config whose only context points at `server`.
fn write_config(server: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = serde_yaml::to_string(&serde_json::json!({
        "contexts": {
            "default": { "server": server, "namespace": "team-a" }
        },
        "current_context": "default"
    }))
    .unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(&path, config).unwrap();
    (dir, path)
}

fn krun(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("krun").unwrap();
    cmd.env("KRUN_CONFIG_PATH", config).env_remove("KRUN_LOG");
    cmd
}

#[test]
fn service_dry_run_prints_summary() {
    let (_dir, config) = write_config("http://127.0.0.1:1/api/v1");
    krun(&config)
        .args(["service", "foo", "--port", "80", "--dry-run"])
        .assert()
        .success()
        .stdout("service/foo created (dry run)\n");
}

#[test]
fn run_dry_run_yaml_output() {
    let (_dir, config) = write_config("http://127.0.0.1:1/api/v1");
    krun(&config)
        .args([
            "run", "box", "--image", "busybox", "-i", "--dry-run", "-o", "yaml",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("kind: Pod")
                .and(predicate::str::contains("restartPolicy: OnFailure")),
        );
}

#[test]
fn invalid_restart_policy_exits_non_zero() {
    let (_dir, config) = write_config("http://127.0.0.1:1/api/v1");
    krun(&config)
        .args(["run", "box", "--image", "busybox", "--restart", "sometimes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: invalid restart policy: sometimes",
        ));
}

#[test]
fn missing_port_fails() {
    let (_dir, config) = write_config("http://127.0.0.1:1/api/v1");
    krun(&config)
        .args(["service", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parameter: port is required"));
}

#[test]
fn context_get_shows_config() {
    let (_dir, config) = write_config("http://cluster:8080/api/v1");
    krun(&config)
        .args(["context", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://cluster:8080/api/v1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_submits_to_context_namespace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/namespaces/team-a/replicationcontrollers"))
        .respond_with(|req: &wiremock::Request| {
            ResponseTemplate::new(201).set_body_bytes(req.body.clone())
        })
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = write_config(&format!("{}/api/v1", server.uri()));
    let output = tokio::task::spawn_blocking(move || {
        krun(&config)
            .args(["run", "web", "--image", "nginx", "--replicas", "2"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output.assert().success().stdout("replicationcontroller/web created\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_flag_overrides_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/namespaces/other/services"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = write_config("http://127.0.0.1:1/api/v1");
    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        krun(&config)
            .args(["service", "foo", "--port", "80", "-n", "other", "-s", &uri])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn explicit_server_and_namespace_skip_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yml");
    krun(&config)
        .args([
            "service", "foo", "--port", "80", "--dry-run", "-s",
            "http://127.0.0.1:1/api/v1", "-n", "team-a",
        ])
        .assert()
        .success()
        .stdout("service/foo created (dry run)\n");
    assert!(!config.exists());

    krun(&config)
        .args(["service", "foo", "--port", "80", "--dry-run", "-n", "team-a"])
        .assert()
        .success();
    assert!(config.exists());
}
