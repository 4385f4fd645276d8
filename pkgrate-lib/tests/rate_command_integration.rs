//! Runs the `rate` command end to end against a wiremock hosting API

use pkgrate_lib::{Host, run};
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct CapturingHost {
    output: Vec<u8>,
    error: Vec<u8>,
    exit_code: Option<i32>,
}

impl Host for CapturingHost {
    fn output(&mut self) -> impl Write {
        &mut self.output
    }

    fn error(&mut self) -> impl Write {
        &mut self.error
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

impl CapturingHost {
    fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error).into_owned()
    }
}

async fn mount_repository(server: &MockServer, owner: &str) {
    let responses = [
        ("/issues/comments", json!([{ "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:10:00Z" }])),
        ("/pulls/comments", json!([])),
        ("/pulls", json!([])),
        ("/license", json!({ "license": { "spdx_id": "Apache-2.0" } })),
        ("/contributors", json!([{ "login": "alice", "contributions": 10 }, { "login": "bob", "contributions": 10 }])),
        ("/issues", json!([{ "state": "closed" }])),
        ("/readme", json!({ "size": 2048 })),
    ];

    for (suffix, body) in responses {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{owner}/repo{suffix}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

async fn mount_outage(server: &MockServer, owner: &str) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/repos/{owner}/repo/.*$")))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}

fn write_config(dir: &Path, server: &MockServer) -> String {
    let config = format!(
        r#"
api_base_url = "{}"
metric_timeout = "5s"
request_timeout = "2s"
max_rate_limit_wait = "0s"

[weights]
RampUp = 0.15
Correctness = 0.15
BusFactor = 0.2
ResponsiveMaintainer = 0.3
LicenseScore = 0.2
"#,
        server.uri()
    );

    let path = dir.join("pkgrate.toml");
    std::fs::write(&path, config).unwrap();
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_rate_json_output() {
    let server = MockServer::start().await;
    mount_repository(&server, "good").await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &server);

    let mut host = CapturingHost::default();
    run(
        &mut host,
        ["pkgrate", "rate", "good/repo", "--config", config.as_str(), "--format", "json", "--github-token", "t"],
    )
    .await
    .unwrap();

    assert_eq!(host.exit_code, None);

    let output = host.output_text();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);

    let rating: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(rating["URL"], "good/repo");
    assert_eq!(rating["RampUp"], 0.25);
    assert_eq!(rating["Correctness"], 1.0);
    assert_eq!(rating["LicenseScore"], 1.0);
    for key in ["NetScore", "NetScoreLatency", "BusFactor", "ResponsiveMaintainer", "BusFactorLatency"] {
        assert!(rating.get(key).is_some(), "missing {key} in {rating}");
    }
}

#[tokio::test]
async fn test_rate_reports_unratable_packages() {
    let server = MockServer::start().await;
    mount_repository(&server, "good").await;
    mount_outage(&server, "down").await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &server);

    let mut host = CapturingHost::default();
    run(
        &mut host,
        [
            "pkgrate",
            "rate",
            "down/repo",
            "good/repo",
            "not-a-package",
            "--config",
            config.as_str(),
            "--format",
            "json",
            "--github-token",
            "t",
        ],
    )
    .await
    .unwrap();

    assert_eq!(host.exit_code, Some(1));

    let output = host.output_text();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\"URL\":\"good/repo\""));

    let errors = host.error_text();
    assert!(errors.contains("down/repo"));
    assert!(errors.contains("not-a-package"));
}

#[tokio::test]
async fn test_rate_console_output_to_file() {
    let server = MockServer::start().await;
    mount_repository(&server, "good").await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &server);
    let report = tmp.path().join("report.txt");

    let mut host = CapturingHost::default();
    run(
        &mut host,
        [
            "pkgrate",
            "rate",
            "https://github.com/good/repo",
            "--config",
            config.as_str(),
            "--output",
            report.to_str().unwrap(),
            "--github-token",
            "t",
        ],
    )
    .await
    .unwrap();

    assert_eq!(host.exit_code, None);
    assert!(host.output_text().is_empty());

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("https://github.com/good/repo is rated"));
    assert!(text.contains("LicenseScore"));
    assert!(!text.contains('\u{1b}'), "file output should not be colored");
}

#[tokio::test]
async fn test_rate_rejects_invalid_weights_before_any_request() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("pkgrate.toml");
    std::fs::write(
        &config,
        format!("api_base_url = \"{}\"\n[weights]\nRampUp = 0.5\nLicenseScore = 0.2\n", server.uri()),
    )
    .unwrap();

    let mut host = CapturingHost::default();
    let result = run(
        &mut host,
        ["pkgrate", "rate", "good/repo", "--config", config.to_str().unwrap(), "--github-token", "t"],
    )
    .await;

    let _ = result.unwrap_err();
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
