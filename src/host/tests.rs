// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use super::{
    HostData, HostErrorCode, HostSettings, ManifestHost, ManifestRequest, PackageHost, RequestStatus,
};
use crate::error::HostError;

async fn wait_terminal(host: &ManifestHost, handle: &ManifestRequest) -> RequestStatus {
    for _ in 0..200 {
        let status = host.poll_status(handle);
        if status.is_terminal() {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never finished");
}

#[test]
fn test_host_data_known_domains() {
    let hosts = HostSettings::default();
    let blobs: Vec<_> = [
        "pkg@https://github.com/o/r.git",
        "pkg@https://gitlab.com/o/r.git",
        "pkg@https://bitbucket.org/o/r.git",
    ]
    .iter()
    .map(|id| {
        let data = hosts.host_data(id);
        format!("{} {}", data.name, data.blob)
    })
    .collect();

    assert_eq!(blobs, ["GitHub blob", "GitLab -/blob", "Bitbucket src"]);
}

#[test]
fn test_host_data_falls_back_to_web() {
    let data = HostSettings::default().host_data("pkg@https://example.org/o/r.git");
    assert_eq!(data, HostData::web());
    assert_eq!(data.name, "web");
    assert_eq!(data.blob, "blob");
}

#[test]
fn test_host_data_first_match_wins() {
    let hosts = HostSettings::new(vec![
        HostData {
            name: "Mirror".to_string(),
            domain: "example.org".to_string(),
            blob: "tree".to_string(),
            logo_light: String::new(),
            logo_dark: String::new(),
        },
        HostData {
            name: "Shadow".to_string(),
            domain: "example".to_string(),
            blob: "view".to_string(),
            logo_light: String::new(),
            logo_dark: String::new(),
        },
    ]);

    assert_eq!(hosts.host_data("pkg@https://example.org/o/r").name, "Mirror");
}

#[test]
fn test_status_is_terminal() {
    assert!(!RequestStatus::InProgress.is_terminal());
    assert!(RequestStatus::Success.is_terminal());
    assert!(
        RequestStatus::Failure {
            message: "boom".to_string(),
            code: HostErrorCode::Unknown,
        }
        .is_terminal()
    );
}

#[test]
fn test_error_code_display() {
    insta::assert_snapshot!(
        format!("{} {}", HostErrorCode::NotFound, HostErrorCode::InvalidParameter),
        @"NotFound InvalidParameter"
    );
}

#[tokio::test]
async fn test_manifest_host_rejects_malformed_specifier() {
    let dir = tempfile::tempdir().unwrap();
    let host = ManifestHost::new(dir.path().join("manifest.json"));

    let err = host.submit_add("no-remote-here").unwrap_err();
    assert!(matches!(err, HostError::InvalidSpecifier(_)));
}

#[tokio::test]
async fn test_manifest_host_creates_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Packages").join("manifest.json");
    let host = ManifestHost::new(&path);

    let handle = host
        .submit_add("com.test.pkg@https://github.com/o/r.git#1.0.0")
        .unwrap();
    assert_eq!(wait_terminal(&host, &handle).await, RequestStatus::Success);

    let recorded = host.dependency("com.test.pkg").await.unwrap();
    assert_eq!(recorded.as_deref(), Some("https://github.com/o/r.git#1.0.0"));
}

#[tokio::test]
async fn test_manifest_host_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(
        &path,
        r#"{"dependencies":{"com.other":"1.2.3"},"scopedRegistries":[]}"#,
    )
    .unwrap();
    let host = ManifestHost::new(&path);

    let handle = host.submit_add("com.test.pkg@https://github.com/o/r.git").unwrap();
    assert_eq!(wait_terminal(&host, &handle).await, RequestStatus::Success);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(manifest["dependencies"]["com.other"], "1.2.3");
    assert_eq!(
        manifest["dependencies"]["com.test.pkg"],
        "https://github.com/o/r.git"
    );
    assert!(manifest["scopedRegistries"].is_array());
}

#[tokio::test]
async fn test_manifest_host_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, "{ not json").unwrap();
    let host = ManifestHost::new(&path);

    let handle = host.submit_add("pkg@https://github.com/o/r.git").unwrap();
    match wait_terminal(&host, &handle).await {
        RequestStatus::Failure { code, message } => {
            assert_eq!(code, HostErrorCode::Conflict);
            assert!(message.contains("invalid JSON"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_manifest_host_dependency_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let host = ManifestHost::new(dir.path().join("absent.json"));

    assert_eq!(host.dependency("pkg").await.unwrap(), None);
}
