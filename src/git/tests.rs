// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use super::manifest::clone_args;
use super::{
    Git, ManifestOutcome, RefGroups, ReferenceSet, is_version_like, read_package_name, select_ref,
};
use crate::core::process::ProcessRunner;
use crate::error::ProcessError;

/// Set as `ls-remote` would report `names`, all as branches.
fn listed(names: &[&str]) -> ReferenceSet {
    let mut refs = ReferenceSet::new();
    let output: String = names
        .iter()
        .map(|name| format!("0000000\trefs/heads/{name}\n"))
        .collect();
    refs.extend_from_ls_remote(&output);
    refs
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Repository on branch `main` with tag `1.0.0`; `with_manifest` adds
/// `package.json` and its `.meta` sidecar.
fn package_repo(dir: &Path, with_manifest: bool) -> String {
    git(dir, &["init", "--quiet"]);
    if with_manifest {
        std::fs::write(dir.join("package.json"), r#"{"name":"com.test.pkg","version":"1.0.0"}"#)
            .unwrap();
        std::fs::write(dir.join("package.json.meta"), "guid: 0\n").unwrap();
    } else {
        std::fs::write(dir.join("README.md"), "# test\n").unwrap();
    }
    git(dir, &["add", "."]);
    git(dir, &["commit", "--quiet", "-m", "initial"]);
    git(dir, &["branch", "-M", "main"]);
    git(dir, &["tag", "1.0.0"]);
    format!("file://{}", dir.display())
}

#[test]
fn test_extend_from_ls_remote() {
    let mut refs = ReferenceSet::new();
    refs.extend_from_ls_remote(
        "1111111\trefs/heads/main\r\n2222222\trefs/tags/1.0.0\n3333333\trefs/heads/feature/x\n",
    );
    assert_eq!(refs.as_slice(), ["main", "1.0.0", "feature/x"]);
}

#[test]
fn test_extend_ignores_other_refs() {
    let mut refs = ReferenceSet::new();
    refs.extend_from_ls_remote("1111111\trefs/pull/1/head\n2222222\tHEAD\n");
    assert!(refs.is_empty());
}

#[test]
fn test_is_version_like() {
    assert!(is_version_like("1.0"));
    assert!(is_version_like("10.2.3-preview"));
    assert!(!is_version_like("v1.0.0"));
    assert!(!is_version_like("1"));
    assert!(!is_version_like("main"));
}

#[test]
fn test_ref_groups_ordering() {
    let refs = listed(&["main", "0.9.0", "develop", "1.10.0", "1.2.0", "feature/a"]);
    let groups = RefGroups::from(&refs);

    assert_eq!(groups.versions, ["1.2.0", "1.10.0", "0.9.0"]);
    assert_eq!(groups.others, ["main", "feature/a", "develop"]);
    assert_eq!(groups.iter().count(), 6);
    assert_eq!(groups.iter().next(), Some("1.2.0"));
}

#[test]
fn test_select_ref() {
    let refs = listed(&["main", "1.0.0"]);
    assert_eq!(select_ref(&refs, "1.0.0"), "1.0.0");
    assert_eq!(select_ref(&refs, "2.0.0"), "HEAD");
    assert_eq!(select_ref(&refs, ""), "HEAD");
}

#[test]
fn test_clone_args() {
    let scratch = Path::new("Temp/UpmGit");
    assert_eq!(
        clone_args("https://host/o/r.git", "1.0.0", scratch),
        [
            "clone",
            "--depth=1",
            "--branch",
            "1.0.0",
            "--single-branch",
            "https://host/o/r.git",
            "Temp/UpmGit"
        ]
    );
    assert_eq!(
        clone_args("https://host/o/r.git", "HEAD", scratch),
        [
            "clone",
            "--depth=1",
            "--single-branch",
            "https://host/o/r.git",
            "Temp/UpmGit"
        ]
    );
}

#[tokio::test]
async fn test_read_package_name_requires_meta() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("package.json"), r#"{"name":"com.pkg"}"#).unwrap();
    assert_eq!(read_package_name(dir.path()).await, "");

    std::fs::write(dir.path().join("package.json.meta"), "").unwrap();
    assert_eq!(read_package_name(dir.path()).await, "com.pkg");
}

#[tokio::test]
async fn test_read_package_name_invalid() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("package.json"), "{ broken").unwrap();
    std::fs::write(dir.path().join("package.json.meta"), "").unwrap();
    assert_eq!(read_package_name(dir.path()).await, "");
    assert_eq!(read_package_name(&dir.path().join("absent")).await, "");
}

#[test]
fn test_outcome_name() {
    let missing = ManifestOutcome::Missing {
        clone_succeeded: false,
    };
    assert_eq!(missing.name(), "");
    assert!(!missing.is_found());

    let found = ManifestOutcome::Found {
        name: "com.pkg".to_string(),
        clone_succeeded: false,
    };
    assert_eq!(found.name(), "com.pkg");
    assert!(!found.clone_succeeded());
}

#[tokio::test]
async fn test_list_refs_local_repo() {
    let repo = temp_dir();
    let url = package_repo(repo.path(), true);
    let git = Git::new(ProcessRunner::new());

    let mut refs = listed(&["stale"]);
    assert!(git.list_refs(&url, &mut refs).await.unwrap());

    assert_eq!(refs.len(), 2);
    assert!(refs.contains("main"));
    assert!(refs.contains("1.0.0"));
    assert!(!refs.contains("stale"));
    assert!(!git.runner().is_running());
}

#[tokio::test]
async fn test_list_refs_failure_leaves_set_empty() {
    let dir = temp_dir();
    let url = format!("file://{}", dir.path().join("missing").display());
    let git = Git::new(ProcessRunner::new());

    let mut refs = listed(&["stale"]);
    assert!(!git.list_refs(&url, &mut refs).await.unwrap());
    assert!(refs.is_empty());
}

#[tokio::test]
async fn test_list_refs_missing_executable() {
    let git = Git::new(ProcessRunner::new()).with_executable("upm-git-no-such-git");
    let mut refs = ReferenceSet::new();

    assert!(!git.list_refs("https://host/o/r.git", &mut refs).await.unwrap());
    assert!(refs.is_empty());
}

#[tokio::test]
async fn test_list_refs_rejected_while_busy() {
    let runner = ProcessRunner::new();
    let sleeping = runner.run("sleep", ["1"]).unwrap();
    let git = Git::new(runner.clone());

    let mut refs = ReferenceSet::new();
    let err = git
        .list_refs("https://host/o/r.git", &mut refs)
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::Busy { .. }));

    sleeping.await;
    assert!(!runner.is_running());
}

#[tokio::test]
async fn test_fetch_manifest_found() {
    let repo = temp_dir();
    let url = package_repo(repo.path(), true);
    let work = temp_dir();
    let scratch = work.path().join("Temp").join("UpmGit");
    std::fs::create_dir_all(scratch.join("leftover")).unwrap();

    let git = Git::new(ProcessRunner::new());
    let outcome = git.fetch_manifest_name(&url, "1.0.0", &scratch).await.unwrap();

    assert_eq!(
        outcome,
        ManifestOutcome::Found {
            name: "com.test.pkg".to_string(),
            clone_succeeded: true,
        }
    );
    assert!(!scratch.join("leftover").exists());
}

#[tokio::test]
async fn test_fetch_manifest_default_branch() {
    let repo = temp_dir();
    let url = package_repo(repo.path(), true);
    let work = temp_dir();
    let scratch = work.path().join("scratch");

    let git = Git::new(ProcessRunner::new());
    let outcome = git.fetch_manifest_name(&url, "HEAD", &scratch).await.unwrap();

    assert_eq!(outcome.name(), "com.test.pkg");
}

#[tokio::test]
async fn test_fetch_manifest_missing() {
    let repo = temp_dir();
    let url = package_repo(repo.path(), false);
    let work = temp_dir();
    let scratch = work.path().join("scratch");

    let git = Git::new(ProcessRunner::new());
    let outcome = git.fetch_manifest_name(&url, "main", &scratch).await.unwrap();

    assert_eq!(
        outcome,
        ManifestOutcome::Missing {
            clone_succeeded: true
        }
    );
}

#[tokio::test]
async fn test_fetch_manifest_unknown_ref() {
    let repo = temp_dir();
    let url = package_repo(repo.path(), true);
    let work = temp_dir();
    let scratch = work.path().join("scratch");

    let git = Git::new(ProcessRunner::new());
    let outcome = git
        .fetch_manifest_name(&url, "no-such-branch", &scratch)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ManifestOutcome::Missing {
            clone_succeeded: false
        }
    );
    assert_eq!(outcome.name(), "");
}

#[tokio::test]
async fn test_fetch_manifest_while_busy_keeps_scratch() {
    let work = temp_dir();
    let scratch = work.path().join("scratch");
    std::fs::create_dir_all(&scratch).unwrap();
    std::fs::write(scratch.join("package.json"), r#"{"name":"com.keep"}"#).unwrap();

    let runner = ProcessRunner::new();
    let held = runner.claim("git", ["ls-remote"]).unwrap();
    let git = Git::new(runner.clone());

    let err = git
        .fetch_manifest_name("https://host/o/r.git", "main", &scratch)
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::Busy { .. }));
    assert!(scratch.join("package.json").is_file());

    drop(held);
    assert!(!runner.is_running());
}
