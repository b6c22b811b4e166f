// upm-git: Git Package Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for remote and package specifier normalization.
//!
//! Follows a specifier through the forms it takes between user input and an
//! installed package.

use upm_git::host::HostSettings;
use upm_git::identity::{
    PackageSpecifier, canonicalize_remote, compose_package_id, file_path, file_url, ref_name,
    repo_http_url, repo_id, revision_hash, specific_package_id,
};

// =============================================================================
// Remote Forms
// =============================================================================

#[test]
fn identity_canonical_remotes() {
    let canonical: Vec<String> = [
        "git@github.com:XRTK/GitPackageTest",
        "ssh://git@github.com/XRTK/GitPackageTest.git",
        "https://github.com/XRTK/GitPackageTest",
        "  https://gitlab.com/group/sub/project.git  ",
    ]
    .iter()
    .map(|raw| canonicalize_remote(raw))
    .collect();

    insta::assert_snapshot!(canonical.join("\n"), @r"
    ssh://git@github.com/XRTK/GitPackageTest.git
    ssh://git@github.com/XRTK/GitPackageTest.git
    https://github.com/XRTK/GitPackageTest.git
    https://gitlab.com/group/sub/project.git
    ");
}

// =============================================================================
// Specifier Lifecycle
// =============================================================================

#[test]
fn identity_compose_then_inspect() {
    let remote = canonicalize_remote("git@github.com:XRTK/GitPackageTest");
    let package_id = compose_package_id("com.xrtk.test", &remote, "1.0.0");

    assert_eq!(
        package_id,
        "com.xrtk.test@ssh://git@github.com/XRTK/GitPackageTest.git#1.0.0"
    );
    assert_eq!(repo_http_url(&package_id), "https://github.com/XRTK/GitPackageTest");
    assert_eq!(repo_id(&package_id), "XRTK/GitPackageTest");
    assert_eq!(ref_name(&package_id), "1.0.0");
}

#[test]
fn identity_retarget_keeps_name_and_remote() {
    let package_id = "com.xrtk.test@git@github.com:XRTK/GitPackageTest.git#1.0.0";

    let develop = specific_package_id(package_id, "develop");
    assert_eq!(
        develop,
        "com.xrtk.test@git@github.com:XRTK/GitPackageTest.git#develop"
    );
    assert_eq!(
        specific_package_id(&develop, ""),
        "com.xrtk.test@git@github.com:XRTK/GitPackageTest.git"
    );

    let parsed: PackageSpecifier = develop.parse().unwrap();
    assert_eq!(parsed.name(), "com.xrtk.test");
    assert_eq!(parsed.reference(), Some("develop"));
    assert_eq!(parsed.to_string(), develop);
}

#[test]
fn identity_installed_package_links() {
    let dir = tempfile::tempdir().unwrap();
    let resolved = dir.path().join("com.xrtk.test@0123abcd");
    std::fs::create_dir(&resolved).unwrap();
    for name in ["CHANGELOG.md", "CHANGELOG.md.meta", "LICENSE.md", "package.json"] {
        std::fs::write(resolved.join(name), "").unwrap();
    }

    let package_id = "com.xrtk.test@https://bitbucket.org/xrtk/test.git#1.0.0";
    let resolved_str = resolved.to_string_lossy();
    let hosts = HostSettings::default();

    assert_eq!(revision_hash(&resolved_str), "0123abcd");
    assert_eq!(
        file_url(
            package_id,
            &resolved_str,
            &file_path(&resolved, "CHANGELOG.*"),
            &hosts
        ),
        "https://bitbucket.org/xrtk/test/src/0123abcd/CHANGELOG.md"
    );
    assert_eq!(file_path(&resolved, "README.*"), "");
}

#[test]
fn identity_rejects_garbage() {
    for input in ["", "   ", "no-at-sign", "@"] {
        assert_eq!(repo_http_url(input), "", "input {input:?}");
        assert_eq!(ref_name(input), "", "input {input:?}");
    }
    assert!("no-at-sign".parse::<PackageSpecifier>().is_err());
}
