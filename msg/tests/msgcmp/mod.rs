//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_with_checker, TestPlan};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_catalog(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    path
}

/// A catalog covering every reference passes silently
#[test]
fn test_msgcmp_complete_catalog() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid ""
msgstr ""
"Project-Id-Version: demo\n"

msgid "Save"
msgstr "Enregistrer"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid ""
msgstr ""

msgid "Save"
msgstr ""
"#,
    );

    run_test(TestPlan {
        cmd: String::from("msgcmp"),
        args: vec![
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

/// A missing definition is a fatal error naming the reference position
#[test]
fn test_msgcmp_missing_definition() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Save"
msgstr "Enregistrer"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "Save"
msgstr ""

msgid "Quit"
msgstr ""
"#,
    );

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgcmp"),
            args: vec![
                def.to_str().unwrap().to_string(),
                reference.to_str().unwrap().to_string(),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 1,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(1));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("ref.pot:4: error: this message is used but not defined in"));
            assert!(stderr.contains("found 1 fatal error\n"));
        },
    );
}

/// A merely similar definition is still an error, with a hint at the
/// candidate; unlike msgmerge, fuzzy is not good enough here
#[test]
fn test_msgcmp_similar_definition_is_error() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Save the file"
msgstr "Enregistrer le fichier"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "Save the files"
msgstr ""
"#,
    );

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgcmp"),
            args: vec![
                def.to_str().unwrap().to_string(),
                reference.to_str().unwrap().to_string(),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 1,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(1));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("this message is used but not defined..."));
            assert!(stderr.contains("...but this definition is similar"));
            assert!(stderr.contains("def.po:1"));
            assert!(stderr.contains("found 1 fatal error\n"));
        },
    );
}

/// Unreferenced definitions are warnings, not errors
#[test]
fn test_msgcmp_unused_definition_warns() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Save"
msgstr "Enregistrer"

msgid "Relic"
msgstr "Relique"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "Save"
msgstr ""
"#,
    );

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgcmp"),
            args: vec![
                def.to_str().unwrap().to_string(),
                reference.to_str().unwrap().to_string(),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(0));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("def.po:4: warning: this message is not used"));
        },
    );
}

/// --multi-domain applies the reference to every definitions domain
#[test]
fn test_msgcmp_multi_domain() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"domain "gui"

msgid "Save"
msgstr "Enregistrer"

domain "cli"

msgid "Quit"
msgstr "Quitter"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "Save"
msgstr ""
"#,
    );

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgcmp"),
            args: vec![
                String::from("-m"),
                def.to_str().unwrap().to_string(),
                reference.to_str().unwrap().to_string(),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 1,
        },
        |_, output| {
            // "Save" is missing from the cli domain, and "Quit" is unused
            assert_eq!(output.status.code(), Some(1));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("this message is used but not defined in"));
            assert!(stderr.contains("warning: this message is not used"));
            assert!(stderr.contains("found 1 fatal error\n"));
        },
    );
}
