//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_with_checker, TestPlan};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a catalog file inside the test directory
fn write_catalog(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    path
}

const DEF_PO: &str = r#"msgid ""
msgstr ""
"Project-Id-Version: demo 1.0\n"

msgid "Save"
msgstr "Enregistrer"
"#;

const REF_POT: &str = r#"msgid ""
msgstr ""
"POT-Creation-Date: 2024-06-01\n"

#: src/ui.rs:10
msgid "Save"
msgstr ""

#: src/ui.rs:22
msgid "Save As"
msgstr ""
"#;

/// Translated entries carry over, new entries come through untranslated,
/// and the header keeps the translator's fields with the reference's
/// creation date
#[test]
fn test_msgmerge_carries_translations() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(&dir, "def.po", DEF_PO);
    let reference = write_catalog(&dir, "ref.pot", REF_POT);

    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::from(
            "msgid \"\"\n\
             msgstr \"\"\n\
             \"Project-Id-Version: demo 1.0\\n\"\n\
             \"POT-Creation-Date: 2024-06-01\\n\"\n\
             \n\
             #: src/ui.rs:10\n\
             msgid \"Save\"\n\
             msgstr \"Enregistrer\"\n\
             \n\
             #: src/ui.rs:22\n\
             msgid \"Save As\"\n\
             msgstr \"\"\n",
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

/// -v reports the aggregated statistics on stderr
#[test]
fn test_msgmerge_statistics() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(&dir, "def.po", DEF_PO);
    let reference = write_catalog(&dir, "ref.pot", REF_POT);
    let output = dir.path().join("out.po");

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgmerge"),
            args: vec![
                String::from("-v"),
                String::from("-o"),
                output.to_str().unwrap().to_string(),
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
            assert_eq!(
                stderr,
                "Read 2 old + 3 reference, merged 2, fuzzied 0, missing 1, obsolete 0.\n"
            );
        },
    );
    assert!(output.exists());
}

/// A near match is carried over fuzzy; a vanished definition is retired
/// as an obsolete entry after everything else
#[test]
fn test_msgmerge_fuzzy_and_obsolete() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Save the file"
msgstr "Enregistrer le fichier"

msgid "Quit"
msgstr "Quitter"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "Save the files"
msgstr ""
"#,
    );

    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::from(
            "msgid \"\"\n\
             msgstr \"\"\n\
             \n\
             #, fuzzy\n\
             msgid \"Save the files\"\n\
             msgstr \"Enregistrer le fichier\"\n\
             \n\
             #~ msgid \"Quit\"\n\
             #~ msgstr \"Quitter\"\n",
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

/// A compendium supplies translations the definitions file lacks
#[test]
fn test_msgmerge_compendium() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Quit"
msgstr "Quitter"
"#,
    );
    let compendium = write_catalog(
        &dir,
        "memory.po",
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

    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            format!("--compendium={}", compendium.to_str().unwrap()),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::from(
            "msgid \"\"\n\
             msgstr \"\"\n\
             \n\
             msgid \"Save\"\n\
             msgstr \"Enregistrer\"\n\
             \n\
             msgid \"Quit\"\n\
             msgstr \"Quitter\"\n",
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

/// --update rewrites def.po in place and leaves a backup
#[test]
fn test_msgmerge_update_with_backup() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(&dir, "def.po", DEF_PO);
    let reference = write_catalog(&dir, "ref.pot", REF_POT);

    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            String::from("-U"),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let backup = dir.path().join("def.po~");
    assert_eq!(fs::read_to_string(&backup).unwrap(), DEF_PO);

    let updated = fs::read_to_string(&def).unwrap();
    assert!(updated.contains("msgid \"Save As\""));
    assert!(updated.contains("POT-Creation-Date: 2024-06-01"));

    // A second run changes nothing, so no fresh backup is made.
    fs::remove_file(&backup).unwrap();
    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            String::from("-U"),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
    assert!(!backup.exists());
}

/// -s reorders entries lexicographically by msgid
#[test]
fn test_msgmerge_sort_output() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "zebra"
msgstr "zèbre"

msgid "apple"
msgstr "pomme"
"#,
    );
    let reference = write_catalog(
        &dir,
        "ref.pot",
        r#"msgid "zebra"
msgstr ""

msgid "apple"
msgstr ""
"#,
    );

    run_test(TestPlan {
        cmd: String::from("msgmerge"),
        args: vec![
            String::from("-q"),
            String::from("-s"),
            def.to_str().unwrap().to_string(),
            reference.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::from(
            "msgid \"\"\n\
             msgstr \"\"\n\
             \n\
             msgid \"apple\"\n\
             msgstr \"pomme\"\n\
             \n\
             msgid \"zebra\"\n\
             msgstr \"z\u{e8}bre\"\n",
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

/// --update and --output-file cannot be combined
#[test]
fn test_msgmerge_update_conflicts_with_output() {
    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgmerge"),
            args: vec![
                String::from("-U"),
                String::from("-o"),
                String::from("out.po"),
                String::from("def.po"),
                String::from("ref.pot"),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 1,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(1));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("mutually exclusive"));
        },
    );
}

/// Duplicate definitions are rejected with both locations reported
#[test]
fn test_msgmerge_duplicate_definition() {
    let dir = TempDir::new().unwrap();
    let def = write_catalog(
        &dir,
        "def.po",
        r#"msgid "Twice"
msgstr "a"

msgid "Twice"
msgstr "b"
"#,
    );
    let reference = write_catalog(&dir, "ref.pot", "msgid \"Twice\"\nmsgstr \"\"\n");

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgmerge"),
            args: vec![
                String::from("-q"),
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
            assert!(stderr.contains("duplicate message definition"));
            assert!(stderr.contains("first definition"));
        },
    );
}
