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

/// Create a temporary .po file for testing
fn create_temp_po_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let po_path = temp_dir.path().join("test.po");
    let mut file = File::create(&po_path).unwrap();
    write!(file, "{}", content).unwrap();
    (temp_dir, po_path)
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

/// Test msgfmt with simple .po file
#[test]
fn test_msgfmt_simple() {
    let po_content = r#"
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Hello"
msgstr "Hola"
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    // Verify the .mo file was created with the little-endian magic
    let data = fs::read(&mo_path).unwrap();
    assert!(data.len() >= 28, "MO file should have a full header");
    assert_eq!(data[0], 0xde);
    assert_eq!(data[1], 0x12);
    assert_eq!(data[2], 0x04);
    assert_eq!(data[3], 0x95);
    // header entry + one message
    assert_eq!(read_u32(&data, 8), 2);
}

/// Fuzzy entries are dropped unless -f is given
#[test]
fn test_msgfmt_fuzzy_entries() {
    let po_content = r#"
msgid "Plain"
msgstr "Simple"

#, fuzzy
msgid "Guess"
msgstr "Devine"
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
    let data = fs::read(&mo_path).unwrap();
    assert_eq!(read_u32(&data, 8), 1);

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-f"),
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
    let data = fs::read(&mo_path).unwrap();
    assert_eq!(read_u32(&data, 8), 2);
}

/// Plural entries keep their NUL-joined encoding
#[test]
fn test_msgfmt_plural() {
    let po_content = r#"
msgid ""
msgstr ""
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "One file"
msgid_plural "%d files"
msgstr[0] "Un archivo"
msgstr[1] "%d archivos"
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let data = fs::read(&mo_path).unwrap();
    let text = String::from_utf8_lossy(&data);
    assert!(text.contains("One file\0%d files"));
    assert!(text.contains("Un archivo\0%d archivos"));
}

/// -c -v reports suspicious entries as warnings
#[test]
fn test_msgfmt_check_warnings() {
    let po_content = r#"
#, c-format
msgid "Count: %d"
msgstr "Cuenta:"

msgid "Empty"
msgstr ""
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test_with_checker(
        TestPlan {
            cmd: String::from("msgfmt"),
            args: vec![
                String::from("-c"),
                String::from("-v"),
                String::from("-o"),
                mo_path.to_str().unwrap().to_string(),
                po_path.to_str().unwrap().to_string(),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(0));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("format specifications in msgid and msgstr differ"));
            assert!(stderr.contains("empty msgstr for: Empty"));
        },
    );
}

/// Obsolete entries never reach the binary catalog
#[test]
fn test_msgfmt_skips_obsolete() {
    let po_content = r#"
msgid "Live"
msgstr "Vivant"

#~ msgid "Gone"
#~ msgstr "Parti"
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let data = fs::read(&mo_path).unwrap();
    assert_eq!(read_u32(&data, 8), 1);
    let text = String::from_utf8_lossy(&data);
    assert!(!text.contains("Gone"));
}

/// Each named domain compiles to its own .mo next to the default output
#[test]
fn test_msgfmt_domain_outputs() {
    let po_content = r#"
msgid "Shared"
msgstr "Partagé"

domain "extra"

msgid "Save"
msgstr "Enregistrer"
"#;

    let (temp_dir, po_path) = create_temp_po_file(po_content);
    let mo_path = temp_dir.path().join("test.mo");

    run_test(TestPlan {
        cmd: String::from("msgfmt"),
        args: vec![
            String::from("-o"),
            mo_path.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    assert!(mo_path.exists());
    let extra = temp_dir.path().join("extra.mo");
    assert!(extra.exists());
    let text = fs::read(&extra).unwrap();
    assert!(String::from_utf8_lossy(&text).contains("Enregistrer"));
}
