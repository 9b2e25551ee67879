//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Structured merge of the catalog header entry
//!
//! The header is the distinguished `msgid ""` message whose msgstr holds
//! `Key: value` metadata lines.  When merging, every field keeps the
//! translator's value from the definitions file except POT-Creation-Date,
//! which must always come from the freshly regenerated reference.
//! Unrecognized lines survive verbatim, after the known fields.

/// The known header fields, in their canonical output order
const KNOWN_FIELDS: [&str; 8] = [
    "Project-Id-Version:",
    "POT-Creation-Date:",
    "PO-Revision-Date:",
    "Last-Translator:",
    "Language-Team:",
    "MIME-Version:",
    "Content-Type:",
    "Content-Transfer-Encoding:",
];

const POT_CREATION_DATE: usize = 1;

/// Split a header msgstr into `\n`-terminated lines, synthesizing the
/// final newline if the text does not end with one
fn header_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find('\n') {
            Some(idx) => {
                lines.push(rest[..=idx].to_string());
                rest = &rest[idx + 1..];
            }
            None => {
                lines.push(format!("{}\n", rest));
                break;
            }
        }
    }
    lines
}

/// Case-insensitive field-prefix match, returning the value part
/// (everything after the prefix, newline included).  Compared as bytes:
/// the field names are ASCII, so a match guarantees the split point is
/// a character boundary even when the line itself is not ASCII.
fn match_field<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let n = field.len();
    if line.len() >= n && line.as_bytes()[..n].eq_ignore_ascii_case(field.as_bytes()) {
        Some(&line[n..])
    } else {
        None
    }
}

/// The value of one field in a header text, newline included
pub fn header_field(text: &str, field: &str) -> Option<String> {
    header_lines(text)
        .iter()
        .find_map(|line| match_field(line, field).map(|v| v.to_string()))
}

/// Merge a definitions header with a reference header.
///
/// Known fields are emitted in canonical order with the definitions'
/// values; POT-Creation-Date instead takes the reference's value.  Fields
/// absent on the relevant side are omitted, never defaulted.  Unknown
/// definition lines are appended verbatim, in order, at the end.
pub fn merge_header(definitions: &str, reference: &str) -> String {
    let mut captured: [Option<String>; KNOWN_FIELDS.len()] = Default::default();
    let mut unknown = String::new();

    for line in header_lines(definitions) {
        match KNOWN_FIELDS
            .iter()
            .enumerate()
            .find_map(|(idx, field)| match_field(&line, field).map(|v| (idx, v)))
        {
            Some((idx, value)) => captured[idx] = Some(value.to_string()),
            None => unknown.push_str(&line),
        }
    }

    // The creation date always reflects the regenerated catalog.
    if let Some(value) = header_field(reference, KNOWN_FIELDS[POT_CREATION_DATE]) {
        captured[POT_CREATION_DATE] = Some(value);
    }

    let mut merged = String::new();
    for (idx, field) in KNOWN_FIELDS.iter().enumerate() {
        if let Some(ref value) = captured[idx] {
            merged.push_str(field);
            merged.push_str(value);
        }
    }
    merged.push_str(&unknown);
    merged
}
