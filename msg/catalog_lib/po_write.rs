//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) file writer
//!
//! Serializes a catalog back into the canonical textual form: comment
//! blocks, a `domain "name"` directive ahead of every non-default
//! domain, multi-line strings as continuation segments, and obsolete
//! entries with every directive line behind a `#~ ` prefix.

use std::io::{self, Write};

use crate::catalog_lib::catalog::{Catalog, DEFAULT_DOMAIN};
use crate::catalog_lib::message::Message;

/// C-style escaping for one output segment, without line breaking
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Write `keyword "value"`, breaking values with embedded newlines into
/// an empty first segment plus one segment per line
fn write_string<W: Write>(
    w: &mut W,
    prefix: &str,
    keyword: &str,
    value: &str,
) -> io::Result<()> {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        writeln!(w, "{}{} {}", prefix, keyword, quote(value))
    } else {
        writeln!(w, "{}{} \"\"", prefix, keyword)?;
        for segment in segments {
            writeln!(w, "{}{}", prefix, quote(segment))?;
        }
        Ok(())
    }
}

fn write_message<W: Write>(w: &mut W, mp: &Message) -> io::Result<()> {
    for comment in &mp.translator_comments {
        writeln!(w, "# {}", comment)?;
    }
    for comment in &mp.extracted_comments {
        writeln!(w, "#. {}", comment)?;
    }
    for pos in &mp.file_positions {
        writeln!(w, "#: {}:{}", pos.file, pos.line)?;
    }

    let mut flags: Vec<&str> = Vec::new();
    if mp.is_fuzzy {
        flags.push("fuzzy");
    }
    if let Some(keyword) = mp.is_format.keyword() {
        flags.push(keyword);
    }
    if let Some(keyword) = mp.do_wrap.keyword() {
        flags.push(keyword);
    }
    if !flags.is_empty() {
        writeln!(w, "#, {}", flags.join(", "))?;
    }

    // Only the directive lines carry the obsolete prefix; comments
    // stay as they are.
    let prefix = if mp.obsolete { "#~ " } else { "" };

    write_string(w, prefix, "msgid", &mp.msgid)?;
    match mp.msgid_plural {
        Some(ref plural) => {
            write_string(w, prefix, "msgid_plural", plural)?;
            for (idx, variant) in mp.msgstr_variants().enumerate() {
                write_string(w, prefix, &format!("msgstr[{}]", idx), variant)?;
            }
        }
        None => write_string(w, prefix, "msgstr", &mp.msgstr)?,
    }
    Ok(())
}

/// Serialize a catalog in canonical PO form
pub fn write_po<W: Write>(w: &mut W, catalog: &Catalog) -> io::Result<()> {
    let mut first = true;
    for domain in catalog.domains() {
        if domain.messages.is_empty() {
            continue;
        }
        if domain.name != DEFAULT_DOMAIN {
            if !first {
                writeln!(w)?;
            }
            writeln!(w, "domain {}", quote(&domain.name))?;
            first = false;
        }
        for mp in &domain.messages {
            if !first {
                writeln!(w)?;
            }
            write_message(w, mp)?;
            first = false;
        }
    }
    Ok(())
}

/// Serialize a catalog to a string; handy for tests and --update
pub fn po_to_string(catalog: &Catalog) -> String {
    let mut out = Vec::new();
    write_po(&mut out, catalog).expect("write to Vec cannot fail");
    String::from_utf8(out).expect("catalog text is valid UTF-8")
}
