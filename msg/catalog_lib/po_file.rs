//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) file parser
//!
//! Parses the human-readable catalog format into a `Catalog`:
//! - `#` translator comments, `#.` extracted comments, `#:` source
//!   references, `#,` flags (fuzzy, c-format, wrap)
//! - `domain "name"` directives selecting the sublist for what follows
//! - `msgid` / `msgid_plural` / `msgstr` / `msgstr[N]` with C escape
//!   sequences and multi-line continuation strings
//! - `#~ ` prefixed entries, parsed normally and marked obsolete
//!
//! Errors are accumulated with their positions instead of aborting at
//! the first problem; the caller picks how many to tolerate.  A
//! duplicate msgid within one domain is always an error, reported at
//! both definitions.

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use crate::catalog_lib::catalog::{Catalog, DEFAULT_DOMAIN};
use crate::catalog_lib::message::{
    FilePosition, FormatDirective, Message, MessageList, WrapDirective,
};

/// Errors tolerated before the parser gives up, unless the caller
/// raises the limit
pub const DEFAULT_MAX_ERRORS: usize = 20;

/// One positioned parse problem
#[derive(Debug, Clone)]
pub struct ParseIssue {
    pub pos: FilePosition,
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

/// Error type for .po file parsing
#[derive(Debug)]
pub enum PoError {
    /// I/O error
    Io(std::io::Error),
    /// The file is not a valid catalog; all collected problems
    Invalid(Vec<ParseIssue>),
}

impl fmt::Display for PoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoError::Io(e) => write!(f, "I/O error: {}", e),
            PoError::Invalid(issues) => match issues.len() {
                1 => write!(f, "{}", issues[0]),
                n => write!(f, "{} errors", n),
            },
        }
    }
}

impl std::error::Error for PoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoError {
    fn from(e: std::io::Error) -> Self {
        PoError::Io(e)
    }
}

/// Which string a continuation line extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgid,
    MsgidPlural,
    Msgstr,
    MsgstrVariant(usize),
}

/// Accumulates one entry while its lines are read
#[derive(Default)]
struct EntryBuilder {
    translator_comments: Vec<String>,
    extracted_comments: Vec<String>,
    file_positions: Vec<(String, usize)>,
    is_fuzzy: bool,
    is_format: FormatDirective,
    do_wrap: WrapDirective,
    obsolete: bool,
    msgid: Option<String>,
    msgid_pos: Option<FilePosition>,
    msgid_plural: Option<String>,
    msgstr: Option<String>,
    msgstr_variants: Vec<String>,
    field: Option<Field>,
}

impl EntryBuilder {
    fn started(&self) -> bool {
        self.msgid.is_some()
    }

    fn in_msgstr(&self) -> bool {
        matches!(self.field, Some(Field::Msgstr) | Some(Field::MsgstrVariant(_)))
    }
}

/// An item produced by the parser: a domain switch or a message
enum PoItem {
    Domain(String),
    Entry(Message),
}

/// Parser for .po files
pub struct PoParser<R> {
    reader: BufReader<R>,
    file_name: String,
    line_number: usize,
    peeked: Option<String>,
    max_errors: Option<usize>,
    issues: Vec<ParseIssue>,
    aborted: bool,
}

impl<R: Read> PoParser<R> {
    /// Create a parser; `file_name` is used for diagnostic positions
    pub fn new(reader: R, file_name: impl Into<String>) -> Self {
        PoParser {
            reader: BufReader::new(reader),
            file_name: file_name.into(),
            line_number: 0,
            peeked: None,
            max_errors: Some(DEFAULT_MAX_ERRORS),
            issues: Vec::new(),
            aborted: false,
        }
    }

    /// Never abort on accumulated errors; the merge tools want the full
    /// inventory
    pub fn unlimited_errors(mut self) -> Self {
        self.max_errors = None;
        self
    }

    /// Parse the whole input into a catalog
    pub fn parse(mut self) -> Result<Catalog, PoError> {
        let mut catalog = Catalog::new();
        let mut domain = DEFAULT_DOMAIN.to_string();

        while !self.aborted {
            match self.parse_item()? {
                Some(PoItem::Domain(name)) => {
                    catalog.sublist_or_create(&name);
                    domain = name;
                }
                Some(PoItem::Entry(entry)) => {
                    let mlp = catalog.sublist_or_create(&domain);
                    Self::append_unique(
                        mlp,
                        entry,
                        &mut self.issues,
                        self.max_errors,
                        &mut self.aborted,
                    );
                }
                None => break,
            }
        }

        if self.issues.is_empty() {
            Ok(catalog)
        } else {
            Err(PoError::Invalid(self.issues))
        }
    }

    /// Append an entry, enforcing msgid uniqueness within the list
    fn append_unique(
        mlp: &mut MessageList,
        entry: Message,
        issues: &mut Vec<ParseIssue>,
        max_errors: Option<usize>,
        aborted: &mut bool,
    ) {
        if let Some(first) = mlp.search(&entry.msgid) {
            issues.push(ParseIssue {
                pos: entry.pos.clone(),
                message: "duplicate message definition".to_string(),
            });
            issues.push(ParseIssue {
                pos: first.pos.clone(),
                message: "...this is the location of the first definition".to_string(),
            });
            if let Some(max) = max_errors {
                if issues.len() >= max {
                    *aborted = true;
                }
            }
        } else {
            mlp.append(entry);
        }
    }

    fn record_issue(&mut self, message: impl Into<String>) {
        self.issues.push(ParseIssue {
            pos: FilePosition::new(&self.file_name, self.line_number),
            message: message.into(),
        });
        if let Some(max) = self.max_errors {
            if self.issues.len() >= max {
                self.aborted = true;
            }
        }
    }

    fn current_pos(&self) -> FilePosition {
        FilePosition::new(&self.file_name, self.line_number)
    }

    /// Read the next line, handling the peeked line
    fn next_line(&mut self) -> Result<Option<String>, PoError> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }

        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        Ok(Some(line.trim_end().to_string()))
    }

    /// Put back a line to be read again
    fn unread_line(&mut self, line: String) {
        self.peeked = Some(line);
    }

    /// Parse the next domain directive or message entry
    fn parse_item(&mut self) -> Result<Option<PoItem>, PoError> {
        let mut b = EntryBuilder::default();

        loop {
            if self.aborted {
                break;
            }

            let raw = match self.next_line()? {
                Some(line) => line,
                None => break,
            };

            if raw.is_empty() {
                if b.started() {
                    break;
                }
                continue;
            }

            // An obsolete entry is an ordinary entry behind "#~ "
            // prefixes; continuation lines carry the prefix too.
            let (line, line_obsolete) = match raw.strip_prefix("#~") {
                Some(rest) => (rest.trim_start().to_string(), true),
                None => (raw.clone(), false),
            };

            // Transition between obsolete and live content ends the
            // current entry.
            if b.started() && b.obsolete != line_obsolete {
                self.unread_line(raw);
                break;
            }

            if let Some(rest) = line.strip_prefix('#') {
                // A comment after the translation starts the next entry.
                if b.in_msgstr() {
                    self.unread_line(raw);
                    break;
                }
                b.obsolete |= line_obsolete;
                self.parse_comment(&mut b, rest);
            } else if let Some(rest) = line.strip_prefix("domain") {
                if b.started() {
                    self.unread_line(raw);
                    break;
                }
                match self.parse_quoted(rest.trim()) {
                    Ok(name) => return Ok(Some(PoItem::Domain(name))),
                    Err(e) => {
                        self.record_issue(e);
                        continue;
                    }
                }
            } else if let Some(rest) = line.strip_prefix("msgid_plural") {
                b.obsolete |= line_obsolete;
                match self.parse_quoted(rest.trim()) {
                    Ok(value) => {
                        b.msgid_plural = Some(value);
                        b.field = Some(Field::MsgidPlural);
                    }
                    Err(e) => self.record_issue(e),
                }
            } else if let Some(rest) = line.strip_prefix("msgstr[") {
                b.obsolete |= line_obsolete;
                self.parse_msgstr_variant(&mut b, rest);
            } else if let Some(rest) = line.strip_prefix("msgstr") {
                b.obsolete |= line_obsolete;
                match self.parse_quoted(rest.trim()) {
                    Ok(value) => {
                        b.msgstr = Some(value);
                        b.field = Some(Field::Msgstr);
                    }
                    Err(e) => self.record_issue(e),
                }
            } else if let Some(rest) = line.strip_prefix("msgid") {
                if b.started() {
                    self.unread_line(raw);
                    break;
                }
                b.obsolete |= line_obsolete;
                match self.parse_quoted(rest.trim()) {
                    Ok(value) => {
                        b.msgid = Some(value);
                        b.msgid_pos = Some(self.current_pos());
                        b.field = Some(Field::Msgid);
                    }
                    Err(e) => self.record_issue(e),
                }
            } else if line.starts_with('"') {
                match self.parse_quoted(&line) {
                    Ok(value) => self.append_continuation(&mut b, &value),
                    Err(e) => self.record_issue(e),
                }
            } else {
                let keyword: String = line.chars().take_while(|c| !c.is_whitespace()).collect();
                self.record_issue(format!("keyword \"{}\" unknown", keyword));
            }
        }

        self.finish_entry(b)
    }

    /// `msgstr[N] "..."` plural variant
    fn parse_msgstr_variant(&mut self, b: &mut EntryBuilder, rest: &str) {
        let Some(idx_end) = rest.find(']') else {
            self.record_issue("missing ']' in msgstr index");
            return;
        };
        let idx: usize = match rest[..idx_end].parse() {
            Ok(idx) => idx,
            Err(_) => {
                self.record_issue("invalid msgstr index");
                return;
            }
        };
        match self.parse_quoted(rest[idx_end + 1..].trim()) {
            Ok(value) => {
                while b.msgstr_variants.len() <= idx {
                    b.msgstr_variants.push(String::new());
                }
                b.msgstr_variants[idx] = value;
                b.field = Some(Field::MsgstrVariant(idx));
            }
            Err(e) => self.record_issue(e),
        }
    }

    /// Append a standalone `"..."` line to the string it continues
    fn append_continuation(&mut self, b: &mut EntryBuilder, value: &str) {
        match b.field {
            Some(Field::Msgid) => b.msgid.get_or_insert_with(String::new).push_str(value),
            Some(Field::MsgidPlural) => {
                b.msgid_plural.get_or_insert_with(String::new).push_str(value)
            }
            Some(Field::Msgstr) => b.msgstr.get_or_insert_with(String::new).push_str(value),
            Some(Field::MsgstrVariant(idx)) => {
                if let Some(variant) = b.msgstr_variants.get_mut(idx) {
                    variant.push_str(value);
                }
            }
            None => self.record_issue("string continuation without a keyword"),
        }
    }

    /// Parse a comment line body (everything after `#`)
    fn parse_comment(&mut self, b: &mut EntryBuilder, rest: &str) {
        if let Some(content) = rest.strip_prefix('.') {
            b.extracted_comments.push(content.trim().to_string());
        } else if let Some(content) = rest.strip_prefix(':') {
            for token in content.split_whitespace() {
                match token.rsplit_once(':').and_then(|(file, line)| {
                    line.parse::<usize>().ok().map(|line| (file, line))
                }) {
                    Some((file, line)) => b.file_positions.push((file.to_string(), line)),
                    None => b.file_positions.push((token.to_string(), 0)),
                }
            }
        } else if let Some(content) = rest.strip_prefix(',') {
            for flag in content.split(',') {
                if flag.trim() == "fuzzy" {
                    b.is_fuzzy = true;
                }
            }
            let format = FormatDirective::parse(content);
            if format != FormatDirective::Undecided {
                b.is_format = format;
            }
            let wrap = WrapDirective::parse(content);
            if wrap != WrapDirective::Undecided {
                b.do_wrap = wrap;
            }
        } else if rest.starts_with('|') {
            // previous-msgid comments are regenerated on every merge;
            // nothing to keep
        } else {
            b.translator_comments.push(rest.trim().to_string());
        }
    }

    /// Turn a finished builder into a message
    fn finish_entry(&mut self, b: EntryBuilder) -> Result<Option<PoItem>, PoError> {
        let Some(msgid) = b.msgid else {
            // trailing comments without a message are dropped
            if b.msgstr.is_some() || !b.msgstr_variants.is_empty() {
                self.record_issue("msgstr without msgid");
            }
            return Ok(None);
        };

        let msgstr = if b.msgstr_variants.is_empty() {
            b.msgstr.unwrap_or_default()
        } else {
            b.msgstr_variants.join("\0")
        };

        let mut entry = Message::new(
            msgid,
            b.msgid_plural,
            msgstr,
            b.msgid_pos
                .unwrap_or_else(|| FilePosition::new(&self.file_name, self.line_number)),
        );
        entry.translator_comments = b.translator_comments;
        entry.extracted_comments = b.extracted_comments;
        for (file, line) in b.file_positions {
            entry.add_file_position(&file, line);
        }
        entry.is_fuzzy = b.is_fuzzy;
        entry.is_format = b.is_format;
        entry.do_wrap = b.do_wrap;
        entry.obsolete = b.obsolete;

        Ok(Some(PoItem::Entry(entry)))
    }

    /// Parse a quoted string with escape sequences; continuation onto
    /// following lines is handled by the caller
    fn parse_quoted(&self, s: &str) -> Result<String, String> {
        let s = s.trim();
        if !s.starts_with('"') {
            return Err("expected quoted string".to_string());
        }

        let mut result = String::new();
        let mut chars = s[1..].chars();

        loop {
            match chars.next() {
                None => return Err("unterminated string".to_string()),
                Some('"') => break,
                Some('\\') => match chars.next() {
                    None => return Err("unterminated string".to_string()),
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('0') => result.push('\0'),
                    Some(c) => return Err(format!("invalid escape \\{}", c)),
                },
                Some(c) => result.push(c),
            }
        }

        Ok(result)
    }
}
