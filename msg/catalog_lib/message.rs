//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Message and message list model
//!
//! A `Message` is a single translatable unit from a PO catalog: a msgid,
//! an optional plural msgid, the translation, comments, source references
//! and flags.  A `MessageList` is the insertion-ordered sequence of
//! messages belonging to one domain.
//!
//! Plural translations are stored NUL-separated inside `msgstr`, the same
//! convention the MO format uses; the variant count is implicit.

use std::fmt;

/// Source position of a catalog entry or reference comment
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilePosition {
    pub file: String,
    pub line: usize,
}

impl FilePosition {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        FilePosition {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Format-string classification carried by a `#,` flag comment
/// (c-format, no-c-format, possible-c-format, impossible-c-format)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatDirective {
    #[default]
    Undecided,
    Yes,
    No,
    Possible,
    Impossible,
}

impl FormatDirective {
    /// Classify a `#,` flag comment.  The negated forms must be tested
    /// first since "c-format" is a substring of all of them.
    pub fn parse(s: &str) -> Self {
        if s.contains("no-c-format") {
            FormatDirective::No
        } else if s.contains("impossible-c-format") {
            FormatDirective::Impossible
        } else if s.contains("possible-c-format") {
            FormatDirective::Possible
        } else if s.contains("c-format") {
            FormatDirective::Yes
        } else {
            FormatDirective::Undecided
        }
    }

    /// The flag keyword for output, if any
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            FormatDirective::Undecided => None,
            FormatDirective::Yes => Some("c-format"),
            FormatDirective::No => Some("no-c-format"),
            FormatDirective::Possible => Some("possible-c-format"),
            FormatDirective::Impossible => Some("impossible-c-format"),
        }
    }
}

/// Line-wrapping preference carried by a `#,` flag comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapDirective {
    #[default]
    Undecided,
    Yes,
    No,
}

impl WrapDirective {
    pub fn parse(s: &str) -> Self {
        if s.contains("no-wrap") {
            WrapDirective::No
        } else if s.contains("wrap") {
            WrapDirective::Yes
        } else {
            WrapDirective::Undecided
        }
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            WrapDirective::Undecided => None,
            WrapDirective::Yes => Some("wrap"),
            WrapDirective::No => Some("no-wrap"),
        }
    }
}

/// A single translatable unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Original string; "" is reserved for the catalog header entry
    pub msgid: String,
    /// Plural original, present iff the message has plural forms
    pub msgid_plural: Option<String>,
    /// Translation; NUL-separated variants when msgid_plural is set
    pub msgstr: String,
    /// Translator comments (`# ...`), human-authored
    pub translator_comments: Vec<String>,
    /// Extracted comments (`#. ...`), generated by the source scanner
    pub extracted_comments: Vec<String>,
    /// Source references (`#: file:line`), kept sorted and de-duplicated
    pub file_positions: Vec<FilePosition>,
    /// Where this entry was defined, for diagnostics
    pub pos: FilePosition,
    /// Entry carries the fuzzy flag (`#, fuzzy`)
    pub is_fuzzy: bool,
    /// Format-string classification (`#, c-format` and friends)
    pub is_format: FormatDirective,
    /// Wrapping preference (`#, wrap` / `#, no-wrap`)
    pub do_wrap: WrapDirective,
    /// Retained-but-unused entry, printed with a `#~ ` prefix
    pub obsolete: bool,
}

impl Message {
    pub fn new(
        msgid: impl Into<String>,
        msgid_plural: Option<String>,
        msgstr: impl Into<String>,
        pos: FilePosition,
    ) -> Self {
        Message {
            msgid: msgid.into(),
            msgid_plural,
            msgstr: msgstr.into(),
            pos,
            ..Default::default()
        }
    }

    /// Check if this is the header entry (empty msgid)
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty()
    }

    /// Check if this is a plural entry
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// Iterate the NUL-separated translation variants
    pub fn msgstr_variants(&self) -> impl Iterator<Item = &str> {
        self.msgstr.split('\0')
    }

    /// True if at least one translation variant is non-empty.  Entries
    /// failing this are invisible to fuzzy search: an untranslated entry
    /// must never be suggested as a similar match.
    pub fn is_translated(&self) -> bool {
        self.msgstr_variants().any(|s| !s.is_empty())
    }

    /// Record a source reference, keeping the list sorted and dropping
    /// exact duplicates.
    pub fn add_file_position(&mut self, file: &str, line: usize) {
        let pos = FilePosition::new(file, line);
        match self.file_positions.binary_search(&pos) {
            Ok(_) => {}
            Err(idx) => self.file_positions.insert(idx, pos),
        }
    }
}

/// Insertion-ordered message sequence owned by one domain.
///
/// msgid uniqueness is enforced by the parser (a duplicate is a hard parse
/// error), so lookups may return the first match.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn new() -> Self {
        MessageList::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Insert at the front; used to synthesize a missing header entry
    pub fn prepend(&mut self, message: Message) {
        self.messages.insert(0, message);
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// First message with a byte-exact msgid, or none
    pub fn search(&self, msgid: &str) -> Option<&Message> {
        self.messages.iter().find(|mp| mp.msgid == msgid)
    }

    /// Like `search`, but yields the message's index as well
    pub fn search_indexed(&self, msgid: &str) -> Option<(usize, &Message)> {
        self.messages
            .iter()
            .enumerate()
            .find(|(_, mp)| mp.msgid == msgid)
    }

    /// Keep only messages satisfying the predicate
    pub fn retain<F: FnMut(&Message) -> bool>(&mut self, predicate: F) {
        self.messages.retain(predicate);
    }

    /// Stable sort of the messages
    pub fn sort_by<F: FnMut(&Message, &Message) -> std::cmp::Ordering>(&mut self, compare: F) {
        self.messages.sort_by(compare);
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
