//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Domain list: the in-memory form of one PO catalog
//!
//! A catalog is an ordered list of named domains, each owning one message
//! list.  Almost every real-world catalog only ever uses the default
//! domain, which has the empty name and is conventionally first.

use crate::catalog_lib::message::{Message, MessageList};

/// Name of the implicit default domain.  It is never written with an
/// explicit `domain` directive.
pub const DEFAULT_DOMAIN: &str = "";

/// A named sub-catalog
#[derive(Debug, Clone, Default)]
pub struct MessageDomain {
    pub name: String,
    pub messages: MessageList,
}

/// Insertion-ordered list of domains
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    domains: Vec<MessageDomain>,
}

impl Catalog {
    /// An empty catalog containing only the default domain
    pub fn new() -> Self {
        Catalog {
            domains: vec![MessageDomain {
                name: DEFAULT_DOMAIN.to_string(),
                messages: MessageList::new(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn domains(&self) -> std::slice::Iter<'_, MessageDomain> {
        self.domains.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MessageDomain> {
        self.domains.get(index)
    }

    /// Message list of a domain, if that domain exists
    pub fn sublist(&self, name: &str) -> Option<&MessageList> {
        self.domains
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.messages)
    }

    pub fn sublist_mut(&mut self, name: &str) -> Option<&mut MessageList> {
        self.domains
            .iter_mut()
            .find(|d| d.name == name)
            .map(|d| &mut d.messages)
    }

    /// Message list of a domain, creating the domain at the end of the
    /// list if it does not exist yet
    pub fn sublist_or_create(&mut self, name: &str) -> &mut MessageList {
        if let Some(idx) = self.domains.iter().position(|d| d.name == name) {
            return &mut self.domains[idx].messages;
        }
        self.domains.push(MessageDomain {
            name: name.to_string(),
            messages: MessageList::new(),
        });
        &mut self.domains.last_mut().unwrap().messages
    }

    /// Total number of messages across all domains
    pub fn message_count(&self) -> usize {
        self.domains.iter().map(|d| d.messages.len()).sum()
    }

    /// Stable lexicographic msgid order, per domain
    pub fn sort_by_msgid(&mut self) {
        for domain in &mut self.domains {
            domain.messages.sort_by(|a, b| a.msgid.cmp(&b.msgid));
        }
    }

    /// Stable order by first source reference (file name, then line),
    /// msgid as tiebreaker; entries without references sort first
    pub fn sort_by_filepos(&mut self) {
        for domain in &mut self.domains {
            domain.messages.sort_by(|a, b| {
                let pa = a.file_positions.first();
                let pb = b.file_positions.first();
                pa.cmp(&pb).then_with(|| a.msgid.cmp(&b.msgid))
            });
        }
    }
}

/// Structural equality of two catalogs, used by msgmerge --update to
/// detect that nothing changed.  Domain order and message order matter,
/// diagnostic positions do not.
pub fn catalogs_equal(a: &Catalog, b: &Catalog) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.domains().zip(b.domains()).all(|(da, db)| {
        da.name == db.name
            && da.messages.len() == db.messages.len()
            && da
                .messages
                .iter()
                .zip(db.messages.iter())
                .all(|(ma, mb)| messages_equal(ma, mb))
    })
}

fn messages_equal(a: &Message, b: &Message) -> bool {
    a.msgid == b.msgid
        && a.msgid_plural == b.msgid_plural
        && a.msgstr == b.msgstr
        && a.translator_comments == b.translator_comments
        && a.extracted_comments == b.extracted_comments
        && a.file_positions == b.file_positions
        && a.is_fuzzy == b.is_fuzzy
        && a.is_format == b.is_format
        && a.do_wrap == b.do_wrap
        && a.obsolete == b.obsolete
}
