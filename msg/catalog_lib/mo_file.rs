//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! GNU .mo file format writer
//!
//! The .mo (Machine Object) format is the binary form consumed by
//! gettext at runtime.  Only domain message lists are representable:
//! flags and comments do not survive compilation.  Plural messages are
//! encoded with NUL-joined msgid/msgid_plural keys and NUL-joined
//! translation variants, which is exactly how `Message` stores its
//! msgstr already.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::catalog_lib::message::MessageList;

/// Magic number of a little-endian .mo file
pub const MO_MAGIC_LE: u32 = 0x950412de;

/// Size of the fixed header: 7 u32 fields
pub const MO_HEADER_SIZE: u32 = 28;

/// Size of one (length, offset) string descriptor
pub const MO_DESCRIPTOR_SIZE: u32 = 8;

/// Compile a message list into .mo format.
///
/// Obsolete entries never reach the binary form.  Fuzzy entries are
/// dropped unless `include_fuzzy` is set, and untranslated entries are
/// always dropped; a lookup miss at runtime falls back to the msgid
/// anyway.  The string table is sorted by msgid, empty (header) first.
pub fn write_mo<W: Write>(w: &mut W, messages: &MessageList, include_fuzzy: bool) -> io::Result<()> {
    let mut entries: Vec<(String, &str)> = Vec::new();
    for mp in messages {
        if mp.obsolete {
            continue;
        }
        if mp.is_fuzzy && !include_fuzzy {
            continue;
        }
        if !mp.is_header() && !mp.is_translated() {
            continue;
        }
        let key = match mp.msgid_plural {
            Some(ref plural) => format!("{}\0{}", mp.msgid, plural),
            None => mp.msgid.clone(),
        };
        entries.push((key, &mp.msgstr));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let nstrings = entries.len() as u32;
    let orig_tab_offset = MO_HEADER_SIZE;
    let trans_tab_offset = orig_tab_offset + nstrings * MO_DESCRIPTOR_SIZE;
    let strings_offset = trans_tab_offset + nstrings * MO_DESCRIPTOR_SIZE;

    // Build string data and the two descriptor tables.
    let mut orig_descriptors: Vec<(u32, u32)> = Vec::new();
    let mut trans_descriptors: Vec<(u32, u32)> = Vec::new();
    let mut string_data: Vec<u8> = Vec::new();

    for (msgid, msgstr) in &entries {
        let offset = strings_offset + string_data.len() as u32;
        orig_descriptors.push((msgid.len() as u32, offset));
        string_data.extend_from_slice(msgid.as_bytes());
        string_data.push(0);

        let offset = strings_offset + string_data.len() as u32;
        trans_descriptors.push((msgstr.len() as u32, offset));
        string_data.extend_from_slice(msgstr.as_bytes());
        string_data.push(0);
    }

    w.write_u32::<LittleEndian>(MO_MAGIC_LE)?;
    w.write_u32::<LittleEndian>(0)?; // revision
    w.write_u32::<LittleEndian>(nstrings)?;
    w.write_u32::<LittleEndian>(orig_tab_offset)?;
    w.write_u32::<LittleEndian>(trans_tab_offset)?;
    w.write_u32::<LittleEndian>(0)?; // hash table size
    w.write_u32::<LittleEndian>(0)?; // hash table offset

    for (len, offset) in &orig_descriptors {
        w.write_u32::<LittleEndian>(*len)?;
        w.write_u32::<LittleEndian>(*offset)?;
    }
    for (len, offset) in &trans_descriptors {
        w.write_u32::<LittleEndian>(*len)?;
        w.write_u32::<LittleEndian>(*offset)?;
    }
    w.write_all(&string_data)?;

    Ok(())
}
