//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog reconciliation
//!
//! The merge walks a freshly regenerated reference catalog and matches
//! every entry against the translated definitions catalog (plus optional
//! compendiums).  Translations that still apply are carried over, near
//! matches are carried over fuzzy, new strings come through untranslated,
//! and definitions no longer referenced are retired as obsolete entries.
//! Translator work is never silently discarded.
//!
//! The compare variant runs the same matching but produces diagnostics
//! instead of an output catalog, and treats anything short of an exact
//! match as an error.

use std::fmt;

use crate::catalog_lib::catalog::{Catalog, DEFAULT_DOMAIN};
use crate::catalog_lib::header::merge_header;
use crate::catalog_lib::message::{FilePosition, Message, MessageList};
use crate::catalog_lib::search::DefinitionChain;

/// Counters aggregated across all domains of one reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Exact matches carried over
    pub merged: usize,
    /// Similarity matches carried over with the fuzzy flag forced on
    pub fuzzied: usize,
    /// Reference entries with no usable definition, copied untranslated
    pub missing: usize,
    /// Definitions no longer referenced, retired into the output
    pub obsolete: usize,
}

/// How bad a diagnostic is; compare mode accumulates errors, merge mode
/// only ever produces notes and warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

/// A positioned message for the user
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub pos: FilePosition,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.pos,
            self.severity.as_str(),
            self.message
        )
    }
}

/// Result of a merge run: the reconciled catalog plus bookkeeping
#[derive(Debug)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub stats: MergeStats,
    /// Similarity hints and not-defined notes, for verbose output
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a compare run
#[derive(Debug)]
pub struct CompareResult {
    /// Reference entries without an exact definition (with similarity
    /// hints where a fuzzy candidate exists)
    pub errors: Vec<Diagnostic>,
    /// Definitions never referenced
    pub warnings: Vec<Diagnostic>,
    /// Number of reference entries counted as errors
    pub error_count: usize,
}

/// Run-private used-ness bookkeeping, parallel to the definitions
/// catalog.  Kept out of `Message` so no transient state leaks into
/// catalogs shared across runs.
struct UsedMarks {
    marks: Vec<Vec<bool>>,
}

impl UsedMarks {
    fn new(definitions: &Catalog) -> Self {
        UsedMarks {
            marks: definitions
                .domains()
                .map(|d| vec![false; d.messages.len()])
                .collect(),
        }
    }

    fn mark(&mut self, domain: usize, index: usize) {
        self.marks[domain][index] = true;
    }

    fn is_used(&self, domain: usize, index: usize) -> bool {
        self.marks[domain][index]
    }
}

/// Combine a matched (definition, reference) pair into one output
/// message.  Human work (translation, translator comments, fuzzy state)
/// comes from the definition; everything re-derivable from source code
/// (msgid, extracted comments, references, format/wrap flags) is
/// refreshed from the reference.  The header translation is merged
/// field by field instead of carried verbatim.
pub fn merge_message(def: &Message, reference: &Message) -> Message {
    let msgstr = if reference.is_header() {
        merge_header(&def.msgstr, &reference.msgstr)
    } else {
        def.msgstr.clone()
    };

    Message {
        msgid: reference.msgid.clone(),
        msgid_plural: reference.msgid_plural.clone(),
        msgstr,
        translator_comments: def.translator_comments.clone(),
        extracted_comments: reference.extracted_comments.clone(),
        file_positions: reference.file_positions.clone(),
        pos: def.pos.clone(),
        is_fuzzy: def.is_fuzzy,
        is_format: reference.is_format,
        do_wrap: reference.do_wrap,
        obsolete: false,
    }
}

/// Position attached to entries this run synthesizes itself
fn generated_position() -> FilePosition {
    FilePosition::new("(generated)", 0)
}

fn not_defined_note(pos: &FilePosition, definitions_path: &str) -> Diagnostic {
    Diagnostic {
        pos: pos.clone(),
        severity: Severity::Note,
        message: format!("this message is used but not defined in {}", definitions_path),
    }
}

/// Match one reference list against a definition chain, appending the
/// reconciled entries to `result` in reference order.
#[allow(clippy::too_many_arguments)]
fn match_domain(
    definitions_path: &str,
    def_domain: usize,
    chain: &DefinitionChain,
    refmlp: &MessageList,
    result: &mut MessageList,
    stats: &mut MergeStats,
    diagnostics: &mut Vec<Diagnostic>,
    used: &mut UsedMarks,
) {
    // Every run reconciles exactly one header; synthesize one when the
    // reference catalog carries none.
    let synthetic_header = if refmlp.search("").is_none() {
        Some(Message::new("", None, "", generated_position()))
    } else {
        None
    };

    for refmsg in synthetic_header.iter().chain(refmlp.iter()) {
        if let Some(hit) = chain.search(&refmsg.msgid) {
            let mp = merge_message(hit.message, refmsg);
            result.append(mp);
            if let Some(idx) = hit.primary_index {
                used.mark(def_domain, idx);
            }
            stats.merged += 1;
        } else if !refmsg.msgid.is_empty() {
            // Not defined at all; a very similar definition may be a
            // typo fix, so carry it over for translator review.
            if let Some(hit) = chain.search_fuzzy(&refmsg.msgid) {
                diagnostics.push(Diagnostic {
                    pos: refmsg.pos.clone(),
                    severity: Severity::Note,
                    message: "this message is used but not defined...".to_string(),
                });
                diagnostics.push(Diagnostic {
                    pos: hit.message.pos.clone(),
                    severity: Severity::Note,
                    message: "...but this definition is similar".to_string(),
                });

                let mut mp = merge_message(hit.message, refmsg);
                mp.is_fuzzy = true;
                result.append(mp);
                if let Some(idx) = hit.primary_index {
                    used.mark(def_domain, idx);
                }
                stats.fuzzied += 1;
            } else {
                diagnostics.push(not_defined_note(&refmsg.pos, definitions_path));
                result.append(refmsg.clone());
                stats.missing += 1;
            }
        } else {
            // Header without any definition: still run the field merge
            // against an empty definitions side so the output gets a
            // header carrying the reference's creation date.
            let empty = Message::new("", None, "", generated_position());
            result.append(merge_message(&empty, refmsg));
            stats.missing += 1;
        }
    }
}

/// Reconcile a definitions catalog against a reference catalog.
///
/// In the default per-domain mode each reference domain is matched
/// against the same-named definitions domain.  In multi-domain mode the
/// reference's default-domain list fans out across every definitions
/// domain (skipping an empty default definitions domain).  Compendium
/// lists extend each lookup chain but are never mutated and never
/// contribute obsolete entries.
pub fn merge_catalogs(
    definitions_path: &str,
    definitions: &Catalog,
    reference: &Catalog,
    compendiums: &[&MessageList],
    multi_domain: bool,
) -> MergeOutcome {
    let mut result = Catalog::new();
    let mut stats = MergeStats::default();
    let mut diagnostics = Vec::new();
    let mut used = UsedMarks::new(definitions);
    let empty_list = MessageList::new();

    if !multi_domain {
        for refdom in reference.domains() {
            let (def_domain, defmlp) = definitions
                .domains()
                .enumerate()
                .find(|(_, d)| d.name == refdom.name)
                .map(|(k, d)| (k, &d.messages))
                // An absent definitions domain participates as an empty
                // list; index 0 is safe since nothing gets marked there.
                .unwrap_or((0, &empty_list));

            let chain = DefinitionChain::new(defmlp, compendiums);
            let mut domain_result = MessageList::new();
            match_domain(
                definitions_path,
                def_domain,
                &chain,
                &refdom.messages,
                &mut domain_result,
                &mut stats,
                &mut diagnostics,
                &mut used,
            );
            *result.sublist_or_create(&refdom.name) = domain_result;
        }
    } else {
        // One reference set, applied to each definitions domain.
        let refmlp = reference
            .sublist(DEFAULT_DOMAIN)
            .unwrap_or(&empty_list);

        for (k, defdom) in definitions.domains().enumerate() {
            if defdom.name == DEFAULT_DOMAIN && defdom.messages.is_empty() {
                continue;
            }
            let chain = DefinitionChain::new(&defdom.messages, compendiums);
            let mut domain_result = MessageList::new();
            match_domain(
                definitions_path,
                k,
                &chain,
                refmlp,
                &mut domain_result,
                &mut stats,
                &mut diagnostics,
                &mut used,
            );
            *result.sublist_or_create(&defdom.name) = domain_result;
        }
    }

    // Retire definitions that matched nothing.  The old translation is
    // kept in the output, marked obsolete, for audit and recovery.
    // Compendiums are deliberately not scanned.
    for (k, defdom) in definitions.domains().enumerate() {
        for (j, defmsg) in defdom.messages.iter().enumerate() {
            if !used.is_used(k, j) {
                let mut mp = defmsg.clone();
                mp.obsolete = true;
                result.sublist_or_create(&defdom.name).append(mp);
                stats.obsolete += 1;
            }
        }
    }

    MergeOutcome {
        catalog: result,
        stats,
        diagnostics,
    }
}

/// Match one reference list against one definitions list in compare
/// mode: no output, every non-exact match of a real msgid is an error.
fn compare_domain(
    definitions_path: &str,
    def_domain: usize,
    defmlp: &MessageList,
    refmlp: &MessageList,
    result: &mut CompareResult,
    used: &mut UsedMarks,
) {
    for refmsg in refmlp.iter() {
        if let Some((idx, _)) = defmlp.search_indexed(&refmsg.msgid) {
            used.mark(def_domain, idx);
        } else if !refmsg.msgid.is_empty() {
            result.error_count += 1;
            if let Some((idx, defmsg)) = defmlp
                .search_fuzzy(&refmsg.msgid)
                .and_then(|mp| defmlp.search_indexed(&mp.msgid))
            {
                result.errors.push(Diagnostic {
                    pos: refmsg.pos.clone(),
                    severity: Severity::Error,
                    message: "this message is used but not defined...".to_string(),
                });
                result.errors.push(Diagnostic {
                    pos: defmsg.pos.clone(),
                    severity: Severity::Note,
                    message: "...but this definition is similar".to_string(),
                });
                used.mark(def_domain, idx);
            } else {
                result.errors.push(Diagnostic {
                    pos: refmsg.pos.clone(),
                    severity: Severity::Error,
                    message: format!(
                        "this message is used but not defined in {}",
                        definitions_path
                    ),
                });
            }
        }
    }
}

/// Validate a definitions catalog against a reference catalog.
///
/// Stricter than merging: a fuzzy-only match still counts as an error.
/// All errors are accumulated and reported together, never just the
/// first.
pub fn compare_catalogs(
    definitions_path: &str,
    definitions: &Catalog,
    reference: &Catalog,
    multi_domain: bool,
) -> CompareResult {
    let mut result = CompareResult {
        errors: Vec::new(),
        warnings: Vec::new(),
        error_count: 0,
    };
    let mut used = UsedMarks::new(definitions);
    let empty_list = MessageList::new();

    if !multi_domain {
        for refdom in reference.domains() {
            let (def_domain, defmlp) = definitions
                .domains()
                .enumerate()
                .find(|(_, d)| d.name == refdom.name)
                .map(|(k, d)| (k, &d.messages))
                .unwrap_or((0, &empty_list));

            compare_domain(
                definitions_path,
                def_domain,
                defmlp,
                &refdom.messages,
                &mut result,
                &mut used,
            );
        }
    } else {
        let refmlp = reference
            .sublist(DEFAULT_DOMAIN)
            .unwrap_or(&empty_list);

        for (k, defdom) in definitions.domains().enumerate() {
            if defdom.name == DEFAULT_DOMAIN && defdom.messages.is_empty() {
                continue;
            }
            compare_domain(
                definitions_path,
                k,
                &defdom.messages,
                refmlp,
                &mut result,
                &mut used,
            );
        }
    }

    for (k, defdom) in definitions.domains().enumerate() {
        for (j, defmsg) in defdom.messages.iter().enumerate() {
            if !used.is_used(k, j) {
                result.warnings.push(Diagnostic {
                    pos: defmsg.pos.clone(),
                    severity: Severity::Warning,
                    message: "this message is not used".to_string(),
                });
            }
        }
    }

    result
}
