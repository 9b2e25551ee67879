//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Exact and fuzzy lookup across a chain of message lists
//!
//! Reconciliation looks messages up in a `DefinitionChain`: the primary
//! definitions list first, then any compendium lists.  Exact lookup
//! short-circuits at the first hit.  Fuzzy lookup deliberately does NOT
//! short-circuit: it scans every list in the chain and keeps the single
//! best-scoring candidate, so a compendium may still provide a better
//! suggestion than the primary list.  That asymmetry is part of the
//! contract, not an accident.

use strsim::normalized_levenshtein;

use crate::catalog_lib::message::{Message, MessageList};

/// A fuzzy candidate is accepted only with a similarity strictly above
/// this weight.
pub const FUZZY_THRESHOLD: f64 = 0.6;

impl MessageList {
    /// Best fuzzy candidate strictly above `best_weight`, raising
    /// `best_weight` as better candidates are found.  Untranslated
    /// entries are skipped.
    fn search_fuzzy_inner(&self, msgid: &str, best_weight: &mut f64) -> Option<usize> {
        let mut best = None;
        for (idx, mp) in self.iter().enumerate() {
            if !mp.is_translated() {
                continue;
            }
            let weight = normalized_levenshtein(msgid, &mp.msgid);
            if weight > *best_weight {
                *best_weight = weight;
                best = Some(idx);
            }
        }
        best
    }

    /// Best-scoring message whose msgid is similar to `msgid`, or none
    /// if no translated candidate scores strictly above the threshold
    pub fn search_fuzzy(&self, msgid: &str) -> Option<&Message> {
        let mut best_weight = FUZZY_THRESHOLD;
        self.search_fuzzy_inner(msgid, &mut best_weight)
            .and_then(|idx| self.get(idx))
    }
}

/// A lookup result, remembering whether the hit came from the primary
/// definitions list (only those hits are marked used by reconciliation)
#[derive(Debug, Clone, Copy)]
pub struct ChainHit<'a> {
    pub message: &'a Message,
    /// Index in the primary list, if the hit came from there
    pub primary_index: Option<usize>,
}

/// The ordered set of places to look for message definitions: the current
/// domain's definitions list, then the compendium lists.  Compendiums are
/// read-only reference material.
pub struct DefinitionChain<'a> {
    primary: &'a MessageList,
    compendiums: &'a [&'a MessageList],
}

impl<'a> DefinitionChain<'a> {
    pub fn new(primary: &'a MessageList, compendiums: &'a [&'a MessageList]) -> Self {
        DefinitionChain {
            primary,
            compendiums,
        }
    }

    pub fn primary(&self) -> &'a MessageList {
        self.primary
    }

    /// First exact hit scanning the chain in order; a hit in an earlier
    /// list always wins
    pub fn search(&self, msgid: &str) -> Option<ChainHit<'a>> {
        if let Some((idx, mp)) = self.primary.search_indexed(msgid) {
            return Some(ChainHit {
                message: mp,
                primary_index: Some(idx),
            });
        }
        for mlp in self.compendiums {
            if let Some(mp) = mlp.search(msgid) {
                return Some(ChainHit {
                    message: mp,
                    primary_index: None,
                });
            }
        }
        None
    }

    /// Globally best fuzzy candidate across the whole chain; a later
    /// list's candidate overrides an earlier one only if strictly better
    pub fn search_fuzzy(&self, msgid: &str) -> Option<ChainHit<'a>> {
        let mut best_weight = FUZZY_THRESHOLD;
        let mut best = None;

        if let Some(idx) = self.primary.search_fuzzy_inner(msgid, &mut best_weight) {
            best = self.primary.get(idx).map(|mp| ChainHit {
                message: mp,
                primary_index: Some(idx),
            });
        }
        for mlp in self.compendiums {
            if let Some(idx) = mlp.search_fuzzy_inner(msgid, &mut best_weight) {
                best = mlp.get(idx).map(|mp| ChainHit {
                    message: mp,
                    primary_index: None,
                });
            }
        }
        best
    }
}
