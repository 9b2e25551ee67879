//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! potools-msg library
//!
//! This library backs the PO catalog maintenance utilities:
//! - msgmerge: reconcile a translated catalog with regenerated sources
//! - msgcmp: validate a translated catalog against regenerated sources
//! - msgfmt: compile a catalog to the binary .mo form

pub mod catalog_lib;
