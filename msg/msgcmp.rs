//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! msgcmp - compare a translated catalog with a regenerated template
//!
//! Checks that every message referenced by ref.pot has an exact
//! definition in def.po.  A merely similar definition is reported as a
//! hint but still counts as an error: msgcmp is the strict gatekeeper,
//! unlike msgmerge which happily carries fuzzy matches forward.

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use potools_msg::catalog_lib::catalog::Catalog;
use potools_msg::catalog_lib::merge::compare_catalogs;
use potools_msg::catalog_lib::po_file::{PoError, PoParser};
use std::path::PathBuf;
use std::process::exit;

/// msgcmp - compare a translated catalog with a regenerated template
#[derive(Parser)]
#[command(
    version,
    about = gettext("msgcmp - compare a translated catalog with a regenerated template"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'm', long = "multi-domain", help = gettext("Apply ref.pot to each of the domains in def.po"))]
    multi_domain: bool,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(value_name = "def.po", help = gettext("Translations referring to old sources"))]
    definitions: PathBuf,

    #[arg(value_name = "ref.pot", help = gettext("References to new sources"))]
    reference: PathBuf,
}

fn read_catalog(path: &PathBuf) -> Catalog {
    let reader = match plib::io::input_stream(path, true) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("msgcmp: {}: {}", path.display(), e);
            exit(1);
        }
    };
    let parser = PoParser::new(reader, path.display().to_string()).unlimited_errors();
    match parser.parse() {
        Ok(catalog) => catalog,
        Err(PoError::Io(e)) => {
            eprintln!("msgcmp: {}: {}", path.display(), e);
            exit(1);
        }
        Err(PoError::Invalid(issues)) => {
            for issue in &issues {
                eprintln!("msgcmp: {}", issue);
            }
            eprintln!(
                "msgcmp: {}: {}",
                path.display(),
                gettext("file is not a valid message catalog")
            );
            exit(1);
        }
    }
}

fn main() {
    setlocale(LocaleCategory::LcAll, "");
    if textdomain("potools-rs").is_err() {
        // Ignore error - translation may not be available
    }
    let _ = bind_textdomain_codeset("potools-rs", "UTF-8");

    let args = Args::parse();

    let definitions = read_catalog(&args.definitions);
    let reference = read_catalog(&args.reference);

    let definitions_name = args.definitions.display().to_string();
    let result = compare_catalogs(
        &definitions_name,
        &definitions,
        &reference,
        args.multi_domain,
    );

    for diagnostic in &result.errors {
        eprintln!("msgcmp: {}", diagnostic);
    }
    for diagnostic in &result.warnings {
        eprintln!("msgcmp: {}", diagnostic);
    }

    if result.error_count > 0 {
        let message = if result.error_count == 1 {
            gettext!("found {} fatal error", result.error_count)
        } else {
            gettext!("found {} fatal errors", result.error_count)
        };
        eprintln!("msgcmp: {}", message);
        exit(1);
    }

    exit(0);
}
