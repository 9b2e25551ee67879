//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! msgmerge - merge a translated catalog with a regenerated template
//!
//! The def.po file holds existing translations; ref.pot is the freshly
//! regenerated template with up-to-date source references.  Every
//! translation that still matches is carried over, near matches are
//! carried over fuzzy, and definitions that no longer match anything
//! are kept as obsolete entries.

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use potools_msg::catalog_lib::catalog::{catalogs_equal, Catalog};
use potools_msg::catalog_lib::merge::merge_catalogs;
use potools_msg::catalog_lib::message::MessageList;
use potools_msg::catalog_lib::po_file::{PoError, PoParser};
use potools_msg::catalog_lib::po_write::write_po;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

/// msgmerge - merge a translated catalog with a regenerated template
#[derive(Parser)]
#[command(
    version,
    about = gettext("msgmerge - merge a translated catalog with a regenerated template"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'o', long = "output-file", help = gettext("Write output to the specified file instead of standard output"))]
    output: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "compendium",
        action = clap::ArgAction::Append,
        help = gettext("Additional library of message translations, may be specified more than once")
    )]
    compendiums: Vec<PathBuf>,

    #[arg(short = 'm', long = "multi-domain", help = gettext("Apply ref.pot to each of the domains in def.po"))]
    multi_domain: bool,

    #[arg(short = 'U', long = "update", help = gettext("Update def.po in place, do nothing if def.po is already up to date"))]
    update: bool,

    #[arg(long = "backup", value_name = "CONTROL", help = gettext("Make a backup of def.po (none, numbered, existing, simple)"))]
    backup: Option<String>,

    #[arg(long = "suffix", value_name = "SUFFIX", help = gettext("Override the usual backup suffix"))]
    suffix: Option<String>,

    #[arg(short = 's', long = "sort-output", help = gettext("Generate sorted output"))]
    sort_output: bool,

    #[arg(short = 'F', long = "sort-by-file", help = gettext("Sort output by file location"))]
    sort_by_file: bool,

    #[arg(long = "force-po", help = gettext("Write the PO file even if empty"))]
    force_po: bool,

    #[arg(short = 'q', long = "quiet", help = gettext("Suppress progress indicators"))]
    quiet: bool,

    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help = gettext("Increase verbosity level"))]
    verbose: u8,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(value_name = "def.po", help = gettext("Translations referring to old sources"))]
    definitions: PathBuf,

    #[arg(value_name = "ref.pot", help = gettext("References to new sources"))]
    reference: PathBuf,
}

/// Backup policy for --update, selected by --backup or VERSION_CONTROL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackupType {
    NoBackup,
    Numbered,
    Existing,
    Simple,
}

fn backup_type(control: Option<&str>) -> Result<BackupType, String> {
    let from_env = env::var("VERSION_CONTROL").ok();
    let value = control.or(from_env.as_deref());
    match value {
        None => Ok(BackupType::Existing),
        Some("none") | Some("off") => Ok(BackupType::NoBackup),
        Some("numbered") | Some("t") => Ok(BackupType::Numbered),
        Some("existing") | Some("nil") => Ok(BackupType::Existing),
        Some("simple") | Some("never") => Ok(BackupType::Simple),
        Some(other) => Err(format!("invalid backup type '{}'", other)),
    }
}

/// Highest N for which `file.~N~` exists next to `path`
fn highest_numbered_backup(path: &Path) -> u32 {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return 0;
    };
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let entries = match fs::read_dir(dir.unwrap_or_else(|| Path::new("."))) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };

    let mut highest = 0;
    for entry in entries.flatten() {
        let entry_name = entry.file_name();
        let Some(entry_name) = entry_name.to_str() else {
            continue;
        };
        if let Some(rest) = entry_name.strip_prefix(name).and_then(|r| r.strip_prefix(".~")) {
            if let Some(n) = rest.strip_suffix('~').and_then(|n| n.parse::<u32>().ok()) {
                highest = highest.max(n);
            }
        }
    }
    highest
}

fn backup_path(path: &Path, backup: BackupType, suffix: &str) -> Option<PathBuf> {
    let numbered = |n: u32| {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".~{}~", n));
        PathBuf::from(name)
    };
    let simple = || {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };

    match backup {
        BackupType::NoBackup => None,
        BackupType::Numbered => Some(numbered(highest_numbered_backup(path) + 1)),
        BackupType::Simple => Some(simple()),
        BackupType::Existing => {
            let highest = highest_numbered_backup(path);
            if highest > 0 {
                Some(numbered(highest + 1))
            } else {
                Some(simple())
            }
        }
    }
}

fn read_catalog(tool: &str, path: &PathBuf) -> Catalog {
    let reader = match plib::io::input_stream(path, true) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("{}: {}: {}", tool, path.display(), e);
            exit(1);
        }
    };
    let parser = PoParser::new(reader, path.display().to_string()).unlimited_errors();
    match parser.parse() {
        Ok(catalog) => catalog,
        Err(PoError::Io(e)) => {
            eprintln!("{}: {}: {}", tool, path.display(), e);
            exit(1);
        }
        Err(PoError::Invalid(issues)) => {
            for issue in &issues {
                eprintln!("{}: {}", tool, issue);
            }
            eprintln!(
                "{}: {}: {}",
                tool,
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

    if args.update && args.output.is_some() {
        eprintln!(
            "msgmerge: {}",
            gettext("--update and --output-file are mutually exclusive")
        );
        exit(1);
    }
    if args.update && args.definitions.as_os_str() == "-" {
        eprintln!(
            "msgmerge: {}",
            gettext("--update cannot rewrite standard input")
        );
        exit(1);
    }
    if !args.update && (args.backup.is_some() || args.suffix.is_some()) {
        eprintln!(
            "msgmerge: {}",
            gettext("--backup and --suffix are only valid with --update")
        );
        exit(1);
    }
    if args.sort_output && args.sort_by_file {
        eprintln!(
            "msgmerge: {}",
            gettext("--sort-output and --sort-by-file are mutually exclusive")
        );
        exit(1);
    }

    let backup = match backup_type(args.backup.as_deref()) {
        Ok(backup) => backup,
        Err(e) => {
            eprintln!("msgmerge: {}", e);
            exit(1);
        }
    };

    let definitions = read_catalog("msgmerge", &args.definitions);
    let reference = read_catalog("msgmerge", &args.reference);

    // Compendiums contribute every domain's message list, in file order.
    let compendium_catalogs: Vec<Catalog> = args
        .compendiums
        .iter()
        .map(|path| read_catalog("msgmerge", path))
        .collect();
    let compendium_lists: Vec<&MessageList> = compendium_catalogs
        .iter()
        .flat_map(|catalog| catalog.domains().map(|d| &d.messages))
        .collect();

    let definitions_name = args.definitions.display().to_string();
    let outcome = merge_catalogs(
        &definitions_name,
        &definitions,
        &reference,
        &compendium_lists,
        args.multi_domain,
    );

    if args.verbose > 1 {
        for diagnostic in &outcome.diagnostics {
            eprintln!("msgmerge: {}", diagnostic);
        }
    }
    if args.verbose > 0 {
        let stats = outcome.stats;
        eprintln!(
            "{}",
            gettext!(
                "Read {} old + {} reference, merged {}, fuzzied {}, missing {}, obsolete {}.",
                definitions.message_count(),
                reference.message_count(),
                stats.merged,
                stats.fuzzied,
                stats.missing,
                stats.obsolete
            )
        );
    } else if !args.quiet {
        eprintln!("{}", gettext(" done."));
    }

    let mut result = outcome.catalog;
    if args.sort_by_file {
        result.sort_by_filepos();
    } else if args.sort_output {
        result.sort_by_msgid();
    }

    if args.update {
        // Nothing to do when the merge changed nothing.
        if catalogs_equal(&definitions, &result) {
            exit(0);
        }

        let suffix = args
            .suffix
            .or_else(|| env::var("SIMPLE_BACKUP_SUFFIX").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "~".to_string());
        if let Some(backup_file) = backup_path(&args.definitions, backup, &suffix) {
            if let Err(e) = fs::copy(&args.definitions, &backup_file) {
                eprintln!("msgmerge: {}: {}", backup_file.display(), e);
                exit(1);
            }
        }

        if let Err(e) = write_output(&result, Some(&args.definitions)) {
            eprintln!("msgmerge: {}: {}", args.definitions.display(), e);
            exit(1);
        }
    } else {
        if result.message_count() == 0 && !args.force_po {
            exit(0);
        }
        let target = args
            .output
            .as_deref()
            .filter(|path| path.as_os_str() != "-");
        let shown = target.unwrap_or_else(|| Path::new("-"));
        if let Err(e) = write_output(&result, target) {
            eprintln!("msgmerge: {}: {}", shown.display(), e);
            exit(1);
        }
    }

    exit(0);
}

fn write_output(catalog: &Catalog, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            write_po(&mut w, catalog)?;
            w.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut w = BufWriter::new(stdout.lock());
            write_po(&mut w, catalog)?;
            w.flush()
        }
    }
}
