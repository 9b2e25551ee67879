//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the potools-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! msgfmt - compile message catalog to binary format
//!
//! The msgfmt utility compiles portable message object (.po) files
//! into machine object (.mo) files for use by gettext functions.
//! Each domain of the input compiles to its own output file.

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use potools_msg::catalog_lib::catalog::{Catalog, DEFAULT_DOMAIN};
use potools_msg::catalog_lib::merge::{Diagnostic, Severity};
use potools_msg::catalog_lib::message::{FormatDirective, Message, MessageList};
use potools_msg::catalog_lib::mo_file::write_mo;
use potools_msg::catalog_lib::po_file::{PoError, PoParser};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::exit;

/// msgfmt - compile message catalog to binary format
#[derive(Parser)]
#[command(
    version,
    about = gettext("msgfmt - compile message catalog to binary format"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'c', help = gettext("Check the PO file for validity"))]
    check: bool,

    #[arg(short = 'f', help = gettext("Include fuzzy entries in the output"))]
    include_fuzzy: bool,

    #[arg(short = 'v', help = gettext("Verbose mode - print warnings"))]
    verbose: bool,

    #[arg(short = 'D', action = clap::ArgAction::Append, help = gettext("Add directory to search path for input files"))]
    directories: Vec<PathBuf>,

    #[arg(short = 'o', long = "output-file", help = gettext("Output file name"))]
    output: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(required = true, help = gettext("Input .po files"))]
    files: Vec<PathBuf>,
}

fn main() {
    setlocale(LocaleCategory::LcAll, "");
    if textdomain("potools-rs").is_err() {
        // Ignore error - translation may not be available
    }
    let _ = bind_textdomain_codeset("potools-rs", "UTF-8");

    let args = Args::parse();

    let mut exit_code = 0;
    let mut combined = Catalog::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for input_path in &args.files {
        let path = find_input_file(input_path, &args.directories);

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("msgfmt: {}: {}", path.display(), e);
                exit_code = 1;
                continue;
            }
        };

        let catalog = match PoParser::new(file, path.display().to_string()).parse() {
            Ok(catalog) => catalog,
            Err(PoError::Io(e)) => {
                eprintln!("msgfmt: {}: {}", path.display(), e);
                exit_code = 1;
                continue;
            }
            Err(PoError::Invalid(issues)) => {
                for issue in &issues {
                    eprintln!("msgfmt: {}", issue);
                }
                exit_code = 1;
                continue;
            }
        };

        for domain in catalog.domains() {
            let target = combined.sublist_or_create(&domain.name);
            for entry in &domain.messages {
                if entry.obsolete {
                    continue;
                }
                if args.check {
                    validate_entry(entry, &mut diagnostics);
                }
                if target.search(&entry.msgid).is_some() {
                    diagnostics.push(Diagnostic {
                        pos: entry.pos.clone(),
                        severity: Severity::Warning,
                        message: format!(
                            "message \"{}\" already defined by an earlier input file",
                            truncate(&entry.msgid, 30)
                        ),
                    });
                    continue;
                }
                target.append(entry.clone());
            }
        }
    }

    let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
    for diagnostic in &diagnostics {
        if diagnostic.severity == Severity::Error || args.verbose {
            eprintln!("msgfmt: {}", diagnostic);
        }
    }
    if has_errors {
        exit_code = 1;
    }

    if exit_code == 0 || !args.check {
        let output_path = get_output_path(&args);
        for domain in combined.domains() {
            if domain.messages.is_empty() {
                continue;
            }
            let path = domain_output_path(&output_path, &domain.name);
            if let Err(e) = compile_domain(&path, &domain.messages, args.include_fuzzy) {
                eprintln!("msgfmt: {}: {}", path.display(), e);
                exit_code = 1;
            }
        }
    }

    exit(exit_code);
}

/// Find an input file, searching directories if needed
fn find_input_file(path: &PathBuf, directories: &[PathBuf]) -> PathBuf {
    if path.exists() {
        return path.clone();
    }

    for dir in directories {
        let full_path = dir.join(path);
        if full_path.exists() {
            return full_path;
        }
    }

    path.clone()
}

/// Get the output file path for the default domain
fn get_output_path(args: &Args) -> PathBuf {
    if let Some(ref output) = args.output {
        return output.clone();
    }

    let mut output = args.files[0].clone();
    output.set_extension("mo");
    output
}

/// Named domains compile to `<name>.mo` next to the default output
fn domain_output_path(output: &Path, domain: &str) -> PathBuf {
    if domain == DEFAULT_DOMAIN {
        return output.to_path_buf();
    }
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(format!("{}.mo", domain))
        }
        _ => PathBuf::from(format!("{}.mo", domain)),
    }
}

fn compile_domain(
    path: &Path,
    messages: &MessageList,
    include_fuzzy: bool,
) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_mo(&mut w, messages, include_fuzzy)
}

/// Validate a PO entry
fn validate_entry(entry: &Message, diagnostics: &mut Vec<Diagnostic>) {
    // Check for mismatched newlines
    let msgid_newlines = entry.msgid.matches('\n').count();
    let variants: Vec<&str> = entry.msgstr_variants().collect();
    for (i, msgstr) in variants.iter().enumerate() {
        let msgstr_newlines = msgstr.matches('\n').count();
        if msgid_newlines != msgstr_newlines && !entry.msgid.is_empty() && !msgstr.is_empty() {
            diagnostics.push(Diagnostic {
                pos: entry.pos.clone(),
                severity: Severity::Warning,
                message: format!(
                    "msgid and msgstr{} have different newline counts ({} vs {})",
                    variant_label(variants.len(), i),
                    msgid_newlines,
                    msgstr_newlines
                ),
            });
        }
    }

    // Check for c-format consistency
    if entry.is_format == FormatDirective::Yes {
        let msgid_formats = count_format_specs(&entry.msgid);
        for (i, msgstr) in variants.iter().enumerate() {
            let msgstr_formats = count_format_specs(msgstr);
            if msgid_formats != msgstr_formats && !msgstr.is_empty() {
                diagnostics.push(Diagnostic {
                    pos: entry.pos.clone(),
                    severity: Severity::Warning,
                    message: format!(
                        "format specifications in msgid and msgstr{} differ",
                        variant_label(variants.len(), i)
                    ),
                });
            }
        }
    }

    // Check for empty translation of non-empty source
    if !entry.msgid.is_empty() && !entry.is_translated() {
        diagnostics.push(Diagnostic {
            pos: entry.pos.clone(),
            severity: Severity::Warning,
            message: format!("empty msgstr for: {}", truncate(&entry.msgid, 30)),
        });
    }
}

fn variant_label(nvariants: usize, index: usize) -> String {
    if nvariants > 1 {
        format!("[{}]", index)
    } else {
        String::new()
    }
}

/// Count printf-style format specifications
fn count_format_specs(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('%') => {
                    chars.next(); // Skip %%
                }
                Some(_) => {
                    count += 1;
                    // Skip format specification
                    while let Some(&c) = chars.peek() {
                        if c.is_alphabetic() {
                            chars.next();
                            break;
                        }
                        chars.next();
                    }
                }
                None => {}
            }
        }
    }

    count
}

/// Truncate a string for display
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}
