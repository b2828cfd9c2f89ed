use std::path::{Path, PathBuf};
use std::{env, fs, process};

use anyhow::{Context, Result};
use notesplit_config::Settings;
use notesplit_engine::{Token, render, split_note};

const SETTINGS_FILE: &str = "settings.json";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <note-file> [dest-dir]", args[0]);
        process::exit(1);
    }

    let note_path = PathBuf::from(&args[1]);
    if !note_path.is_file() {
        eprintln!("Error: '{}' is not a file", note_path.display());
        process::exit(1);
    }

    let settings = Settings::load_from_path(SETTINGS_FILE)
        .context("loading settings")?
        .unwrap_or_default();
    let config = settings.split_config().context("invalid split settings")?;

    let dest_dir = match args.get(2) {
        Some(dir) => PathBuf::from(dir),
        None if settings.destination_folder_path.as_os_str().is_empty() => {
            note_path.parent().unwrap_or(Path::new(".")).to_path_buf()
        }
        None => settings.destination_folder_path.clone(),
    };

    let text = fs::read_to_string(&note_path)
        .with_context(|| format!("reading {}", note_path.display()))?;
    let outcome = split_note(&text, &config)?;

    if outcome.sections.is_empty() {
        println!(
            "No splittable {} found in {}; nothing written",
            config.kind(),
            note_path.display()
        );
        return Ok(());
    }

    if !outcome.preamble.is_empty() {
        println!(
            "Keeping {} leading token(s) with the source file",
            outcome.preamble.len()
        );
    }

    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("creating {}", dest_dir.display()))?;

    let extension = note_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("md");
    for (i, section) in outcome.sections.iter().enumerate() {
        let name = format!("{:03}-{}.{}", i + 1, section_slug(section), extension);
        let path = dest_dir.join(&name);
        fs::write(&path, section.render())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!(
        "Split {} into {} section(s)",
        note_path.display(),
        outcome.sections.len()
    );

    // Rendering the preamble and sections back together must reproduce the
    // source; anything else means the note was misread.
    let mut reassembled = render(&outcome.preamble);
    for section in &outcome.sections {
        reassembled.push_str(&section.render());
    }
    anyhow::ensure!(reassembled == text, "round-trip mismatch, aborting");

    Ok(())
}

/// A file-name-safe slug for a section: its first header's body when it
/// has one, otherwise its first non-blank text line.
fn section_slug(section: &Token) -> String {
    let children = section.children().unwrap_or_default();
    let title = children
        .iter()
        .find_map(|t| t.body())
        .map(str::to_string)
        .or_else(|| {
            children.iter().find_map(|t| match t {
                Token::Text { content, .. } if !content.trim().is_empty() => {
                    Some(content.clone())
                }
                _ => None,
            })
        })
        .unwrap_or_else(|| "section".to_string());
    slugify(&title)
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.trim().chars().take(40) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
