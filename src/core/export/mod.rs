//! Export
//!
//! Writes a finished character to disk: a standalone HTML document with
//! working tabs and the portrait embedded, and a JSON bundle.

pub mod html;
pub mod json;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::forge::ForgeOutcome;

pub use html::render_html;
pub use json::{ExportBundle, render_json};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize export bundle: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Files written by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub html: PathBuf,
    pub json: Option<PathBuf>,
}

/// Lowercase, dash-separated file stem from a character name.
pub fn file_stem(name: &str) -> String {
    let stem = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        "character".to_string()
    } else {
        stem
    }
}

fn write(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `<stem>.html` (and `<stem>.json` when asked) into `dir`.
pub fn export_to_dir(
    outcome: &ForgeOutcome,
    dir: &Path,
    include_json: bool,
) -> Result<ExportedFiles, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let stem = file_stem(outcome.display_name());

    let html_path = dir.join(format!("{}.html", stem));
    write(&html_path, &render_html(outcome))?;

    let json_path = if include_json {
        let path = dir.join(format!("{}.json", stem));
        write(&path, &render_json(outcome)?)?;
        Some(path)
    } else {
        None
    };

    log::info!("Exported {} to {}", outcome.display_name(), html_path.display());
    Ok(ExportedFiles {
        html: html_path,
        json: json_path,
    })
}
