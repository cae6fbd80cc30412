//! Deck loading — turn a directory or a single text file into panels.
//!
//! A directory deck has one panel per regular file (immediate children only,
//! hidden entries skipped, ignore files not consulted).  A file deck is split
//! on separator lines, Markdown-slide style.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

/// Default separator between panels in a single-file deck.
pub const DEFAULT_SEPARATOR: &str = "---";

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no panels found in {}", .0.display())]
    Empty(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One visual unit of the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub body: String,
}

/// Load panels from `path`.  Directories become one panel per file, files
/// are split on `separator` lines.
pub fn load_deck(path: &Path, separator: &str) -> Result<Vec<Panel>, DeckError> {
    let meta = std::fs::metadata(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let panels = if meta.is_dir() {
        load_dir(path)?
    } else {
        let text = read_lossy(path)?;
        split_panels(&text, separator)
    };

    if panels.is_empty() {
        return Err(DeckError::Empty(path.to_path_buf()));
    }
    tracing::debug!(count = panels.len(), path = %path.display(), "deck loaded");
    Ok(panels)
}

fn load_dir(dir: &Path) -> Result<Vec<Panel>, DeckError> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut panels = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| DeckError::Io {
            path: dir.to_path_buf(),
            source: walk_io_error(err),
        })?;
        let path = entry.path();
        if path == dir || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let body = read_lossy(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        panels.push(Panel { title, body });
    }
    Ok(panels)
}

fn walk_io_error(err: ignore::Error) -> std::io::Error {
    let msg = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| std::io::Error::other(msg))
}

fn read_lossy(path: &Path) -> Result<String, DeckError> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Split `text` into panels on lines equal to `separator` (after trimming).
///
/// The first `# ` heading inside a chunk becomes the title and is removed
/// from the body; chunks without one are titled `Panel k`.  Blank chunks
/// are dropped.
pub fn split_panels(text: &str, separator: &str) -> Vec<Panel> {
    let separator = separator.trim();
    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in text.lines() {
        if line.trim() == separator {
            chunks.push(Vec::new());
        } else if let Some(chunk) = chunks.last_mut() {
            chunk.push(line);
        }
    }

    let mut panels = Vec::new();
    for lines in chunks {
        if lines.iter().all(|l| l.trim().is_empty()) {
            continue;
        }
        let heading = lines.iter().position(|l| l.starts_with("# "));
        let title = match heading {
            Some(i) => lines[i][2..].trim().to_string(),
            None => format!("Panel {}", panels.len() + 1),
        };
        let body = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != heading)
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n")
            .trim_matches('\n')
            .to_string();
        panels.push(Panel { title, body });
    }
    panels
}
