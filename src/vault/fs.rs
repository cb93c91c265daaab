//! Filesystem-backed vault
//!
//! Scans a directory tree for markdown notes and extracts the per-note link
//! and tag metadata the graph core consumes: YAML frontmatter (`tags`,
//! `links`), inline markdown links, `[[wikilinks]]`, and inline `#tags`.

use super::{basename, LinkResolver, MetadataSource, NoteMetadata, NoteRef};
use pulldown_cmark::{Event, Options, Parser, Tag};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors opening a vault. Per-note problems (unreadable file, bad
/// frontmatter) degrade with a warning instead of failing the scan.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to scan vault root {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A directory of markdown notes, scanned once up front.
///
/// Implements both host services the materializer needs: metadata lookup and
/// link resolution. Notes iterate in path order so materialization is
/// deterministic.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    notes: Vec<NoteRef>,
    metadata: HashMap<String, NoteMetadata>,
    /// Lowercased basename -> note paths sharing it, sorted
    by_basename: HashMap<String, Vec<String>>,
}

impl FsVault {
    /// Scan `root` for `.md` files and parse their metadata.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VaultError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(VaultError::NotADirectory(root));
        }

        let mut notes = Vec::new();
        let mut metadata = HashMap::new();

        for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|source| VaultError::Scan {
                path: root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_md = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
            if !is_md {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %rel, error = %e, "skipping unreadable note");
                    continue;
                }
            };

            let meta = Self::parse_note(&content);
            debug!(
                path = %rel,
                links = meta.links.len() + meta.frontmatter_links.len(),
                tags = meta.tags.len() + meta.frontmatter_tags.len(),
                "scanned note"
            );
            metadata.insert(rel.clone(), meta);
            notes.push(NoteRef::new(rel));
        }

        notes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut by_basename: HashMap<String, Vec<String>> = HashMap::new();
        for note in &notes {
            by_basename
                .entry(note.basename.to_ascii_lowercase())
                .or_default()
                .push(note.path.clone());
        }
        for paths in by_basename.values_mut() {
            paths.sort();
        }

        debug!(root = %root.display(), notes = notes.len(), "opened vault");
        Ok(Self {
            root,
            notes,
            metadata,
            by_basename,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Notes in path order
    pub fn notes(&self) -> &[NoteRef] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Parse one note's content into its metadata record
    pub(crate) fn parse_note(content: &str) -> NoteMetadata {
        let (frontmatter, body) = split_frontmatter(content);

        let mut meta = NoteMetadata::default();
        if let Some(yaml) = frontmatter {
            match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
                Ok(value) => {
                    meta.frontmatter_tags = string_list(value.get("tags"));
                    meta.frontmatter_links = string_list(value.get("links"));
                }
                Err(e) => warn!(error = %e, "ignoring unparseable frontmatter"),
            }
        }

        meta.links = extract_inline_links(body);
        meta.links.extend(extract_wikilinks(body));
        meta.tags = extract_inline_tags(body);
        meta
    }
}

impl MetadataSource for FsVault {
    fn metadata(&self, id: &str) -> Option<NoteMetadata> {
        self.metadata.get(id).cloned()
    }
}

impl LinkResolver for FsVault {
    /// Resolution order: exact path, path with `.md` appended, then unique
    /// case-insensitive basename match. Basename ties resolve to the
    /// lexicographically first path so repeated renders are deterministic.
    fn resolve(&self, raw_link: &str, _context_id: &str) -> Option<String> {
        let raw = raw_link.trim();
        let raw = raw.split('#').next().unwrap_or(raw).trim();
        if raw.is_empty() {
            return None;
        }

        if self.metadata.contains_key(raw) {
            return Some(raw.to_string());
        }
        let with_md = format!("{}.md", raw);
        if self.metadata.contains_key(&with_md) {
            return Some(with_md);
        }

        self.by_basename
            .get(&basename(raw).to_ascii_lowercase())
            .and_then(|paths| paths.first().cloned())
    }
}

/// Split a note into its YAML frontmatter block (between leading `---`
/// fences) and the remaining body.
fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return (None, content);
    };
    let Some(end) = after_open.find("\n---") else {
        return (None, content);
    };
    let frontmatter = &after_open[..end];
    let rest = &after_open[end + 4..];
    // Skip the remainder of the closing fence line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => "",
    };
    (Some(frontmatter), body)
}

/// Read a frontmatter value as a string list; a scalar counts as a
/// single-element list.
fn string_list(value: Option<&serde_yaml::Value>) -> Vec<String> {
    match value {
        Some(serde_yaml::Value::String(s)) => vec![s.clone()],
        Some(serde_yaml::Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract inline markdown link targets, skipping external URLs and anchors.
/// Anchor fragments on internal targets are stripped.
fn extract_inline_links(body: &str) -> Vec<String> {
    let parser = Parser::new_ext(body, Options::all());
    let mut links = Vec::new();

    for event in parser {
        if let Event::Start(Tag::Link { dest_url, .. }) = event {
            let dest = dest_url.as_ref();
            if dest.starts_with('#')
                || dest.starts_with("http://")
                || dest.starts_with("https://")
                || dest.starts_with("mailto:")
            {
                continue;
            }
            let target = dest.split('#').next().unwrap_or(dest).trim();
            if !target.is_empty() {
                links.push(target.to_string());
            }
        }
    }

    links
}

/// Extract `[[target]]` / `[[target|display]]` wikilink targets.
/// pulldown-cmark does not handle these.
fn extract_wikilinks(body: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut chars = body.chars().peekable();
    let mut in_link = false;
    let mut link_text = String::new();

    while let Some(c) = chars.next() {
        if c == '[' && chars.peek() == Some(&'[') {
            chars.next();
            in_link = true;
            link_text.clear();
        } else if in_link && c == ']' && chars.peek() == Some(&']') {
            chars.next();
            in_link = false;

            let target = match link_text.find('|') {
                Some(pipe) => link_text[..pipe].trim(),
                None => link_text.trim(),
            };
            if !target.is_empty() {
                links.push(target.to_string());
            }
        } else if in_link {
            link_text.push(c);
        }
    }

    links
}

/// Extract inline `#tag` tokens, skipping fenced code blocks and inline code
/// spans. Tags keep their `#` prefix; matching strips it on both sides.
fn extract_inline_tags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let mut in_code_span = false;
        let mut prev: Option<char> = None;
        let mut chars = line.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c == '`' {
                in_code_span = !in_code_span;
                prev = Some(c);
                continue;
            }
            let at_boundary = prev.is_none_or(|p| p.is_whitespace() || p == '(');
            if c == '#' && !in_code_span && at_boundary {
                let tag: String = line[i + 1..]
                    .chars()
                    .take_while(|&c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/')
                    .collect();
                // Headings ("# Title") and bare "#" never produce a tag, and
                // numeric references like "#42" are not tags either
                if tag.chars().next().is_some_and(|c| c.is_alphabetic()) {
                    for _ in 0..tag.chars().count() {
                        chars.next();
                    }
                    tags.push(format!("#{}", tag));
                    prev = tag.chars().last();
                    continue;
                }
            }
            prev = Some(c);
        }
    }

    tags
}
