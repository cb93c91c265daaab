//! Collaborator interfaces to the document-management host
//!
//! The graph core consumes a vault through three narrow contracts: an ordered
//! note collection, a per-note metadata lookup, and a link-resolution service.
//! [`FsVault`] is the bundled filesystem-backed implementation of all three.

mod fs;

pub use fs::{FsVault, VaultError};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A reference to one note in the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRef {
    /// Stable path within the vault, with `/` separators
    pub path: String,
    /// Final path segment with any `.md` suffix stripped
    pub basename: String,
}

impl NoteRef {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let basename = basename(&path);
        Self { path, basename }
    }
}

/// The final path segment of a document id, with a trailing `.md` stripped
/// (case-insensitive). Phantom ids pass through mostly unchanged.
pub fn basename(id: &str) -> String {
    let segment = id.rsplit('/').next().unwrap_or(id);
    if segment.len() > 3 && segment[segment.len() - 3..].eq_ignore_ascii_case(".md") {
        segment[..segment.len() - 3].to_string()
    } else {
        segment.to_string()
    }
}

/// Per-note metadata record supplied by the host. The core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteMetadata {
    /// Inline tags found in the note body, optionally `#`-prefixed
    #[serde(default)]
    pub tags: Vec<String>,
    /// Tags declared in the frontmatter `tags` list, no prefix
    #[serde(default)]
    pub frontmatter_tags: Vec<String>,
    /// Raw link text of inline content links
    #[serde(default)]
    pub links: Vec<String>,
    /// Raw link text of structured frontmatter links
    #[serde(default)]
    pub frontmatter_links: Vec<String>,
}

impl NoteMetadata {
    /// All outbound raw links, inline first then frontmatter
    pub fn outbound_links(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .chain(self.frontmatter_links.iter())
            .map(String::as_str)
    }

    /// Tag membership test: case-insensitive, tolerant of a leading `#` on
    /// either side. Frontmatter tags are checked before inline tags.
    pub fn has_tag(&self, name: &str) -> bool {
        let wanted = name.trim_start_matches('#');
        self.frontmatter_tags
            .iter()
            .chain(self.tags.iter())
            .any(|t| t.trim_start_matches('#').eq_ignore_ascii_case(wanted))
    }
}

/// Lookup from node id to the note's metadata record, built by the
/// materializer and read by the rule engine
pub type MetadataIndex = HashMap<String, NoteMetadata>;

/// Host service: metadata lookup by document id
pub trait MetadataSource {
    /// `None` means the document has no metadata (empty or unparsed); the
    /// materializer then contributes only the document's own node.
    fn metadata(&self, id: &str) -> Option<NoteMetadata>;
}

/// Host service: resolve raw link text to an existing document id, given the
/// linking document as context. `None` is the designed phantom-node path,
/// not an error.
pub trait LinkResolver {
    fn resolve(&self, raw_link: &str, context_id: &str) -> Option<String>;
}
