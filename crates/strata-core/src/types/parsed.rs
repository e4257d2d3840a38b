//! Decomposed request paths.

use serde::{Deserialize, Serialize};

/// The structured fields of a request path, produced by the path parser.
///
/// `folder + basename + extension` reconstitutes the logical filename with
/// no variant or hash segment in it. `hash` holds the 10-character content
/// fingerprint under the hash-bearing grammar and is empty under the legacy
/// grammar; the resolver relies on that distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFileId {
    /// Leading path segments, each terminated by `/`; may be empty
    pub folder: String,
    /// Final segment with variant and extension stripped
    pub basename: String,
    /// Dot-prefixed suffix, possibly spanning multiple dots; may be empty
    pub extension: String,
    /// Named derivative after the `__` separator, when present
    pub variant: Option<String>,
    /// Content fingerprint segment; empty for legacy paths
    pub hash: String,
}

impl ParsedFileId {
    /// Reconstruct the plain logical filename (no variant, no hash)
    pub fn file_name(&self) -> String {
        format!("{}{}{}", self.folder, self.basename, self.extension)
    }

    /// Whether the hash-bearing grammar matched this path
    pub fn has_hash(&self) -> bool {
        !self.hash.is_empty()
    }
}
