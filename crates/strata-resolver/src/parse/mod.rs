//! Request path grammars
//!
//! Decomposes a request path into `(folder, basename, variant, extension)`
//! plus an optional content fingerprint segment. Two mutually exclusive
//! grammars exist, selected by configuration rather than sniffed from the
//! path:
//!
//! - legacy: `<folder/>*<basename>(__<variant>)?<extension>`
//! - hash-bearing: the same, with a mandatory 10-character alphanumeric
//!   segment immediately before the basename
//!
//! In the default configuration the hash grammar is tried first and the
//! legacy decomposition is the fallback, so hash-less URLs keep working and
//! are reported with an empty fingerprint. With `legacy` enabled only the
//! legacy grammar exists and fingerprint segments are ordinary folders.
//!
//! Matching is a single anchored decomposition over the whole string; any
//! path that cannot be partitioned this way yields `None`, which the
//! resolver treats as "pass through unmodified", not as an error.

use strata_core::types::{ParsedFileId, HASH_PREFIX_LEN};

/// Parse a request path under the grammar selected by `legacy`
pub fn parse_file_id(path: &str, legacy: bool) -> Option<ParsedFileId> {
    if legacy {
        parse_legacy_path(path)
    } else {
        parse_hash_path(path).or_else(|| parse_legacy_path(path))
    }
}

/// Parse a hash-less request path.
///
/// The fingerprint is reported as an empty string so the resolver can tell
/// "legacy grammar used" apart from a failed hash-grammar match.
pub fn parse_legacy_path(path: &str) -> Option<ParsedFileId> {
    let (folder, last) = split_folder(path);
    if !folder_is_valid(folder) {
        return None;
    }
    let (basename, variant, extension) = split_final_segment(last)?;

    Some(ParsedFileId {
        folder: folder.to_string(),
        basename,
        extension,
        variant,
        hash: String::new(),
    })
}

/// Parse a hash-bearing request path.
///
/// The fingerprint segment is mandatory; a path without one does not match
/// this grammar at all.
pub fn parse_hash_path(path: &str) -> Option<ParsedFileId> {
    let (dir, last) = split_folder(path);
    if dir.is_empty() {
        return None;
    }

    // The fingerprint is the last folder segment.
    let head = &dir[..dir.len() - 1];
    let (folder, hash) = match head.rfind('/') {
        Some(i) => (&head[..=i], &head[i + 1..]),
        None => ("", head),
    };
    if !is_hash_segment(hash) || !folder_is_valid(folder) {
        return None;
    }
    let (basename, variant, extension) = split_final_segment(last)?;

    Some(ParsedFileId {
        folder: folder.to_string(),
        basename,
        extension,
        variant,
        hash: hash.to_string(),
    })
}

/// Split a path into its folder portion (trailing `/` included) and final
/// segment
fn split_folder(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => (&path[..=i], &path[i + 1..]),
        None => ("", path),
    }
}

/// Folder portions are sequences of non-empty segments, each terminated by
/// `/`; an empty folder is fine
fn folder_is_valid(folder: &str) -> bool {
    if folder.is_empty() {
        return true;
    }
    if !folder.ends_with('/') {
        return false;
    }
    folder[..folder.len() - 1].split('/').all(|s| !s.is_empty())
}

/// A content fingerprint is exactly ten alphanumeric characters
fn is_hash_segment(segment: &str) -> bool {
    segment.len() == HASH_PREFIX_LEN && segment.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Decompose the final path segment into `(basename, variant, extension)`.
///
/// The extension starts at the first `.` and runs to the end of the string;
/// the variant is everything after the first literal `__` before that. The
/// basename must be non-empty and must not begin with the variant
/// separator.
fn split_final_segment(segment: &str) -> Option<(String, Option<String>, String)> {
    if segment.is_empty() {
        return None;
    }

    let (name, extension) = match segment.find('.') {
        Some(i) => (&segment[..i], &segment[i..]),
        None => (segment, ""),
    };
    // A bare "." is not an extension
    if extension.len() == 1 {
        return None;
    }

    let (basename, variant) = match name.find("__") {
        Some(0) => return None,
        Some(i) => {
            let variant = &name[i + 2..];
            if variant.is_empty() {
                return None;
            }
            (&name[..i], Some(variant.to_string()))
        }
        None => (name, None),
    };
    if basename.is_empty() {
        return None;
    }

    Some((basename.to_string(), variant, extension.to_string()))
}
