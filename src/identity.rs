//! Content-derived item identity.
//!
//! Feed readers remember guids to tell new items from old ones. Deriving the
//! guid from the item's content keeps it stable across regenerations without
//! storing anything between runs.

use sha2::{Digest, Sha256};

/// Separator fed after each part so ("ab", "c") and ("a", "bc") differ.
const BOUNDARY: &[u8] = b"\0";

/// SHA-256 over `link`, `title` and `raw_date_text`, as 64 lowercase hex chars.
pub fn identity(link: &str, title: &str, raw_date_text: &str) -> String {
    let mut hasher = Sha256::new();
    for part in [link, title, raw_date_text] {
        hasher.update(part.as_bytes());
        hasher.update(BOUNDARY);
    }
    hex::encode(hasher.finalize())
}
