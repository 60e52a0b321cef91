//! Client-style draft identifiers.
//!
//! Drafts created before a server round-trip carry ids of the form
//! `draft-{epochMillis}-{randomSuffix}`. Every operation accepts them
//! interchangeably with server-assigned UUIDs.

use rand::Rng;

const DRAFT_ID_PREFIX: &str = "draft-";
const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a fresh draft id: `draft-{epochMillis}-{6 base36 chars}`.
pub fn generate_draft_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{DRAFT_ID_PREFIX}{millis}-{suffix}")
}

/// Whether an id is a client-generated draft id.
pub fn is_draft_id(id: &str) -> bool {
    id.starts_with(DRAFT_ID_PREFIX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
