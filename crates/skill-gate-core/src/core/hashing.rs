// crates/skill-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Skill Gate Content Hashing
// Description: SHA-256 digests over named bundle entries.
// Purpose: Fingerprint a bundle revision for baseline records.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Bundle digests hash a sequence of `(name, content)` entries. Each name and
//! each content block is terminated by a NUL byte so adjacent entries cannot
//! be confused. Callers feed entries in sorted order to keep digests stable
//! across platforms.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Content Hasher
// ============================================================================

/// Incremental SHA-256 hasher over named entries.
#[derive(Clone, Default)]
pub struct ContentHasher {
    /// Underlying digest state.
    hasher: Sha256,
}

impl ContentHasher {
    /// Creates an empty hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named entry to the digest.
    pub fn update_entry(&mut self, name: &str, content: &[u8]) {
        self.hasher.update(name.as_bytes());
        self.hasher.update([0u8]);
        self.hasher.update(content);
        self.hasher.update([0u8]);
    }

    /// Finishes the digest and returns lowercase hex.
    #[must_use]
    pub fn finalize_hex(self) -> String {
        hex_encode(&self.hasher.finalize())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Encodes bytes as lowercase hexadecimal.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
