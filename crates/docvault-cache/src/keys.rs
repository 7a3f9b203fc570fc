//! Cache key builders for all docvault cache entries.
//!
//! Keys embed the value they derive from, so `TtlCache::invalidate` with
//! that value as the substring evicts every derivation.

/// Prefix applied to all docvault cache keys.
const PREFIX: &str = "docvault";

/// Cache key for the identity behind a session token.
pub fn token_identity(token: &str) -> String {
    format!("{PREFIX}:token:{token}")
}
