// Authentication module
// Owns the LeanIX bearer token: minting, caching, invalidation, claim decoding

mod clock;
mod jwt;
mod manager;
mod mint;
mod types;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
pub use jwt::decode_claims;
pub use manager::{token_preview, CredentialManager};
pub use mint::{expires_at_for, token_url, SAFETY_MARGIN_SECS};
pub use types::{Claims, Principal};
