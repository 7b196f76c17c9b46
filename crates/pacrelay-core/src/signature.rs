//! Stand-in for the detached database signatures.
//!
//! Clients that request `<repo>.db.sig` expect *something* to exist. The
//! bytes served here are random and will never verify; a client with
//! signature checking enabled must be configured with `SigLevel = Never` or
//! `Optional` for this repository.

use rand::RngCore;

pub const SIGNATURE_LEN: usize = 512;

/// Random bytes in place of a signature. Not cryptographically meaningful.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaceholderSignature([u8; SIGNATURE_LEN]);

impl PlaceholderSignature {
    pub fn generate() -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for PlaceholderSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlaceholderSignature")
            .field(&format_args!("{} bytes", SIGNATURE_LEN))
            .finish()
    }
}
