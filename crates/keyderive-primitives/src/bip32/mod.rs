//! BIP-32 hierarchical deterministic keys.
//!
//! A master key is produced from a seed with HMAC-SHA512 keyed by
//! `"Bitcoin seed"`; each child is produced from its parent's chain code and
//! key. Private-capable and public-only nodes are distinct types, so a
//! hardened step on a public node is a `MissingPrivateKey` branch rather
//! than a null check.

mod extended_key;
mod path;

pub use extended_key::{
    ChainCode, ExtendedKey, ExtendedPrivateKey, ExtendedPublicKey, Fingerprint, KeyVersions,
    MASTER_HMAC_KEY, SERIALIZED_LEN,
};
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
