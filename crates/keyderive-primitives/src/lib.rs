/// Key derivation primitives: hashing, encoding, and hierarchical keys.
///
/// This crate provides the building blocks for turning a mnemonic into keys:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC-SHA512)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 private and public key wrappers
/// - BIP-39 mnemonic validation and seed expansion
/// - BIP-32 extended keys, child derivation, and derivation paths

pub mod hash;
pub mod base58;
pub mod ec;
pub mod bip39;
pub mod bip32;

mod error;
pub use error::PrimitivesError;
