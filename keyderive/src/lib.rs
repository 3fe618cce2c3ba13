#![deny(missing_docs)]

//! Deterministic key derivation: BIP-39 mnemonic to BIP-32 keys to P2PKH address.
//!
//! Re-exports all component crates for convenient single-crate usage.

pub use keyderive_primitives as primitives;
pub use keyderive_address as address;
pub use keyderive_wallet as wallet;

pub use keyderive_address::{Address, Network, NetworkParams};
pub use keyderive_primitives::bip32::DerivationPath;
pub use keyderive_wallet::{mnemonic_to_address, DerivedAddress, WalletError};
