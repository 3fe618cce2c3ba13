/// Mnemonic to address derivation.
///
/// Composes the primitives into the full pipeline: validate mnemonic, expand
/// seed, derive the master key, walk the derivation path, and encode the leaf
/// public key as an address. Errors name the stage that failed.

mod error;
pub use error::{Stage, WalletError};

pub mod types;
pub mod key_deriver;

pub use key_deriver::{default_path, mnemonic_to_address, KeyDeriver};
pub use types::DerivedAddress;
