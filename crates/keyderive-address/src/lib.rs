/// Address encoding and network parameters.
///
/// Turns a public key into a Base58Check P2PKH address
/// (`version || Hash160(pubkey) || checksum`), decodes addresses back to
/// their version byte and hash, and holds the static per-network constants.

pub mod address;
pub mod network;

mod error;
pub use address::Address;
pub use error::AddressError;
pub use network::{Network, NetworkParams, MAINNET_PARAMS, REGTEST_PARAMS, TESTNET_PARAMS};
