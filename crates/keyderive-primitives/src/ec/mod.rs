/// Elliptic curve keys on secp256k1.
///
/// Thin wrappers over `k256` exposing exactly what hierarchical derivation
/// needs: scalar tweaking of private keys, point tweaking of public keys,
/// and SEC1 serialization.

pub mod private_key;
pub mod public_key;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
