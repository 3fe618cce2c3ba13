//! Result types returned by the pipeline.

use std::fmt::Display;

use keyderive_address::Address;
use keyderive_primitives::bip32::{DerivationPath, Fingerprint};
use serde::{Serialize, Serializer};

/// Everything public about one derived address.
///
/// Contains no private key, chain code, or seed material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedAddress {
    /// Name of the network whose parameters were used.
    pub network: String,
    #[serde(serialize_with = "as_display")]
    pub path: DerivationPath,
    /// Fingerprint of the master public key, for auditing.
    #[serde(serialize_with = "as_display")]
    pub master_fingerprint: Fingerprint,
    pub address: Address,
    /// Hex of the 33-byte compressed public key.
    pub public_key_hex: String,
    /// Serialized extended public key of the leaf node.
    pub extended_public_key: String,
}

fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
