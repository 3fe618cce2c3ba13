//! Static network parameters.
//!
//! A lookup table only: version bytes and coin types, no derivation logic.
//! Parameters are passed explicitly to the functions that need them.

use std::fmt;
use std::str::FromStr;

use keyderive_primitives::bip32::KeyVersions;
use serde::{Deserialize, Serialize};

use crate::AddressError;

/// Version bytes and constants for one network.
#[derive(Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Human-readable network name.
    pub name: &'static str,
    /// Version byte prefixed to P2PKH address payloads.
    pub pub_key_hash_addr_id: u8,
    /// Version prefixes of serialized extended keys.
    pub hd_key_versions: KeyVersions,
    /// BIP-44 coin type.
    pub hd_coin_type: u32,
}

/// Bitcoin mainnet: addresses start with '1', keys serialize as xprv/xpub.
pub static MAINNET_PARAMS: NetworkParams = NetworkParams {
    name: "mainnet",
    pub_key_hash_addr_id: 0x00,
    hd_key_versions: KeyVersions {
        private: [0x04, 0x88, 0xad, 0xe4],
        public: [0x04, 0x88, 0xb2, 0x1e],
    },
    hd_coin_type: 0,
};

/// Bitcoin testnet: addresses start with 'm' or 'n', keys as tprv/tpub.
pub static TESTNET_PARAMS: NetworkParams = NetworkParams {
    name: "testnet",
    pub_key_hash_addr_id: 0x6f,
    hd_key_versions: KeyVersions {
        private: [0x04, 0x35, 0x83, 0x94],
        public: [0x04, 0x35, 0x87, 0xcf],
    },
    hd_coin_type: 1,
};

/// Regression test network; shares testnet's prefixes and coin type.
pub static REGTEST_PARAMS: NetworkParams = NetworkParams {
    name: "regtest",
    pub_key_hash_addr_id: 0x6f,
    hd_key_versions: KeyVersions {
        private: [0x04, 0x35, 0x83, 0x94],
        public: [0x04, 0x35, 0x87, 0xcf],
    },
    hd_coin_type: 1,
};

/// Network selector for parameter lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// The static parameter set for this network.
    pub fn params(&self) -> &'static NetworkParams {
        match self {
            Network::Mainnet => &MAINNET_PARAMS,
            Network::Testnet => &TESTNET_PARAMS,
            Network::Regtest => &REGTEST_PARAMS,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

impl FromStr for Network {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "testnet3" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(AddressError::UnknownNetwork(s.to_string())),
        }
    }
}
