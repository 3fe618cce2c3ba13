//! BIP-39 + BIP-32 key derivation down to a P2PKH address.
//!
//! [`KeyDeriver`] holds the master key for one (mnemonic, passphrase) pair
//! and one network's parameters. [`mnemonic_to_address`] runs the whole
//! pipeline for a single path.

use keyderive_address::{Address, NetworkParams};
use keyderive_primitives::bip32::{
    ChildNumber, DerivationPath, ExtendedKey, ExtendedPrivateKey, Fingerprint,
};
use keyderive_primitives::bip39::{derive_seed, Mnemonic, Seed};
use tracing::debug;

use crate::error::WalletError;
use crate::types::DerivedAddress;

/// Derives keys and addresses from a master key on one network.
#[derive(Clone, Debug)]
pub struct KeyDeriver<'a> {
    master: ExtendedPrivateKey,
    params: &'a NetworkParams,
}

impl<'a> KeyDeriver<'a> {
    /// Validate `phrase`, expand it with `passphrase`, and derive the master key.
    ///
    /// Validation happens before any seed computation; an invalid phrase
    /// never produces a seed.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: &str,
        params: &'a NetworkParams,
    ) -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::parse(phrase).map_err(WalletError::Mnemonic)?;
        debug!(words = mnemonic.word_count(), "mnemonic validated");
        let seed = derive_seed(&mnemonic, passphrase);
        Self::from_seed(&seed, params)
    }

    /// Derive the master key from an already expanded seed.
    pub fn from_seed(seed: &Seed, params: &'a NetworkParams) -> Result<Self, WalletError> {
        let master = ExtendedPrivateKey::from_seed(seed).map_err(WalletError::MasterKey)?;
        debug!(fingerprint = %master.fingerprint(), "master key derived");
        Ok(KeyDeriver { master, params })
    }

    pub fn master_fingerprint(&self) -> Fingerprint {
        self.master.fingerprint()
    }

    pub fn params(&self) -> &'a NetworkParams {
        self.params
    }

    /// Walk `path` from the master key.
    pub fn derive(&self, path: &DerivationPath) -> Result<ExtendedKey, WalletError> {
        path.walk(&ExtendedKey::Private(self.master.clone()))
            .map_err(|source| WalletError::Derivation {
                path: path.clone(),
                source,
            })
    }

    /// Walk `path` and encode the leaf's compressed public key as an address.
    pub fn derive_address(&self, path: &DerivationPath) -> Result<DerivedAddress, WalletError> {
        let leaf = self.derive(path)?;
        debug!(path = %path, depth = leaf.depth(), "leaf key derived");

        let public_key = leaf.public_key();
        let address = Address::from_public_key_bytes(
            &public_key.to_compressed(),
            self.params.pub_key_hash_addr_id,
        )
        .map_err(WalletError::Address)?;
        debug!(address = %address, "address encoded");

        Ok(DerivedAddress {
            network: self.params.name.to_string(),
            path: path.clone(),
            master_fingerprint: self.master_fingerprint(),
            address,
            public_key_hex: public_key.to_hex(),
            extended_public_key: leaf.to_public().to_extended_string(&self.params.hd_key_versions),
        })
    }
}

/// The default path: one hardened step at the network's coin type.
pub fn default_path(params: &NetworkParams) -> Result<DerivationPath, WalletError> {
    let child = ChildNumber::hardened(params.hd_coin_type).map_err(|source| {
        WalletError::Derivation {
            path: DerivationPath::master(),
            source,
        }
    })?;
    Ok(DerivationPath::master().child(child))
}

/// Run the full pipeline for one path.
///
/// `path` defaults to [`default_path`]. Returns the address and the hex
/// compressed public key; private material never leaves this call.
#[tracing::instrument(level = "debug", skip_all, fields(network = params.name))]
pub fn mnemonic_to_address(
    phrase: &str,
    passphrase: &str,
    params: &NetworkParams,
    path: Option<&DerivationPath>,
) -> Result<DerivedAddress, WalletError> {
    let path = match path {
        Some(p) => p.clone(),
        None => default_path(params)?,
    };
    KeyDeriver::from_mnemonic(phrase, passphrase, params)?.derive_address(&path)
}
