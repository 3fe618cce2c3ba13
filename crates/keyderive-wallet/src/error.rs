use std::fmt;

use keyderive_address::AddressError;
use keyderive_primitives::bip32::DerivationPath;
use keyderive_primitives::PrimitivesError;

/// Pipeline stage at which a derivation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Mnemonic,
    MasterKey,
    Derivation,
    Address,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Mnemonic => "mnemonic",
            Stage::MasterKey => "master-key",
            Stage::Derivation => "derivation",
            Stage::Address => "address",
        })
    }
}

/// Error types for the derivation pipeline, one variant per stage.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("mnemonic validation failed: {0}")]
    Mnemonic(#[source] PrimitivesError),
    #[error("master key generation failed: {0}")]
    MasterKey(#[source] PrimitivesError),
    #[error("derivation of {path} failed: {source}")]
    Derivation {
        path: DerivationPath,
        #[source]
        source: PrimitivesError,
    },
    #[error("address encoding failed: {0}")]
    Address(#[source] AddressError),
}

impl WalletError {
    /// The stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            WalletError::Mnemonic(_) => Stage::Mnemonic,
            WalletError::MasterKey(_) => Stage::MasterKey,
            WalletError::Derivation { .. } => Stage::Derivation,
            WalletError::Address(_) => Stage::Address,
        }
    }
}
