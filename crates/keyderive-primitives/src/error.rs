/// Unified error type for all primitives operations.
///
/// Covers errors from encoding, EC operations, mnemonic handling, and
/// hierarchical key derivation.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("cannot derive a hardened or private child from a public key")]
    MissingPrivateKey,

    #[error("child derivation produced an invalid key at index {0}")]
    ChildDerivationInvalid(crate::bip32::ChildNumber),

    #[error("derivation index {0} out of range (must be below 2^31)")]
    InvalidDerivationIndex(u32),

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("cannot derive beyond depth 255")]
    MaxDepthExceeded,

    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    #[error("derivation failed after {completed}: {source}")]
    PathDerivationFailed {
        /// The prefix of the path that was derived successfully.
        completed: crate::bip32::DerivationPath,
        #[source]
        source: Box<PrimitivesError>,
    },
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
