/// Error types for address encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The string is not valid Base58.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded length is not version + 20-byte hash + checksum.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// The trailing 4 bytes do not match SHA-256d of the payload.
    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// Public key is neither 33 (compressed) nor 65 (uncompressed) bytes.
    #[error("invalid public key length: {0} bytes")]
    InvalidPublicKeyLength(usize),

    /// The address decodes but belongs to another network.
    #[error("address version {got:#04x} does not match {network} ({expected:#04x})")]
    WrongNetwork {
        network: &'static str,
        expected: u8,
        got: u8,
    },

    /// Unrecognized network name.
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] keyderive_primitives::PrimitivesError),
}
