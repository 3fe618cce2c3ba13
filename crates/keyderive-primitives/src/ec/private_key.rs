//! secp256k1 private key.
//!
//! Wraps a k256 signing key. The scalar is zeroized when the key is dropped
//! and never appears in `Debug` output.

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, Scalar};
use zeroize::{Zeroize, Zeroizing};

use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key: a scalar in `[1, n)`.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes encode a scalar in `[1, n)`, or an
    /// error for a wrong length, zero, or out-of-range value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Serialize the scalar as 32 big-endian bytes.
    ///
    /// The returned buffer is wiped when it goes out of scope.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_BYTES_LEN]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_BYTES_LEN]);
        let mut bytes = self.inner.to_bytes();
        out.copy_from_slice(&bytes);
        bytes.as_mut_slice().zeroize();
        out
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Compute `(self + tweak) mod n`.
    ///
    /// # Returns
    /// `None` when the sum is zero, which is not a valid private key.
    pub fn add_tweak(&self, tweak: &Scalar) -> Option<PrivateKey> {
        Self::from_scalar(self.to_scalar() + tweak)
    }

    /// Build a private key from a scalar, rejecting zero.
    pub(crate) fn from_scalar(scalar: Scalar) -> Option<PrivateKey> {
        let non_zero: Option<NonZeroScalar> = NonZeroScalar::new(scalar).into();
        non_zero.map(|s| PrivateKey {
            inner: SigningKey::from(s),
        })
    }

    /// Convert the private key to a k256 `Scalar` for arithmetic.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Interpret 32 big-endian bytes as a scalar without reduction.
///
/// # Returns
/// `None` if the value is greater than or equal to the curve order.
pub(crate) fn scalar_from_be_bytes(bytes: &[u8]) -> Option<Scalar> {
    if bytes.len() != PRIVATE_KEY_BYTES_LEN {
        return None;
    }
    Scalar::from_repr(FieldBytes::clone_from_slice(bytes)).into()
}
