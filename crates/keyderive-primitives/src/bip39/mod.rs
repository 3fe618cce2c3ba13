//! BIP-39 mnemonic validation and seed derivation.
//!
//! A [`Mnemonic`] can only be obtained by validating a phrase against the
//! English wordlist and its embedded checksum, so [`derive_seed`] never sees
//! an unchecked phrase. The seed is
//! `PBKDF2-HMAC-SHA512(NFKD(phrase), "mnemonic" || NFKD(passphrase), 2048)`.

use std::fmt;

use ::bip39::Language;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::PrimitivesError;

/// Length of a BIP-39 seed in bytes.
pub const SEED_LEN: usize = 64;

/// PBKDF2 iteration count fixed by BIP-39.
const PBKDF2_ROUNDS: u32 = 2048;

/// Prefix of the PBKDF2 salt; the passphrase is appended to it.
const SALT_PREFIX: &str = "mnemonic";

/// Word counts allowed by BIP-39 (128 to 256 bits of entropy).
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// A validated BIP-39 mnemonic phrase.
///
/// Holds the NFKD-normalized phrase with single-space separators. The phrase
/// is wiped on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
    word_count: usize,
}

impl Mnemonic {
    /// Validate a phrase and wrap it.
    ///
    /// The phrase is NFKD-normalized and runs of whitespace collapse to a
    /// single space before checking word count, wordlist membership, and
    /// the entropy checksum.
    ///
    /// # Returns
    /// `InvalidMnemonic` describing the first problem found.
    pub fn parse(phrase: &str) -> Result<Self, PrimitivesError> {
        let normalized = Zeroizing::new(normalize_phrase(phrase));
        let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
        if !VALID_WORD_COUNTS.contains(&word_count) {
            return Err(PrimitivesError::InvalidMnemonic(format!(
                "expected 12, 15, 18, 21 or 24 words, got {}",
                word_count
            )));
        }
        ::bip39::Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
        Ok(Mnemonic {
            phrase: normalized,
            word_count,
        })
    }

    /// Build the mnemonic encoding `entropy`.
    ///
    /// # Arguments
    /// * `entropy` - 16, 20, 24, 28 or 32 bytes.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, PrimitivesError> {
        let inner = ::bip39::Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
        Ok(Mnemonic {
            phrase: Zeroizing::new(inner.to_string()),
            word_count: inner.word_count(),
        })
    }

    /// Number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// The normalized phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Recover the entropy bytes the phrase encodes (checksum stripped).
    pub fn to_entropy(&self) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
        let inner = ::bip39::Mnemonic::parse_in_normalized(Language::English, &self.phrase)
            .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
        Ok(Zeroizing::new(inner.to_entropy()))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words, <redacted>)", self.word_count)
    }
}

/// A 64-byte BIP-39 seed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes, e.g. a BIP-32 test vector seed.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    /// Borrow the seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex of the seed.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Expand a validated mnemonic and passphrase into a 64-byte seed.
///
/// An empty passphrase is valid and is the usual default. This step cannot
/// fail: all validation happened in [`Mnemonic::parse`].
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    let mut salt = Zeroizing::new(String::with_capacity(SALT_PREFIX.len() + passphrase.len()));
    salt.push_str(SALT_PREFIX);
    salt.extend(passphrase.nfkd());

    let mut seed = Seed([0u8; SEED_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha512>(
        mnemonic.phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed.0,
    );
    seed
}

/// NFKD, then collapse all Unicode whitespace to single ASCII spaces.
fn normalize_phrase(phrase: &str) -> String {
    let nfkd: Zeroizing<String> = Zeroizing::new(phrase.nfkd().collect());
    nfkd.split_whitespace().collect::<Vec<_>>().join(" ")
}
