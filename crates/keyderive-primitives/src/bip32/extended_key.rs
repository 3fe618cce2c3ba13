//! Extended keys: a key plus chain code and position in the tree.

use std::fmt;

use k256::Scalar;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::base58;
use crate::bip32::ChildNumber;
use crate::bip39::Seed;
use crate::ec::private_key::scalar_from_be_bytes;
use crate::ec::public_key::COMPRESSED_LEN;
use crate::ec::{PrivateKey, PublicKey};
use crate::hash::sha512_hmac;
use crate::PrimitivesError;

/// HMAC key used to derive the master node from a seed.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Length of a serialized extended key before Base58Check encoding.
pub const SERIALIZED_LEN: usize = 78;

/// Seed lengths accepted for master key generation (128 to 512 bits).
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// First four bytes of the Hash160 of a compressed public key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 4]);

impl Fingerprint {
    pub fn new(bytes: [u8; 4]) -> Self {
        Fingerprint(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    fn of(public_key: &PublicKey) -> Self {
        let mut out = [0u8; 4];
        out.copy_from_slice(&public_key.hash160()[..4]);
        Fingerprint(out)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

/// The 32 bytes of extra entropy carried alongside each key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    pub fn new(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Caller guarantees `bytes.len() == 32`.
    fn from_slice(bytes: &[u8]) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(bytes);
        ChainCode(out)
    }
}

impl fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChainCode(<redacted>)")
    }
}

/// Version prefixes for serialized extended keys (`xprv`/`xpub` on mainnet).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyVersions {
    pub private: [u8; 4],
    pub public: [u8; 4],
}

/// An extended private key: can derive both hardened and normal children.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    private_key: PrivateKey,
    chain_code: ChainCode,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
}

impl ExtendedPrivateKey {
    /// Derive the master node from raw seed bytes.
    ///
    /// `I = HMAC-SHA512("Bitcoin seed", seed)`; the left half is the master
    /// scalar and the right half the master chain code. Depth, parent
    /// fingerprint and child number are all zero.
    ///
    /// # Returns
    /// `InvalidKeyMaterial` if the seed is not 16 to 64 bytes long, or if the
    /// left half is zero or not below the curve order. The seed is fixed, so
    /// there is nothing to retry.
    pub fn new_master(seed: &[u8]) -> Result<Self, PrimitivesError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(PrimitivesError::InvalidKeyMaterial(format!(
                "seed must be {} to {} bytes, got {}",
                MIN_SEED_LEN,
                MAX_SEED_LEN,
                seed.len()
            )));
        }
        let i = Zeroizing::new(sha512_hmac(MASTER_HMAC_KEY, seed));
        let (il, ir) = i.split_at(32);
        let private_key = PrivateKey::from_bytes(il).map_err(|_| {
            PrimitivesError::InvalidKeyMaterial(
                "master scalar is zero or not below the curve order".to_string(),
            )
        })?;
        Ok(ExtendedPrivateKey {
            private_key,
            chain_code: ChainCode::from_slice(ir),
            depth: 0,
            parent_fingerprint: Fingerprint::default(),
            child_number: ChildNumber::Normal { index: 0 },
        })
    }

    /// Derive the master node from a BIP-39 seed.
    pub fn from_seed(seed: &Seed) -> Result<Self, PrimitivesError> {
        Self::new_master(seed.as_bytes())
    }

    /// Derive one child (CKDpriv).
    ///
    /// Hardened: `I = HMAC-SHA512(c, 0x00 || k || ser32(i))`.
    /// Normal: `I = HMAC-SHA512(c, serP(K) || ser32(i))`.
    /// The child scalar is `(IL + k) mod n` and the child chain code is `IR`.
    ///
    /// # Returns
    /// `ChildDerivationInvalid` if `IL >= n` or the child scalar is zero;
    /// the caller decides whether to try the next index.
    /// `InvalidDerivationIndex` if the index is `2^31` or more.
    /// `MaxDepthExceeded` past depth 255.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, PrimitivesError> {
        child.check_range()?;
        let depth = next_depth(self.depth)?;
        let mut data = Zeroizing::new(Vec::with_capacity(1 + COMPRESSED_LEN + 4));
        if child.is_hardened() {
            data.push(0x00);
            data.extend_from_slice(&*self.private_key.to_bytes());
        } else {
            data.extend_from_slice(&self.private_key.pub_key().to_compressed());
        }
        data.extend_from_slice(&child.to_u32().to_be_bytes());

        let (tweak, chain_code) = ckd_hmac(&self.chain_code, &data, child)?;
        let private_key = self
            .private_key
            .add_tweak(&tweak)
            .ok_or(PrimitivesError::ChildDerivationInvalid(child))?;

        Ok(ExtendedPrivateKey {
            private_key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
        })
    }

    /// Drop the private component, keeping chain code and position.
    pub fn to_public(&self) -> ExtendedPublicKey {
        ExtendedPublicKey {
            public_key: self.private_key.pub_key(),
            chain_code: self.chain_code.clone(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> PublicKey {
        self.private_key.pub_key()
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// Fingerprint of this node's own public key.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.public_key())
    }

    /// Base58Check serialization with `versions.private` (`xprv...`).
    pub fn to_extended_string(&self, versions: &KeyVersions) -> Zeroizing<String> {
        let mut key_data = Zeroizing::new([0u8; COMPRESSED_LEN]);
        key_data[1..].copy_from_slice(&*self.private_key.to_bytes());
        let raw = serialize(
            versions.private,
            self.depth,
            self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
            &key_data,
        );
        Zeroizing::new(base58::check_encode(&raw))
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

/// An extended public key: can derive normal children only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    public_key: PublicKey,
    chain_code: ChainCode,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
}

impl ExtendedPublicKey {
    /// Derive one normal child (CKDpub).
    ///
    /// `I = HMAC-SHA512(c, serP(K) || ser32(i))`; the child key is
    /// `point(IL) + K`.
    ///
    /// # Returns
    /// `MissingPrivateKey` for a hardened child, `ChildDerivationInvalid`
    /// if `IL >= n` or the result is the point at infinity.
    /// `InvalidDerivationIndex` if the index is `2^31` or more.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, PrimitivesError> {
        child.check_range()?;
        if child.is_hardened() {
            return Err(PrimitivesError::MissingPrivateKey);
        }
        let depth = next_depth(self.depth)?;
        let mut data = Vec::with_capacity(COMPRESSED_LEN + 4);
        data.extend_from_slice(&self.public_key.to_compressed());
        data.extend_from_slice(&child.to_u32().to_be_bytes());

        let (tweak, chain_code) = ckd_hmac(&self.chain_code, &data, child)?;
        let public_key = self
            .public_key
            .add_tweak(&tweak)
            .ok_or(PrimitivesError::ChildDerivationInvalid(child))?;

        Ok(ExtendedPublicKey {
            public_key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
        })
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// Fingerprint of this node's own public key.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.public_key)
    }

    /// Base58Check serialization with `versions.public` (`xpub...`).
    pub fn to_extended_string(&self, versions: &KeyVersions) -> String {
        let raw = serialize(
            versions.public,
            self.depth,
            self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
            &self.public_key.to_compressed(),
        );
        base58::check_encode(&raw)
    }
}

/// A node in the derivation tree, private-capable or public-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendedKey {
    Private(ExtendedPrivateKey),
    Public(ExtendedPublicKey),
}

impl ExtendedKey {
    /// Derive one child, dispatching on the node kind.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, PrimitivesError> {
        match self {
            ExtendedKey::Private(k) => k.derive_child(child).map(ExtendedKey::Private),
            ExtendedKey::Public(k) => k.derive_child(child).map(ExtendedKey::Public),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, ExtendedKey::Private(_))
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            ExtendedKey::Private(k) => k.public_key(),
            ExtendedKey::Public(k) => k.public_key(),
        }
    }

    /// The public-only view of this node.
    pub fn to_public(&self) -> ExtendedPublicKey {
        match self {
            ExtendedKey::Private(k) => k.to_public(),
            ExtendedKey::Public(k) => k.clone(),
        }
    }

    pub fn depth(&self) -> u8 {
        match self {
            ExtendedKey::Private(k) => k.depth(),
            ExtendedKey::Public(k) => k.depth(),
        }
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        match self {
            ExtendedKey::Private(k) => k.parent_fingerprint(),
            ExtendedKey::Public(k) => k.parent_fingerprint(),
        }
    }

    pub fn child_number(&self) -> ChildNumber {
        match self {
            ExtendedKey::Private(k) => k.child_number(),
            ExtendedKey::Public(k) => k.child_number(),
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.public_key())
    }

    /// Base58Check serialization using the version matching the node kind.
    pub fn to_extended_string(&self, versions: &KeyVersions) -> Zeroizing<String> {
        match self {
            ExtendedKey::Private(k) => k.to_extended_string(versions),
            ExtendedKey::Public(k) => Zeroizing::new(k.to_extended_string(versions)),
        }
    }

    /// Parse a Base58Check extended key.
    ///
    /// The version prefix selects private or public; anything else is
    /// rejected, as are depth-0 keys with a non-zero parent fingerprint or
    /// child number, private key data without its 0x00 pad, and invalid
    /// scalars or points.
    pub fn from_extended_string(s: &str, versions: &KeyVersions) -> Result<Self, PrimitivesError> {
        let raw = Zeroizing::new(base58::check_decode(s)?);
        if raw.len() != SERIALIZED_LEN {
            return Err(PrimitivesError::InvalidExtendedKey(format!(
                "expected {} bytes, got {}",
                SERIALIZED_LEN,
                raw.len()
            )));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&raw[0..4]);
        let depth = raw[4];
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&raw[5..9]);
        let parent_fingerprint = Fingerprint(fingerprint);
        let mut child_bytes = [0u8; 4];
        child_bytes.copy_from_slice(&raw[9..13]);
        let child_number = ChildNumber::from(u32::from_be_bytes(child_bytes));
        let chain_code = ChainCode::from_slice(&raw[13..45]);
        let key_data = &raw[45..78];

        if depth == 0 && (parent_fingerprint != Fingerprint::default() || child_number.to_u32() != 0) {
            return Err(PrimitivesError::InvalidExtendedKey(
                "master key with non-zero parent fingerprint or child number".to_string(),
            ));
        }

        if version == versions.private {
            if key_data[0] != 0x00 {
                return Err(PrimitivesError::InvalidExtendedKey(
                    "private key data must start with 0x00".to_string(),
                ));
            }
            let private_key = PrivateKey::from_bytes(&key_data[1..])
                .map_err(|e| PrimitivesError::InvalidExtendedKey(e.to_string()))?;
            Ok(ExtendedKey::Private(ExtendedPrivateKey {
                private_key,
                chain_code,
                depth,
                parent_fingerprint,
                child_number,
            }))
        } else if version == versions.public {
            let public_key = PublicKey::from_bytes(key_data)
                .map_err(|e| PrimitivesError::InvalidExtendedKey(e.to_string()))?;
            Ok(ExtendedKey::Public(ExtendedPublicKey {
                public_key,
                chain_code,
                depth,
                parent_fingerprint,
                child_number,
            }))
        } else {
            Err(PrimitivesError::InvalidExtendedKey(format!(
                "unknown version {}",
                hex::encode(version)
            )))
        }
    }
}

impl From<ExtendedPrivateKey> for ExtendedKey {
    fn from(k: ExtendedPrivateKey) -> Self {
        ExtendedKey::Private(k)
    }
}

impl From<ExtendedPublicKey> for ExtendedKey {
    fn from(k: ExtendedPublicKey) -> Self {
        ExtendedKey::Public(k)
    }
}

fn next_depth(depth: u8) -> Result<u8, PrimitivesError> {
    depth.checked_add(1).ok_or(PrimitivesError::MaxDepthExceeded)
}

/// Run the CKD HMAC and split it into the scalar tweak `IL` and chain code `IR`.
fn ckd_hmac(
    chain_code: &ChainCode,
    data: &[u8],
    child: ChildNumber,
) -> Result<(Scalar, ChainCode), PrimitivesError> {
    let i = Zeroizing::new(sha512_hmac(chain_code.as_bytes(), data));
    split_ckd_output(&i, child)
}

fn split_ckd_output(i: &[u8; 64], child: ChildNumber) -> Result<(Scalar, ChainCode), PrimitivesError> {
    let (il, ir) = i.split_at(32);
    let tweak = scalar_from_be_bytes(il).ok_or(PrimitivesError::ChildDerivationInvalid(child))?;
    Ok((tweak, ChainCode::from_slice(ir)))
}

fn serialize(
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
    chain_code: &ChainCode,
    key_data: &[u8; COMPRESSED_LEN],
) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(SERIALIZED_LEN));
    out.extend_from_slice(&version);
    out.push(depth);
    out.extend_from_slice(parent_fingerprint.as_bytes());
    out.extend_from_slice(&child_number.to_u32().to_be_bytes());
    out.extend_from_slice(chain_code.as_bytes());
    out.extend_from_slice(key_data);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip32::{DerivationPath, HARDENED_OFFSET};
    use crate::bip39::{derive_seed, Mnemonic};

    const MAINNET: KeyVersions = KeyVersions {
        private: [0x04, 0x88, 0xad, 0xe4],
        public: [0x04, 0x88, 0xb2, 0x1e],
    };

    const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    fn tv1_master() -> ExtendedPrivateKey {
        ExtendedPrivateKey::new_master(&hex::decode(TV1_SEED).unwrap()).unwrap()
    }

    fn abandon_master() -> ExtendedPrivateKey {
        let seed = derive_seed(&Mnemonic::parse(ABANDON_ABOUT).unwrap(), "");
        ExtendedPrivateKey::from_seed(&seed).unwrap()
    }

    // BIP-32 test vector 1

    #[test]
    fn test_vector_1_master() {
        let m = tv1_master();
        assert_eq!(
            m.to_extended_string(&MAINNET).as_str(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(
            m.to_public().to_extended_string(&MAINNET),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
        assert_eq!(m.fingerprint().to_string(), "3442193e");
        assert_eq!(m.depth(), 0);
        assert_eq!(m.parent_fingerprint(), Fingerprint::default());
    }

    #[test]
    fn test_vector_1_hardened_child() {
        let child = tv1_master().derive_child(ChildNumber::Hardened { index: 0 }).unwrap();
        assert_eq!(
            child.to_extended_string(&MAINNET).as_str(),
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
        );
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent_fingerprint().to_string(), "3442193e");
        assert_eq!(child.child_number().to_u32(), 0x8000_0000);
    }

    #[test]
    fn test_vector_1_full_chain() {
        let master = ExtendedKey::Private(tv1_master());
        let path: DerivationPath = "m/0'/1/2'/2/1000000000".parse().unwrap();
        let leaf = path.walk(&master).unwrap();
        assert_eq!(leaf.depth(), 5);
        assert_eq!(
            leaf.to_public().to_extended_string(&MAINNET),
            "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy"
        );
        assert_eq!(
            leaf.to_extended_string(&MAINNET).as_str(),
            "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76"
        );
    }

    #[test]
    fn test_abandon_master_fingerprint() {
        let m = abandon_master();
        assert_eq!(m.fingerprint().to_string(), "73c5da0a");
        assert_eq!(
            m.public_key().to_hex(),
            "03d902f35f560e0470c63313c7369168d9d7df2d49bf295fd9fb7cb109ccee0494"
        );
        assert_eq!(
            m.to_extended_string(&MAINNET).as_str(),
            "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu"
        );
    }

    #[test]
    fn test_public_derivation_matches_private() {
        let m = abandon_master();
        let child = ChildNumber::Normal { index: 0 };
        let from_private = m.derive_child(child).unwrap().to_public();
        let from_public = m.to_public().derive_child(child).unwrap();
        assert_eq!(from_private, from_public);
        assert_eq!(
            from_public.public_key().to_hex(),
            "0376bf533d4b15510fa9f4124b6e48616f07debcf2ef0cfb185cdc4a576450b475"
        );
    }

    #[test]
    fn test_public_parent_cannot_derive_hardened() {
        let xpub = ExtendedKey::Public(abandon_master().to_public());
        assert!(matches!(
            xpub.derive_child(ChildNumber::Hardened { index: 0 }),
            Err(PrimitivesError::MissingPrivateKey)
        ));
    }

    #[test]
    fn test_walk_reports_completed_prefix() {
        let xpub = ExtendedKey::Public(abandon_master().to_public());
        let path: DerivationPath = "m/0/1/2'/3".parse().unwrap();
        match path.walk(&xpub) {
            Err(PrimitivesError::PathDerivationFailed { completed, source }) => {
                assert_eq!(completed.to_string(), "m/0/1");
                assert!(matches!(*source, PrimitivesError::MissingPrivateKey));
            }
            other => panic!("expected PathDerivationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_empty_path_returns_master() {
        let master = ExtendedKey::Private(abandon_master());
        assert_eq!(DerivationPath::master().walk(&master).unwrap(), master);
    }

    #[test]
    fn test_walk_composes() {
        let master = ExtendedKey::Private(abandon_master());
        let first: DerivationPath = "m/0".parse().unwrap();
        let second: DerivationPath = "m/1".parse().unwrap();
        let both: DerivationPath = "m/0/1".parse().unwrap();
        let stepwise = second.walk(&first.walk(&master).unwrap()).unwrap();
        assert_eq!(stepwise, both.walk(&master).unwrap());
        assert_eq!(
            stepwise.public_key().to_hex(),
            "03446801102d378f09aa200debc1acdff0f6fcf1c6d9bc1e2c7e14076d5fbc740e"
        );
    }

    #[test]
    fn test_max_depth() {
        let mut node = ExtendedKey::Public(abandon_master().to_public());
        for _ in 0..255 {
            node = node.derive_child(ChildNumber::Normal { index: 0 }).unwrap();
        }
        assert_eq!(node.depth(), 255);
        assert!(matches!(
            node.derive_child(ChildNumber::Normal { index: 0 }),
            Err(PrimitivesError::MaxDepthExceeded)
        ));
    }

    #[test]
    fn test_master_rejects_bad_seed_length() {
        assert!(matches!(
            ExtendedPrivateKey::new_master(&[0u8; 15]),
            Err(PrimitivesError::InvalidKeyMaterial(_))
        ));
        assert!(ExtendedPrivateKey::new_master(&[0u8; 65]).is_err());
    }

    #[test]
    fn test_ckd_output_at_or_above_order_is_invalid_child() {
        let child = ChildNumber::Normal { index: 9 };

        // IL = n, the curve order
        let mut i = [0x11u8; 64];
        i[..32].copy_from_slice(
            &hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap(),
        );
        let err = split_ckd_output(&i, child).unwrap_err();
        assert!(matches!(err, PrimitivesError::ChildDerivationInvalid(c) if c == child));
        assert_eq!(err.to_string(), "child derivation produced an invalid key at index 9");

        i[..32].copy_from_slice(&[0xff; 32]);
        assert!(split_ckd_output(&i, child).is_err());

        // n - 1 is still a valid tweak
        i[..32].copy_from_slice(
            &hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140").unwrap(),
        );
        let (_, chain_code) = split_ckd_output(&i, child).unwrap();
        assert_eq!(chain_code.as_bytes(), &[0x11u8; 32]);
    }

    #[test]
    fn test_out_of_range_child_index_is_rejected() {
        let master = ExtendedPrivateKey::new_master(&[7u8; 32]).unwrap();
        let xpub = master.to_public();
        let normal_top_bit = ChildNumber::Normal { index: HARDENED_OFFSET };
        let hardened_max = ChildNumber::Hardened { index: u32::MAX };

        for child in [normal_top_bit, hardened_max] {
            assert!(matches!(
                master.derive_child(child),
                Err(PrimitivesError::InvalidDerivationIndex(_))
            ));
            assert!(matches!(
                xpub.derive_child(child),
                Err(PrimitivesError::InvalidDerivationIndex(_))
            ));
        }

        let path = DerivationPath::from(vec![ChildNumber::Hardened { index: HARDENED_OFFSET + 5 }]);
        let err = path.walk(&ExtendedKey::Private(master)).unwrap_err();
        let PrimitivesError::PathDerivationFailed { completed, source } = err else {
            panic!("expected a path failure");
        };
        assert!(completed.is_empty());
        assert!(matches!(*source, PrimitivesError::InvalidDerivationIndex(i) if i == HARDENED_OFFSET + 5));
    }

    #[test]
    fn test_parse_extended_keys() {
        let xprv = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
        let parsed = ExtendedKey::from_extended_string(xprv, &MAINNET).unwrap();
        assert!(parsed.is_private());
        assert_eq!(parsed.to_extended_string(&MAINNET).as_str(), xprv);

        let xpub = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";
        let parsed = ExtendedKey::from_extended_string(xpub, &MAINNET).unwrap();
        assert!(!parsed.is_private());
        assert_eq!(parsed.depth(), 1);
        assert_eq!(parsed.child_number(), ChildNumber::Hardened { index: 0 });

        // public-only derivation from a parsed xpub: m/0'/1
        let child = parsed.derive_child(ChildNumber::Normal { index: 1 }).unwrap();
        assert_eq!(
            child.to_extended_string(&MAINNET).as_str(),
            "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_extended_keys() {
        let xpub = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
        let raw = base58::check_decode(xpub).unwrap();

        // depth 0 with a parent fingerprint
        let mut bad = raw.clone();
        bad[5] = 1;
        assert!(matches!(
            ExtendedKey::from_extended_string(&base58::check_encode(&bad), &MAINNET),
            Err(PrimitivesError::InvalidExtendedKey(_))
        ));

        // unknown version
        let mut bad = raw.clone();
        bad[0] = 0x05;
        assert!(ExtendedKey::from_extended_string(&base58::check_encode(&bad), &MAINNET).is_err());

        // truncated
        assert!(ExtendedKey::from_extended_string(&base58::check_encode(&raw[..77]), &MAINNET).is_err());

        // public data under the private version
        let mut bad = raw.clone();
        bad[..4].copy_from_slice(&MAINNET.private);
        assert!(ExtendedKey::from_extended_string(&base58::check_encode(&bad), &MAINNET).is_err());

        // corrupted checksum
        let mut corrupted = xpub.to_string();
        corrupted.pop();
        corrupted.push('9');
        assert!(ExtendedKey::from_extended_string(&corrupted, &MAINNET).is_err());
    }

    #[test]
    fn test_debug_redacts_private_material() {
        let m = abandon_master();
        let shown = format!("{:?} {:?}", m, m.to_public());
        assert!(!shown.contains("1837c1be"));
        assert!(!shown.contains("7923408d"));
    }
}
