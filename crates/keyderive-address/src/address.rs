/// P2PKH address encoding and decoding.
///
/// An address is `Base58(version || Hash160(pubkey) || checksum)` where the
/// checksum is the first four bytes of SHA-256d over the first 21 bytes.
/// Decoding recovers exactly the version byte and hash that were encoded.

use std::fmt;
use std::str::FromStr;

use keyderive_primitives::base58;
use keyderive_primitives::ec::public_key::{COMPRESSED_LEN, UNCOMPRESSED_LEN};
use keyderive_primitives::ec::PublicKey;
use keyderive_primitives::hash::hash160;
use serde::{Serialize, Serializer};

use crate::network::NetworkParams;
use crate::AddressError;

/// Length of a decoded address: version + 20-byte hash + 4-byte checksum.
const DECODED_LEN: usize = 1 + 20 + base58::CHECKSUM_LEN;

/// A Base58Check P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    address_string: String,
    version: u8,
    public_key_hash: [u8; 20],
}

impl Address {
    /// Encode an address from a 20-byte public key hash and version byte.
    pub fn from_public_key_hash(hash: &[u8; 20], version: u8) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(version);
        payload.extend_from_slice(hash);

        Address {
            address_string: base58::check_encode(&payload),
            version,
            public_key_hash: *hash,
        }
    }

    /// Encode an address from serialized public key bytes.
    ///
    /// The hash is taken over the bytes as given, so a compressed and an
    /// uncompressed encoding of the same point yield different addresses.
    ///
    /// # Returns
    /// `InvalidPublicKeyLength` unless the key is 33 or 65 bytes.
    pub fn from_public_key_bytes(public_key: &[u8], version: u8) -> Result<Self, AddressError> {
        if public_key.len() != COMPRESSED_LEN && public_key.len() != UNCOMPRESSED_LEN {
            return Err(AddressError::InvalidPublicKeyLength(public_key.len()));
        }
        Ok(Self::from_public_key_hash(&hash160(public_key), version))
    }

    /// Encode the address of a public key's compressed form on `params`.
    pub fn from_public_key(public_key: &PublicKey, params: &NetworkParams) -> Self {
        Self::from_public_key_hash(&public_key.hash160(), params.pub_key_hash_addr_id)
    }

    /// Encode an address from a hex public key string.
    pub fn from_public_key_hex(public_key_hex: &str, params: &NetworkParams) -> Result<Self, AddressError> {
        let bytes = hex::decode(public_key_hex)?;
        Self::from_public_key_bytes(&bytes, params.pub_key_hash_addr_id)
    }

    /// Decode an address string of any version.
    ///
    /// # Returns
    /// `InvalidAddress` for non-Base58 input, `InvalidAddressLength` unless
    /// it decodes to 25 bytes, `ChecksumMismatch` if the checksum fails.
    pub fn from_string(addr: &str) -> Result<Self, AddressError> {
        let decoded = base58::decode(addr)
            .map_err(|_| AddressError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != DECODED_LEN {
            return Err(AddressError::InvalidAddressLength(addr.to_string()));
        }

        if decoded[21..] != base58::checksum(&decoded[..21]) {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            version: decoded[0],
            public_key_hash: pkh,
        })
    }

    /// Decode an address and require it to carry `params`' version byte.
    pub fn from_string_for_network(addr: &str, params: &NetworkParams) -> Result<Self, AddressError> {
        let address = Self::from_string(addr)?;
        if !address.is_for_network(params) {
            return Err(AddressError::WrongNetwork {
                network: params.name,
                expected: params.pub_key_hash_addr_id,
                got: address.version,
            });
        }
        Ok(address)
    }

    pub fn is_for_network(&self, params: &NetworkParams) -> bool {
        self.version == params.pub_key_hash_addr_id
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// The RIPEMD-160(SHA-256(pubkey)) payload.
    pub fn public_key_hash(&self) -> &[u8; 20] {
        &self.public_key_hash
    }

    pub fn as_str(&self) -> &str {
        &self.address_string
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address_string)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for Address {
    /// Serializes as the Base58Check string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAINNET_PARAMS, TESTNET_PARAMS};

    const TEST_PUBLIC_KEY: &str =
        "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
    const TEST_PUBLIC_KEY_HASH: &str = "00ac6144c4db7b5790f343cf0477a65fb8a02eb7";

    fn test_hash() -> [u8; 20] {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&hex::decode(TEST_PUBLIC_KEY_HASH).unwrap());
        hash
    }

    #[test]
    fn test_from_string_mainnet() {
        let addr = Address::from_string("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        assert_eq!(addr.version(), 0x00);
        assert_eq!(
            hex::encode(addr.public_key_hash()),
            "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
        assert!(addr.is_for_network(&MAINNET_PARAMS));
    }

    #[test]
    fn test_from_string_testnet_same_hash() {
        let main = Address::from_string("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        let test = Address::from_string("mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd").unwrap();
        assert_eq!(test.version(), 0x6f);
        assert_eq!(main.public_key_hash(), test.public_key_hash());
    }

    #[test]
    fn test_from_public_key_hex_both_networks() {
        let main = Address::from_public_key_hex(TEST_PUBLIC_KEY, &MAINNET_PARAMS).unwrap();
        assert_eq!(main.as_str(), "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS");
        assert_eq!(main.public_key_hash(), &test_hash());

        let test = Address::from_public_key_hex(TEST_PUBLIC_KEY, &TESTNET_PARAMS).unwrap();
        assert_eq!(test.as_str(), "mfaWoDuTsFfiunLTqZx4fKpVsUctiDV9jk");
    }

    #[test]
    fn test_from_public_key_matches_bytes() {
        let pk = PublicKey::from_hex(TEST_PUBLIC_KEY).unwrap();
        let a = Address::from_public_key(&pk, &MAINNET_PARAMS);
        let b = Address::from_public_key_bytes(&pk.to_compressed(), 0x00).unwrap();
        assert_eq!(a, b);
        assert_ne!(
            a,
            Address::from_public_key_bytes(&pk.to_uncompressed(), 0x00).unwrap()
        );
    }

    #[test]
    fn test_from_public_key_bytes_rejects_bad_length() {
        assert!(matches!(
            Address::from_public_key_bytes(&[0x02; 32], 0x00),
            Err(AddressError::InvalidPublicKeyLength(32))
        ));
        assert!(matches!(
            Address::from_public_key_hex("invalid_pubkey", &MAINNET_PARAMS),
            Err(AddressError::HexDecode(_))
        ));
    }

    #[test]
    fn test_roundtrip_hash_and_version() {
        let addr = Address::from_public_key_hash(&test_hash(), 0x6f);
        let parsed: Address = addr.as_str().parse().unwrap();
        assert_eq!(parsed, addr);
        assert_eq!(parsed.version(), 0x6f);
        assert_eq!(parsed.public_key_hash(), &test_hash());
        assert_eq!(format!("{}", parsed), "mfaWoDuTsFfiunLTqZx4fKpVsUctiDV9jk");
    }

    #[test]
    fn test_from_string_errors() {
        assert!(matches!(
            Address::from_string("ADD8E55"),
            Err(AddressError::InvalidAddressLength(_))
        ));
        assert!(matches!(
            Address::from_string("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFM0"),
            Err(AddressError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_string("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMs"),
            Err(AddressError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_from_string_for_network() {
        assert!(Address::from_string_for_network(
            "1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr",
            &MAINNET_PARAMS
        )
        .is_ok());
        let err = Address::from_string_for_network(
            "1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr",
            &TESTNET_PARAMS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AddressError::WrongNetwork { expected: 0x6f, got: 0x00, .. }
        ));
    }
}
