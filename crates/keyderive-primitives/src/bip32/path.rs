//! Child numbers and derivation paths.
//!
//! A [`ChildNumber`] is a 31-bit index flagged hardened or normal; on the
//! wire hardened indices carry the `2^31` offset. A [`DerivationPath`] is an
//! immutable sequence of child numbers, written `m/44'/0'/0'/0/0`.

use std::fmt;
use std::str::FromStr;

use crate::bip32::ExtendedKey;
use crate::PrimitivesError;

/// Offset added to hardened indices in their 32-bit wire form.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/// One step of a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildNumber {
    /// Derived from the parent public key; usable on public-only parents.
    Normal { index: u32 },
    /// Derived from the parent private key.
    Hardened { index: u32 },
}

impl ChildNumber {
    /// A normal child number.
    ///
    /// # Returns
    /// `InvalidDerivationIndex` if `index >= 2^31`.
    pub fn normal(index: u32) -> Result<Self, PrimitivesError> {
        check_index(index)?;
        Ok(ChildNumber::Normal { index })
    }

    /// A hardened child number. `index` is given without the offset.
    ///
    /// # Returns
    /// `InvalidDerivationIndex` if `index >= 2^31`.
    pub fn hardened(index: u32) -> Result<Self, PrimitivesError> {
        check_index(index)?;
        Ok(ChildNumber::Hardened { index })
    }

    /// Build a child number from an index and a hardened flag.
    pub fn new(index: u32, hardened: bool) -> Result<Self, PrimitivesError> {
        if hardened {
            Self::hardened(index)
        } else {
            Self::normal(index)
        }
    }

    /// The index without the hardened offset.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Normal { index } | ChildNumber::Hardened { index } => index,
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened { .. })
    }

    /// Reject variants built directly with an index of `2^31` or more.
    pub(crate) fn check_range(&self) -> Result<(), PrimitivesError> {
        check_index(self.index())
    }

    /// The 32-bit wire form: `index`, or `index + 2^31` when hardened.
    pub fn to_u32(&self) -> u32 {
        match *self {
            ChildNumber::Normal { index } => index,
            ChildNumber::Hardened { index } => index | HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildNumber {
    /// Decode a wire index; the top bit selects hardened.
    fn from(raw: u32) -> Self {
        if raw & HARDENED_OFFSET != 0 {
            ChildNumber::Hardened {
                index: raw ^ HARDENED_OFFSET,
            }
        } else {
            ChildNumber::Normal { index: raw }
        }
    }
}

impl From<ChildNumber> for u32 {
    fn from(child: ChildNumber) -> Self {
        child.to_u32()
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChildNumber::Normal { index } => write!(f, "{}", index),
            ChildNumber::Hardened { index } => write!(f, "{}'", index),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = PrimitivesError;

    /// Parse `7`, `7'`, `7h` or `7H`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PrimitivesError::InvalidDerivationPath(format!(
                "invalid path segment '{}'",
                s
            )));
        }
        let index: u32 = digits.parse().map_err(|_| {
            PrimitivesError::InvalidDerivationPath(format!("path segment '{}' is too large", s))
        })?;
        ChildNumber::new(index, hardened)
    }
}

fn check_index(index: u32) -> Result<(), PrimitivesError> {
    if index >= HARDENED_OFFSET {
        return Err(PrimitivesError::InvalidDerivationIndex(index));
    }
    Ok(())
}

/// An ordered walk from the master key (depth 0) to a target node.
///
/// The empty path denotes the master key itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path, `m`.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// A copy of this path extended by one step.
    pub fn child(&self, child: ChildNumber) -> Self {
        let mut steps = self.0.clone();
        steps.push(child);
        DerivationPath(steps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.0.iter()
    }

    /// Derive each step in order, starting from `master`.
    ///
    /// An empty path returns `master` unchanged. A failing step aborts the
    /// walk with `PathDerivationFailed`, which names the prefix that was
    /// derived successfully and wraps the step's own error.
    pub fn walk(&self, master: &ExtendedKey) -> Result<ExtendedKey, PrimitivesError> {
        let mut node = master.clone();
        for (depth, child) in self.0.iter().enumerate() {
            node = node
                .derive_child(*child)
                .map_err(|e| PrimitivesError::PathDerivationFailed {
                    completed: DerivationPath(self.0[..depth].to_vec()),
                    source: Box::new(e),
                })?;
            tracing::trace!(depth = depth + 1, child = %child, "derived child key");
        }
        Ok(node)
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(steps: Vec<ChildNumber>) -> Self {
        DerivationPath(steps)
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<I: IntoIterator<Item = ChildNumber>>(iter: I) -> Self {
        DerivationPath(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = PrimitivesError;

    /// Parse `m/44'/0'/0'/0/0`. The leading `m` is optional; `m` or the
    /// empty string alone is the master path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = match s {
            "" | "m" => return Ok(DerivationPath::master()),
            _ => s.strip_prefix("m/").unwrap_or(s),
        };
        rest.split('/').map(ChildNumber::from_str).collect()
    }
}
