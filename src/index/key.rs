//! Index key encoding
//!
//! A key part is a single column value encoded for deterministic total
//! ordering: Bool < Int < Float < String. Floats are stored as
//! order-preserving bit patterns. A composite key is a sequence of parts
//! compared lexicographically, so a k-part prefix addresses the contiguous
//! run of keys that start with it.

use std::cmp::Ordering;

use serde_json::Value;

/// A single encoded key part.
///
/// Ordering is deterministic across value kinds: Bool < Int < Float < String.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value (stored as bits for total ordering)
    Float(u64),
    /// String value
    String(String),
}

impl IndexKey {
    /// Create a key part from a boolean
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key part from an integer
    pub fn from_int(v: i64) -> Self {
        IndexKey::Int(v)
    }

    /// Create a key part from a float.
    ///
    /// Uses the bit representation for total ordering.
    pub fn from_float(v: f64) -> Self {
        let bits = v.to_bits();
        // Negative floats: flip all bits. Positive floats: flip the sign bit.
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Create a key part from a string
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::String(v.into())
    }

    /// Create a key part from a scalar value.
    ///
    /// Null, arrays, and objects have no key encoding and return `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(IndexKey::from_bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(IndexKey::from_int(i))
                } else {
                    n.as_f64().map(IndexKey::from_float)
                }
            }
            Value::String(s) => Some(IndexKey::from_string(s)),
            _ => None,
        }
    }

    /// Returns the smallest key part strictly greater than this one.
    ///
    /// Exact adjacency is what makes half-open prefix windows possible:
    /// every key starting with a prefix sorts strictly below the prefix
    /// with its last part replaced by its successor.
    pub fn successor(&self) -> Self {
        match self {
            IndexKey::Bool(false) => IndexKey::Bool(true),
            IndexKey::Bool(true) => IndexKey::Int(i64::MIN),
            IndexKey::Int(i) => {
                if *i < i64::MAX {
                    IndexKey::Int(i + 1)
                } else {
                    IndexKey::Float(0)
                }
            }
            IndexKey::Float(bits) => {
                if *bits < u64::MAX {
                    IndexKey::Float(bits + 1)
                } else {
                    IndexKey::String(String::new())
                }
            }
            IndexKey::String(s) => {
                let mut next = s.clone();
                next.push('\u{0}');
                IndexKey::String(next)
            }
        }
    }
}

/// A composite key: parts in key-column order, compared lexicographically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    parts: Vec<IndexKey>,
}

impl CompositeKey {
    /// Creates a composite key from parts
    pub fn new(parts: Vec<IndexKey>) -> Self {
        Self { parts }
    }

    /// Encodes a composite key from scalar values.
    ///
    /// Returns `None` if any value has no key encoding.
    pub fn from_values(values: &[Value]) -> Option<Self> {
        values
            .iter()
            .map(IndexKey::from_value)
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    /// Returns the key parts
    pub fn parts(&self) -> &[IndexKey] {
        &self.parts
    }

    /// Returns the number of parts
    pub fn width(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if this key begins with the given prefix
    pub fn starts_with(&self, prefix: &[IndexKey]) -> bool {
        self.parts.len() >= prefix.len() && &self.parts[..prefix.len()] == prefix
    }

    /// Compares this key's leading parts against a prefix.
    ///
    /// Only the first `prefix.len()` parts participate; a key that starts
    /// with the prefix compares `Equal` regardless of its remaining parts.
    pub fn prefix_cmp(&self, prefix: &[IndexKey]) -> Ordering {
        let take = prefix.len().min(self.parts.len());
        match self.parts[..take].cmp(&prefix[..take]) {
            Ordering::Equal if self.parts.len() < prefix.len() => Ordering::Less,
            ordering => ordering,
        }
    }

    /// Returns the exclusive upper fence of the prefix run: the smallest
    /// key sorting above every key that starts with `prefix`.
    ///
    /// `prefix` must be non-empty.
    pub fn prefix_successor(prefix: &[IndexKey]) -> Self {
        let mut parts = prefix.to_vec();
        let last = parts
            .pop()
            .expect("prefix successor of an empty prefix");
        parts.push(last.successor());
        Self::new(parts)
    }
}
