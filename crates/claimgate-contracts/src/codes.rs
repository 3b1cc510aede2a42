//! Code set types.
//!
//! Diagnosis and procedure codes are opaque strings. ClaimGate never parses
//! or normalizes them: matching is exact and case-sensitive.

use serde::{Deserialize, Serialize};

/// An ordered collection of codes with set semantics for matching.
///
/// Input order is kept so reports render codes the way they were submitted.
/// Duplicates are harmless: only membership is ever asked of a `CodeSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSet(Vec<String>);

impl CodeSet {
    /// Build a code set from anything yielding string-like codes.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(codes.into_iter().map(Into::into).collect())
    }

    /// Return true if `code` is in the set.
    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    /// Return true if at least one code appears in both sets.
    ///
    /// An empty set on either side never intersects.
    pub fn intersects(&self, other: &CodeSet) -> bool {
        self.0.iter().any(|c| other.contains(c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the codes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CodeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
