//! Implicants: product terms together with the minterms they cover.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::pattern::{decimal_to_binary, Bit, Negation, Pattern};

/// A product term covering one or more minterms.
///
/// Implicants are plain values. Whether an implicant took part in a
/// combination is tracked by the caller per round, not stored here.
///
/// # Invariants
///
/// - `minterms` is never empty.
/// - `minterms` is exactly the set of values matched by `pattern`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Implicant {
    minterms: BTreeSet<u32>,
    pattern: Pattern,
}

impl Implicant {
    /// Creates the singleton implicant for `minterm` at the given width.
    pub fn from_minterm(minterm: u32, width: usize) -> Result<Self> {
        let pattern = decimal_to_binary(minterm, width)?;
        Ok(Self {
            minterms: BTreeSet::from([minterm]),
            pattern,
        })
    }

    pub fn minterms(&self) -> &BTreeSet<u32> {
        &self.minterms
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Number of `1` positions in the pattern, used for Quine-McCluskey grouping.
    pub fn ones_count(&self) -> usize {
        self.pattern.ones_count()
    }

    pub fn covers(&self, minterm: u32) -> bool {
        self.minterms.contains(&minterm)
    }

    /// Number of literals in the rendered product term.
    pub fn literal_count(&self) -> usize {
        self.pattern.len() - self.pattern.dont_care_count()
    }

    /// Tries to merge two implicants whose patterns differ in exactly one fixed bit.
    ///
    /// Returns `None` when the patterns have different widths, when a
    /// don't-care appears in only one of them, or when the number of
    /// differing `0`/`1` positions is not exactly one.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.pattern.len() != other.pattern.len() {
            return None;
        }

        let mut diff = None;
        for (i, (&a, &b)) in self.pattern.bits().iter().zip(other.pattern.bits()).enumerate() {
            match (a, b) {
                _ if a == b => {}
                (Bit::DontCare, _) | (_, Bit::DontCare) => return None,
                _ if diff.is_some() => return None,
                _ => diff = Some(i),
            }
        }

        let pos = diff?;
        let pattern = self
            .pattern
            .bits()
            .iter()
            .enumerate()
            .map(|(i, &bit)| if i == pos { Bit::DontCare } else { bit })
            .collect();
        let minterms = self.minterms.union(&other.minterms).copied().collect();
        Some(Implicant { minterms, pattern })
    }

    pub fn to_literals(&self, letters: &str, negation: Negation) -> Result<String> {
        self.pattern.to_literals(letters, negation)
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.pattern, self.minterms)
    }
}
