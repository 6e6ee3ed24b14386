//! Bit patterns and their conversions.
//!
//! A [`Pattern`] is a fixed-width sequence of [`Bit`]s, most significant bit
//! first. A pattern without don't-cares names a single minterm; each
//! don't-care doubles the number of minterms it covers.
//!
//! # Examples
//!
//! ```
//! use kmap_rs::pattern::{binary_to_decimal, decimal_to_binary, pattern_to_literal_expression, Pattern};
//!
//! let p = decimal_to_binary(5, 4).unwrap();
//! assert_eq!(p.to_string(), "0101");
//! assert_eq!(binary_to_decimal(&p).unwrap(), 5);
//!
//! let q: Pattern = "1-0".parse().unwrap();
//! assert_eq!(pattern_to_literal_expression(&q, "ABC").unwrap(), "AC\u{305}");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Widest pattern that still converts to a `u32` minterm.
pub const MAX_WIDTH: usize = u32::BITS as usize;

/// Combining overline (U+0305) placed after a negated letter.
pub const OVERLINE: char = '\u{305}';

/// A single pattern position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    Zero,
    One,
    /// The variable was eliminated by combination.
    DontCare,
}

impl Bit {
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            '-' => Ok(Bit::DontCare),
            _ => Err(Error::InvalidSymbol(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
            Bit::DontCare => '-',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// How a negated literal is written.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Negation {
    /// `A` followed by U+0305, rendered as an overlined `A`.
    #[default]
    Overline,
    /// `A'`, for output where combining characters do not render.
    Prime,
}

/// A fixed-width sequence of bits over `{0, 1, -}`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pattern(Vec<Bit>);

impl Pattern {
    pub fn new(bits: Vec<Bit>) -> Self {
        Pattern(bits)
    }

    /// The zero-width pattern.
    pub fn empty() -> Self {
        Pattern(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    /// Number of [`Bit::One`] positions. Don't-cares are not counted.
    pub fn ones_count(&self) -> usize {
        self.0.iter().filter(|&&b| b == Bit::One).count()
    }

    /// Number of [`Bit::DontCare`] positions.
    pub fn dont_care_count(&self) -> usize {
        self.0.iter().filter(|&&b| b == Bit::DontCare).count()
    }

    /// Returns `true` if the pattern names exactly one minterm.
    pub fn is_minterm(&self) -> bool {
        self.dont_care_count() == 0
    }

    /// Returns `true` if `value` (read at this pattern's width) matches
    /// every fixed position of the pattern.
    pub fn matches(&self, value: u32) -> bool {
        let width = self.len();
        self.0.iter().enumerate().all(|(i, &bit)| {
            let shift = width - 1 - i;
            let set = shift < MAX_WIDTH && (value >> shift) & 1 == 1;
            match bit {
                Bit::DontCare => true,
                Bit::One => set,
                Bit::Zero => !set,
            }
        })
    }

    /// Concatenates two patterns, `self` first.
    pub fn concat(&self, other: &Pattern) -> Pattern {
        let mut bits = Vec::with_capacity(self.len() + other.len());
        bits.extend_from_slice(&self.0);
        bits.extend_from_slice(&other.0);
        Pattern(bits)
    }

    /// Enumerates every minterm covered by this pattern, in ascending order.
    pub fn minterms(&self) -> Result<Vec<u32>> {
        if self.len() > MAX_WIDTH {
            return Err(Error::InvalidWidth(self.len()));
        }
        let mut values = vec![0u32];
        for &bit in &self.0 {
            values = match bit {
                Bit::Zero => values.into_iter().map(|v| v << 1).collect(),
                Bit::One => values.into_iter().map(|v| (v << 1) | 1).collect(),
                Bit::DontCare => values.into_iter().flat_map(|v| [v << 1, (v << 1) | 1]).collect(),
            };
        }
        Ok(values)
    }

    /// Renders the pattern as a product of literals, see [`pattern_to_literal_expression`].
    pub fn to_literals(&self, letters: &str, negation: Negation) -> Result<String> {
        let letters: Vec<char> = letters.chars().collect();
        if letters.len() != self.len() {
            return Err(Error::LengthMismatch {
                pattern: self.len(),
                letters: letters.len(),
            });
        }
        let mut res = String::new();
        for (&bit, &letter) in self.0.iter().zip(&letters) {
            match bit {
                Bit::DontCare => {}
                Bit::One => res.push(letter),
                Bit::Zero => {
                    res.push(letter);
                    match negation {
                        Negation::Overline => res.push(OVERLINE),
                        Negation::Prime => res.push('\''),
                    }
                }
            }
        }
        Ok(res)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars().map(Bit::from_char).collect::<Result<Vec<_>>>().map(Pattern)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit.to_char())?;
        }
        Ok(())
    }
}

impl FromIterator<Bit> for Pattern {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Pattern(iter.into_iter().collect())
    }
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(Error::InvalidWidth(width));
    }
    Ok(())
}

/// Converts `value` into a `width`-bit pattern, most significant bit first.
///
/// Fails if `width` is not in `1..=32` or if `value >= 2^width`.
pub fn decimal_to_binary(value: u32, width: usize) -> Result<Pattern> {
    check_width(width)?;
    if (value as u64) >> width != 0 {
        return Err(Error::ValueOutOfRange { value, width });
    }
    Ok((0..width).rev().map(|shift| Bit::from((value >> shift) & 1 == 1)).collect())
}

/// Reads a pattern of `0`/`1` bits as an unsigned number, most significant bit first.
///
/// Fails on any don't-care position and on patterns wider than 32 bits.
pub fn binary_to_decimal(pattern: &Pattern) -> Result<u32> {
    if pattern.len() > MAX_WIDTH {
        return Err(Error::InvalidWidth(pattern.len()));
    }
    pattern.bits().iter().try_fold(0u32, |acc, &bit| match bit {
        Bit::Zero => Ok(acc << 1),
        Bit::One => Ok((acc << 1) | 1),
        Bit::DontCare => Err(Error::UnexpectedDontCare(pattern.to_string())),
    })
}

/// Renders `pattern` as a product of literals over `letters`.
///
/// Position `i` uses the `i`-th letter: `-` omits it, `1` emits it as is and
/// `0` emits it followed by a combining overline. Literals are concatenated
/// without a separator. `letters` must have exactly one letter per position.
pub fn pattern_to_literal_expression(pattern: &Pattern, letters: &str) -> Result<String> {
    pattern.to_literals(letters, Negation::Overline)
}
