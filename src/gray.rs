//! Reflected binary Gray code.
//!
//! Consecutive entries of a Gray sequence differ in exactly one bit, which is
//! what makes adjacent Karnaugh-map cells logically adjacent.

use crate::error::{Error, Result};
use crate::pattern::{Bit, Pattern, MAX_WIDTH};

/// Generates the `2^width` Gray codes of the given width, in order.
///
/// The width-1 sequence is `0, 1`. The width-`w` sequence is the width-`(w-1)`
/// sequence prefixed with `0`, followed by the same sequence reversed and
/// prefixed with `1`.
///
/// ```
/// use kmap_rs::gray::generate;
///
/// let codes: Vec<String> = generate(2).unwrap().iter().map(|p| p.to_string()).collect();
/// assert_eq!(codes, ["00", "01", "11", "10"]);
/// ```
pub fn generate(width: usize) -> Result<Vec<Pattern>> {
    if width == 0 || width > MAX_WIDTH {
        return Err(Error::InvalidWidth(width));
    }

    let mut codes: Vec<Vec<Bit>> = vec![vec![Bit::Zero], vec![Bit::One]];
    for _ in 1..width {
        let mut next = Vec::with_capacity(codes.len() * 2);
        for code in &codes {
            next.push(prefixed(Bit::Zero, code));
        }
        for code in codes.iter().rev() {
            next.push(prefixed(Bit::One, code));
        }
        codes = next;
    }

    Ok(codes.into_iter().map(Pattern::new).collect())
}

fn prefixed(head: Bit, tail: &[Bit]) -> Vec<Bit> {
    let mut bits = Vec::with_capacity(tail.len() + 1);
    bits.push(head);
    bits.extend_from_slice(tail);
    bits
}
