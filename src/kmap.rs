//! Karnaugh-map grid addressing and caller-side state.
//!
//! A map of `N` variables puts the first `N / 2` variables on the column
//! axis and the remaining `N - N / 2` on the row axis. Each axis is labelled
//! by the Gray sequence of its width, so neighbouring cells differ in one
//! variable. The cell at `(row, col)` stands for the minterm whose bits are
//! the column code followed by the row code.
//!
//! Nothing here knows about pixels; a front end maps its cells onto
//! `(row, col)` pairs and calls back into this module.
//!
//! # Examples
//!
//! ```
//! use kmap_rs::kmap::KarnaughMap;
//!
//! let mut map = KarnaughMap::new(3).unwrap();
//! assert_eq!(map.layout().rows(), 4);
//! assert_eq!(map.layout().columns(), 2);
//!
//! // Column A=1, rows BC=00 and BC=10.
//! map.toggle_cell(0, 1).unwrap();
//! map.toggle_cell(3, 1).unwrap();
//! assert_eq!(map.minterms().iter().copied().collect::<Vec<_>>(), vec![4, 6]);
//! assert_eq!(map.expression().unwrap(), "AC\u{305}");
//! ```

use std::collections::BTreeSet;

use log::debug;

use crate::error::{Error, Result};
use crate::gray;
use crate::minimize::{Minimizer, Solution, ALPHABET};
use crate::pattern::{binary_to_decimal, pattern_to_literal_expression, Pattern};

/// Returns `set` with `value` removed if present, or inserted otherwise.
pub fn toggle_minterm(set: &BTreeSet<u32>, value: u32) -> BTreeSet<u32> {
    let mut res = set.clone();
    if !res.remove(&value) {
        res.insert(value);
    }
    res
}

/// Gray codes for one axis; a zero-width axis has a single empty code.
fn axis_codes(width: usize) -> Result<Vec<Pattern>> {
    if width == 0 {
        Ok(vec![Pattern::empty()])
    } else {
        gray::generate(width)
    }
}

/// Row and column structure of a Karnaugh map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layout {
    num_variables: usize,
    row_codes: Vec<Pattern>,
    column_codes: Vec<Pattern>,
}

impl Layout {
    /// Creates the layout for `num_variables` variables (1 to 15).
    pub fn new(num_variables: usize) -> Result<Self> {
        let max = ALPHABET.len();
        if num_variables == 0 || num_variables > max {
            return Err(Error::InvalidVariableCount { num_variables, max });
        }
        let column_codes = axis_codes(num_variables / 2)?;
        let row_codes = axis_codes(num_variables - num_variables / 2)?;
        Ok(Self {
            num_variables,
            row_codes,
            column_codes,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of variables on the column axis.
    pub fn column_variables(&self) -> usize {
        self.num_variables / 2
    }

    /// Number of variables on the row axis.
    pub fn row_variables(&self) -> usize {
        self.num_variables - self.column_variables()
    }

    pub fn rows(&self) -> usize {
        self.row_codes.len()
    }

    pub fn columns(&self) -> usize {
        self.column_codes.len()
    }

    pub fn row_codes(&self) -> &[Pattern] {
        &self.row_codes
    }

    pub fn column_codes(&self) -> &[Pattern] {
        &self.column_codes
    }

    /// Column headers written with the column variables' letters.
    pub fn column_labels(&self) -> Result<Vec<String>> {
        let letters = &ALPHABET[..self.column_variables()];
        self.column_codes
            .iter()
            .map(|code| pattern_to_literal_expression(code, letters))
            .collect()
    }

    /// Row headers written with the row variables' letters.
    pub fn row_labels(&self) -> Result<Vec<String>> {
        let letters = &ALPHABET[self.column_variables()..self.num_variables];
        self.row_codes
            .iter()
            .map(|code| pattern_to_literal_expression(code, letters))
            .collect()
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows() || col >= self.columns() {
            return Err(Error::CellOutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.columns(),
            });
        }
        Ok(())
    }

    /// Full pattern of a cell: column code followed by row code.
    pub fn cell_pattern(&self, row: usize, col: usize) -> Result<Pattern> {
        self.check_cell(row, col)?;
        Ok(self.column_codes[col].concat(&self.row_codes[row]))
    }

    /// Minterm index of a cell.
    pub fn cell_minterm(&self, row: usize, col: usize) -> Result<u32> {
        binary_to_decimal(&self.cell_pattern(row, col)?)
    }

    /// Grid position of a minterm, the inverse of [`Layout::cell_minterm`].
    pub fn position(&self, minterm: u32) -> Result<(usize, usize)> {
        let out_of_range = Error::MintermOutOfRange {
            minterm,
            num_variables: self.num_variables,
        };
        if minterm >= 1 << self.num_variables {
            return Err(out_of_range);
        }
        let row_bits = self.row_variables();
        let row_value = minterm & ((1 << row_bits) - 1);
        let col_value = minterm >> row_bits;
        let find = |codes: &[Pattern], value: u32| codes.iter().position(|c| c.matches(value));
        find(&self.row_codes, row_value)
            .zip(find(&self.column_codes, col_value))
            .ok_or(out_of_range)
    }
}

/// A Karnaugh map: a layout plus the set of cells that are on.
///
/// The solution is recomputed from scratch on every request.
#[derive(Debug, Clone)]
pub struct KarnaughMap {
    layout: Layout,
    minimizer: Minimizer,
    minterms: BTreeSet<u32>,
}

impl KarnaughMap {
    /// Creates an all-zero map of `num_variables` variables.
    pub fn new(num_variables: usize) -> Result<Self> {
        Ok(Self {
            layout: Layout::new(num_variables)?,
            minimizer: Minimizer::new(num_variables)?,
            minterms: BTreeSet::new(),
        })
    }

    /// Creates a map with the given minterms switched on.
    pub fn with_minterms(num_variables: usize, minterms: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut map = Self::new(num_variables)?;
        for m in minterms {
            map.layout.position(m)?;
            map.minterms.insert(m);
        }
        Ok(map)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn minterms(&self) -> &BTreeSet<u32> {
        &self.minterms
    }

    pub fn is_set(&self, row: usize, col: usize) -> Result<bool> {
        let m = self.layout.cell_minterm(row, col)?;
        Ok(self.minterms.contains(&m))
    }

    /// Flips one minterm. Returns its new state.
    pub fn toggle(&mut self, minterm: u32) -> Result<bool> {
        self.layout.position(minterm)?;
        self.minterms = toggle_minterm(&self.minterms, minterm);
        let state = self.minterms.contains(&minterm);
        debug!("toggle({}) -> {}", minterm, state);
        Ok(state)
    }

    /// Flips the cell at `(row, col)`. Returns its new state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        let m = self.layout.cell_minterm(row, col)?;
        self.toggle(m)
    }

    /// Switches every cell off.
    pub fn clear(&mut self) {
        self.minterms.clear();
    }

    pub fn solve(&self) -> Result<Solution> {
        self.minimizer.solve(self.minterms.iter().copied())
    }

    /// The minimal sum-of-products expression of the current map.
    pub fn expression(&self) -> Result<String> {
        self.minimizer.minimize(self.minterms.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_toggle_minterm_is_pure() {
        let set = BTreeSet::from([1, 2]);
        let added = toggle_minterm(&set, 3);
        let removed = toggle_minterm(&set, 2);
        assert_eq!(set, BTreeSet::from([1, 2]));
        assert_eq!(added, BTreeSet::from([1, 2, 3]));
        assert_eq!(removed, BTreeSet::from([1]));
        assert_eq!(toggle_minterm(&added, 3), set);
    }

    #[test]
    fn test_layout_shapes() {
        let shapes = [(1, 2, 1), (2, 2, 2), (3, 4, 2), (4, 4, 4), (5, 8, 4)];
        for (n, rows, cols) in shapes {
            let layout = Layout::new(n).unwrap();
            assert_eq!((layout.rows(), layout.columns()), (rows, cols), "n = {}", n);
        }
    }

    #[test]
    fn test_layout_invalid() {
        assert!(Layout::new(0).is_err());
        assert!(Layout::new(16).is_err());
    }

    #[test]
    fn test_labels() {
        let layout = Layout::new(4).unwrap();
        let o = crate::pattern::OVERLINE;
        assert_eq!(
            layout.column_labels().unwrap(),
            vec![format!("A{o}B{o}"), format!("A{o}B"), "AB".to_string(), format!("AB{o}")]
        );
        assert_eq!(
            layout.row_labels().unwrap(),
            vec![format!("C{o}D{o}"), format!("C{o}D"), "CD".to_string(), format!("CD{o}")]
        );
    }

    #[test]
    fn test_single_variable_has_one_empty_column() {
        let layout = Layout::new(1).unwrap();
        assert_eq!(layout.column_labels().unwrap(), vec![String::new()]);
        assert_eq!(layout.cell_minterm(0, 0).unwrap(), 0);
        assert_eq!(layout.cell_minterm(1, 0).unwrap(), 1);
    }

    #[test]
    fn test_cell_minterms_4() {
        let layout = Layout::new(4).unwrap();
        let grid: Vec<Vec<u32>> = (0..layout.rows())
            .map(|r| (0..layout.columns()).map(|c| layout.cell_minterm(r, c).unwrap()).collect())
            .collect();
        assert_eq!(
            grid,
            vec![
                vec![0, 4, 12, 8],
                vec![1, 5, 13, 9],
                vec![3, 7, 15, 11],
                vec![2, 6, 14, 10],
            ]
        );
    }

    #[test]
    fn test_cells_cover_every_minterm_once() {
        for n in 1..=6 {
            let layout = Layout::new(n).unwrap();
            let mut seen = BTreeSet::new();
            for r in 0..layout.rows() {
                for c in 0..layout.columns() {
                    let m = layout.cell_minterm(r, c).unwrap();
                    assert!(seen.insert(m));
                    assert_eq!(layout.position(m).unwrap(), (r, c));
                }
            }
            assert_eq!(seen.len(), 1 << n);
        }
    }

    #[test]
    fn test_cell_out_of_range() {
        let layout = Layout::new(2).unwrap();
        assert_eq!(
            layout.cell_minterm(2, 0),
            Err(Error::CellOutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn test_map_toggle_and_solve() {
        let mut map = KarnaughMap::new(2).unwrap();
        assert_eq!(map.expression().unwrap(), "0");
        for r in 0..2 {
            for c in 0..2 {
                assert!(map.toggle_cell(r, c).unwrap());
            }
        }
        assert_eq!(map.expression().unwrap(), "1");
        assert!(!map.toggle(3).unwrap());
        assert!(!map.is_set(1, 1).unwrap());
        assert_eq!(map.solve().unwrap().len(), 2);
        map.clear();
        assert!(map.minterms().is_empty());
    }

    #[test]
    fn test_map_rejects_out_of_range() {
        assert!(KarnaughMap::with_minterms(2, [0, 4]).is_err());
        let mut map = KarnaughMap::new(3).unwrap();
        assert!(map.toggle(8).is_err());
        assert!(map.minterms().is_empty());
    }
}
