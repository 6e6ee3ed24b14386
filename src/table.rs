//! Prime-implicant coverage table.
//!
//! Rows are minterms, columns are prime implicants. A table is never edited
//! in place: every reduction step builds a new table, so a pass that returns
//! an equal table is exactly a pass that changed nothing.
//!
//! Columns are referred to by [`ImplicantId`], a stable index handed out by
//! the [`ImplicantArena`]. Patterns are only looked up again when the chosen
//! cover is rendered.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use log::debug;

use crate::implicant::Implicant;
use crate::pattern::Pattern;

/// Stable index of an implicant inside an [`ImplicantArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ImplicantId(usize);

impl ImplicantId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ImplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Implicants deduplicated by pattern, each with a stable [`ImplicantId`].
#[derive(Debug, Clone, Default)]
pub struct ImplicantArena {
    implicants: Vec<Implicant>,
    index: HashMap<Pattern, ImplicantId>,
}

impl ImplicantArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `implicant` unless one with the same pattern is already present.
    ///
    /// Returns the id of the stored implicant and whether it was newly added.
    pub fn insert(&mut self, implicant: Implicant) -> (ImplicantId, bool) {
        if let Some(&id) = self.index.get(implicant.pattern()) {
            return (id, false);
        }
        let id = ImplicantId(self.implicants.len());
        self.index.insert(implicant.pattern().clone(), id);
        self.implicants.push(implicant);
        (id, true)
    }

    pub fn get(&self, id: ImplicantId) -> &Implicant {
        &self.implicants[id.0]
    }

    pub fn id_of(&self, pattern: &Pattern) -> Option<ImplicantId> {
        self.index.get(pattern).copied()
    }

    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Iterates over `(id, implicant)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ImplicantId, &Implicant)> {
        self.implicants.iter().enumerate().map(|(i, imp)| (ImplicantId(i), imp))
    }

    pub fn into_implicants(self) -> Vec<Implicant> {
        self.implicants
    }
}

/// Mapping from each remaining minterm to the prime implicants covering it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PrimeImplicantTable {
    rows: BTreeMap<u32, BTreeSet<ImplicantId>>,
}

/// Outcome of [`PrimeImplicantTable::reduce`].
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Essential implicants, in the order they were found.
    pub essentials: Vec<ImplicantId>,
    /// What is left for Petrick's method.
    pub residual: PrimeImplicantTable,
}

impl PrimeImplicantTable {
    /// Builds the table for `minterms` over every implicant in `arena`.
    pub fn build(minterms: &BTreeSet<u32>, arena: &ImplicantArena) -> Self {
        let rows = minterms
            .iter()
            .map(|&m| {
                let cols = arena.iter().filter(|(_, imp)| imp.covers(m)).map(|(id, _)| id).collect();
                (m, cols)
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows (minterms still to be covered).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &BTreeMap<u32, BTreeSet<ImplicantId>> {
        &self.rows
    }

    /// The transposed table: each column with the rows it covers.
    pub fn columns(&self) -> BTreeMap<ImplicantId, BTreeSet<u32>> {
        let mut cols: BTreeMap<ImplicantId, BTreeSet<u32>> = BTreeMap::new();
        for (&row, ids) in &self.rows {
            for &id in ids {
                cols.entry(id).or_default().insert(row);
            }
        }
        cols
    }

    /// Columns that are the only cover of some row, in row order, without repeats.
    pub fn essentials(&self) -> Vec<ImplicantId> {
        let mut seen = BTreeSet::new();
        let mut res = Vec::new();
        for ids in self.rows.values() {
            if let (1, Some(&id)) = (ids.len(), ids.first()) {
                if seen.insert(id) {
                    res.push(id);
                }
            }
        }
        res
    }

    /// Rows whose column set contains the column set of another surviving row.
    ///
    /// Rows are visited in ascending minterm order. Of two identical rows the
    /// lower one is removed and the higher one survives, so at least one row
    /// of every equivalence class remains.
    pub fn dominating_rows(&self) -> BTreeSet<u32> {
        let mut removed = BTreeSet::new();
        for (&a, cols_a) in &self.rows {
            let dominates = self
                .rows
                .iter()
                .any(|(&b, cols_b)| b != a && !removed.contains(&b) && cols_b.is_subset(cols_a));
            if dominates {
                removed.insert(a);
            }
        }
        removed
    }

    /// Columns whose row set is contained in the row set of another surviving column.
    ///
    /// Columns are visited in ascending id order. Of two identical columns
    /// the lower id is removed and the higher id survives.
    pub fn dominated_columns(&self) -> BTreeSet<ImplicantId> {
        let cols = self.columns();
        let mut removed = BTreeSet::new();
        for (&x, rows_x) in &cols {
            let dominated = cols
                .iter()
                .any(|(&y, rows_y)| y != x && !removed.contains(&y) && rows_x.is_subset(rows_y));
            if dominated {
                removed.insert(x);
            }
        }
        removed
    }

    /// Returns a new table without the given rows.
    pub fn without_rows(&self, rows: &BTreeSet<u32>) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|(m, _)| !rows.contains(m))
            .map(|(&m, ids)| (m, ids.clone()))
            .collect();
        Self { rows }
    }

    /// Returns a new table without the given columns.
    pub fn without_columns(&self, columns: &BTreeSet<ImplicantId>) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|(&m, ids)| (m, ids.difference(columns).copied().collect()))
            .collect();
        Self { rows }
    }

    /// Repeatedly extracts essential implicants and drops dominating rows and
    /// dominated columns until a full pass changes nothing.
    pub fn reduce(self) -> Reduction {
        let mut table = self;
        let mut essentials = Vec::new();

        loop {
            let mut changed = false;

            let found = table.essentials();
            if !found.is_empty() {
                debug!("reduce: essentials {:?}", found);
                let cols = table.columns();
                let covered: BTreeSet<u32> = found.iter().flat_map(|id| cols[id].iter().copied()).collect();
                let found_set: BTreeSet<ImplicantId> = found.iter().copied().collect();
                table = table.without_rows(&covered).without_columns(&found_set);
                essentials.extend(found);
                changed = true;
            }

            let rows = table.dominating_rows();
            if !rows.is_empty() {
                debug!("reduce: dominating rows {:?}", rows);
                table = table.without_rows(&rows);
                changed = true;
            }

            let cols = table.dominated_columns();
            if !cols.is_empty() {
                debug!("reduce: dominated columns {:?}", cols);
                table = table.without_columns(&cols);
                changed = true;
            }

            if !changed {
                break;
            }
        }

        debug!("reduce: {} essentials, {} rows left", essentials.len(), table.len());
        Reduction {
            essentials,
            residual: table,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::pattern::{binary_to_decimal, Bit};

    /// Builds a genuine implicant for `pattern` by combining its two halves.
    fn from_pattern(pattern: &str) -> Implicant {
        let p: Pattern = pattern.parse().unwrap();
        match p.bits().iter().position(|&b| b == Bit::DontCare) {
            None => Implicant::from_minterm(binary_to_decimal(&p).unwrap(), p.len()).unwrap(),
            Some(pos) => {
                let with = |c: char| -> String {
                    pattern
                        .chars()
                        .enumerate()
                        .map(|(i, x)| if i == pos { c } else { x })
                        .collect()
                };
                from_pattern(&with('0')).combine(&from_pattern(&with('1'))).unwrap()
            }
        }
    }

    fn arena(patterns: &[&str]) -> ImplicantArena {
        let mut arena = ImplicantArena::new();
        for p in patterns {
            arena.insert(from_pattern(p));
        }
        arena
    }

    fn ids(ids: &[usize]) -> BTreeSet<ImplicantId> {
        ids.iter().map(|&i| ImplicantId(i)).collect()
    }

    #[test]
    fn test_arena_dedup() {
        let mut arena = ImplicantArena::new();
        let (a, new_a) = arena.insert(from_pattern("0-"));
        let (b, new_b) = arena.insert(from_pattern("0-"));
        let (c, new_c) = arena.insert(from_pattern("-0"));
        assert!(new_a);
        assert!(!new_b);
        assert!(new_c);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.id_of(&"-0".parse().unwrap()), Some(c));
        assert_eq!(arena.get(c).pattern().to_string(), "-0");
    }

    #[test]
    fn test_build() {
        // f(A,B) = m(0,1,2): primes 0- and -0
        let arena = arena(&["0-", "-0"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2]), &arena);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[&0], ids(&[0, 1]));
        assert_eq!(table.rows()[&1], ids(&[0]));
        assert_eq!(table.rows()[&2], ids(&[1]));
        assert_eq!(table.essentials(), vec![ImplicantId(0), ImplicantId(1)]);
    }

    #[test]
    fn test_columns_transpose() {
        let arena = arena(&["0-", "-0"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2]), &arena);
        let cols = table.columns();
        assert_eq!(cols[&ImplicantId(0)], BTreeSet::from([0, 1]));
        assert_eq!(cols[&ImplicantId(1)], BTreeSet::from([0, 2]));
    }

    #[test]
    fn test_identical_rows_keep_one() {
        // Both rows are covered by the same two columns.
        let arena = arena(&["--0", "-0-"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 4]), &arena);
        let rows = table.dominating_rows();
        assert_eq!(rows, BTreeSet::from([0]));
        assert_eq!(table.without_rows(&rows).len(), 1);
    }

    #[test]
    fn test_identical_columns_keep_one() {
        let arena = arena(&["--0", "-0-"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 4]), &arena);
        assert_eq!(table.dominated_columns(), ids(&[0]));
    }

    #[test]
    fn test_strict_column_dominance() {
        // Column 0 covers {1}, column 1 covers {1, 5}.
        let arena = arena(&["0-1", "--1"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([1, 5]), &arena);
        assert_eq!(table.dominated_columns(), ids(&[0]));
    }

    #[test]
    fn test_without_columns_is_persistent() {
        let arena = arena(&["0-", "-0"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2]), &arena);
        let smaller = table.without_columns(&ids(&[0]));
        assert_eq!(table.rows()[&0], ids(&[0, 1]));
        assert_eq!(smaller.rows()[&0], ids(&[1]));
        assert!(smaller.rows()[&1].is_empty());
    }

    #[test]
    fn test_reduce_essentials_only() {
        let arena = arena(&["0-", "-0"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2]), &arena);
        let reduction = table.reduce();
        assert_eq!(reduction.essentials, vec![ImplicantId(0), ImplicantId(1)]);
        assert!(reduction.residual.is_empty());
    }

    #[test]
    fn test_reduce_cyclic_core_is_left_alone() {
        // f(A,B,C) = m(0,1,2,5,6,7): six primes in a cycle, no essentials.
        let arena = arena(&["00-", "0-0", "-01", "-10", "1-1", "11-"]);
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2, 5, 6, 7]), &arena);
        let reduction = table.clone().reduce();
        assert!(reduction.essentials.is_empty());
        assert_eq!(reduction.residual, table);
    }
}
