//! Petrick's method.
//!
//! Each row of the residual table becomes a sum of the implicants covering
//! it, e.g. `(P1 + P2)(P1 + P3)(P2 + P3)`. Multiplying the sums out gives a
//! sum of products; any product term is a valid cover, and the shortest one
//! is a minimum cover.
//!
//! Product terms are [`BitSet`]s of implicant indices. After each
//! multiplication, repeated terms are dropped and terms absorbed by a
//! smaller term (`X + XY = X`) are discarded, which keeps the expansion
//! small without changing the minimum.

use std::collections::HashSet;

use log::debug;

use crate::bitset::BitSet;
use crate::table::{ImplicantId, PrimeImplicantTable};

/// A sum of product terms.
type Sum = Vec<BitSet>;

/// Multiplies two sums of products: every term of `lhs` with every term of `rhs`.
///
/// Term order is `lhs`-major, which keeps the result deterministic.
pub fn multiply(lhs: &[BitSet], rhs: &[BitSet]) -> Vec<BitSet> {
    let mut seen = HashSet::new();
    let mut product = Vec::with_capacity(lhs.len() * rhs.len());
    for a in lhs {
        for b in rhs {
            let term = a.union(b);
            if seen.insert(term.clone()) {
                product.push(term);
            }
        }
    }
    absorb(product)
}

/// Drops every term that is a strict superset of another term, keeping order.
fn absorb(terms: Sum) -> Sum {
    let keep: Vec<bool> = terms
        .iter()
        .map(|t| !terms.iter().any(|u| u.len() < t.len() && u.is_subset(t)))
        .collect();
    terms.into_iter().zip(keep).filter(|(_, k)| *k).map(|(t, _)| t).collect()
}

/// Solves the covering problem left in `table`.
///
/// Returns the implicants of the smallest product term (the first one among
/// equally small terms), in ascending id order. An empty table needs nothing.
pub fn solve(table: &PrimeImplicantTable) -> Vec<ImplicantId> {
    if table.is_empty() {
        return Vec::new();
    }

    let ids: Vec<ImplicantId> = table.columns().into_keys().collect();
    let position = |id: &ImplicantId| ids.binary_search(id).ok();

    let sums: Vec<Sum> = table
        .rows()
        .values()
        .map(|cols| cols.iter().filter_map(position).map(BitSet::singleton).collect())
        .collect();
    debug!("petrick: {} sums over {} implicants", sums.len(), ids.len());

    let mut sums = sums.into_iter();
    let first = sums.next().unwrap_or_default();
    let product = sums.fold(first, |acc, sum| multiply(&acc, &sum));
    debug!("petrick: {} product terms", product.len());

    let Some(best) = product.iter().reduce(|best, t| if t.len() < best.len() { t } else { best }) else {
        return Vec::new();
    };
    best.iter().map(|i| ids[i]).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use test_log::test;

    use super::*;
    use crate::implicant::Implicant;
    use crate::table::ImplicantArena;

    fn set(items: &[usize]) -> BitSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_multiply_distributes() {
        // (P0 + P1)(P2 + P3) = P0P2 + P0P3 + P1P2 + P1P3
        let lhs = vec![set(&[0]), set(&[1])];
        let rhs = vec![set(&[2]), set(&[3])];
        let product = multiply(&lhs, &rhs);
        assert_eq!(product, vec![set(&[0, 2]), set(&[0, 3]), set(&[1, 2]), set(&[1, 3])]);
    }

    #[test]
    fn test_multiply_idempotent_and_absorbing() {
        // (P0 + P1)(P0 + P2) = P0 + P0P2 + P1P0 + P1P2 = P0 + P1P2
        let lhs = vec![set(&[0]), set(&[1])];
        let rhs = vec![set(&[0]), set(&[2])];
        let product = multiply(&lhs, &rhs);
        assert_eq!(product, vec![set(&[0]), set(&[1, 2])]);
    }

    #[test]
    fn test_solve_empty() {
        assert!(solve(&PrimeImplicantTable::default()).is_empty());
    }

    #[test]
    fn test_solve_cyclic_core() {
        // f(A,B,C) = m(0,1,2,5,6,7)
        let mut arena = ImplicantArena::new();
        let pairs = [(0, 1), (0, 2), (1, 5), (2, 6), (5, 7), (6, 7)];
        for (a, b) in pairs {
            let a = Implicant::from_minterm(a, 3).unwrap();
            let b = Implicant::from_minterm(b, 3).unwrap();
            arena.insert(a.combine(&b).unwrap());
        }
        let minterms = BTreeSet::from([0, 1, 2, 5, 6, 7]);
        let table = PrimeImplicantTable::build(&minterms, &arena);

        let cover = solve(&table);
        assert_eq!(cover.len(), 3);
        let covered: BTreeSet<u32> = cover
            .iter()
            .flat_map(|&id| arena.get(id).minterms().iter().copied())
            .collect();
        assert_eq!(covered, minterms);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut arena = ImplicantArena::new();
        for (a, b) in [(0, 1), (0, 2), (1, 5), (2, 6), (5, 7), (6, 7)] {
            let a = Implicant::from_minterm(a, 3).unwrap();
            let b = Implicant::from_minterm(b, 3).unwrap();
            arena.insert(a.combine(&b).unwrap());
        }
        let table = PrimeImplicantTable::build(&BTreeSet::from([0, 1, 2, 5, 6, 7]), &arena);
        assert_eq!(solve(&table), solve(&table));
    }
}
