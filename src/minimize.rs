//! The minimizer engine: Quine-McCluskey followed by Petrick's method.
//!
//! # Algorithm
//!
//! 1. Every minterm becomes a singleton implicant.
//! 2. Implicants are bucketed by their number of ones. Each implicant of
//!    bucket `k` is tried against each implicant of bucket `k + 1`; pairs
//!    differing in a single fixed bit merge into a new implicant with that bit
//!    replaced by a don't-care.
//! 3. Implicants of a round that merged with nothing are prime. The merged
//!    implicants seed the next round, until a round merges nothing.
//! 4. The primes form a coverage table, which is reduced by extracting
//!    essential primes and removing dominating rows and dominated columns
//!    (see [`PrimeImplicantTable::reduce`]).
//! 5. Whatever is left is solved exactly by [`petrick::solve`].
//!
//! Every call starts from scratch and keeps no state between calls.
//!
//! # Examples
//!
//! ```
//! use kmap_rs::minimize::minimize;
//!
//! assert_eq!(minimize(2, [0, 1, 2, 3]).unwrap(), "1");
//! assert_eq!(minimize(2, []).unwrap(), "0");
//! assert_eq!(minimize(3, [4, 5, 6, 7]).unwrap(), "A");
//! ```

use std::collections::BTreeSet;

use log::debug;

use crate::error::{Error, Result};
use crate::implicant::Implicant;
use crate::pattern::Negation;
use crate::petrick;
use crate::table::{ImplicantArena, PrimeImplicantTable};

/// Letters used for variables, first variable first.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNO";

/// Rendering options for minimized expressions.
///
/// # Examples
///
/// ```
/// use kmap_rs::minimize::{MinimizeConfig, Minimizer};
/// use kmap_rs::pattern::Negation;
///
/// let config = MinimizeConfig {
///     letters: "XYZ",
///     negation: Negation::Prime,
///     separator: " | ",
/// };
/// let minimizer = Minimizer::with_config(3, config).unwrap();
/// assert_eq!(minimizer.minimize([0, 1, 7]).unwrap(), "X'Y' | XYZ");
/// ```
#[derive(Debug, Clone)]
pub struct MinimizeConfig {
    /// Variable letters; the count of letters bounds the number of variables (default: `ABCDEFGHIJKLMNO`)
    pub letters: &'static str,
    /// How negated literals are written (default: overline)
    pub negation: Negation,
    /// Text placed between product terms (default: `" + "`)
    pub separator: &'static str,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            letters: ALPHABET,
            negation: Negation::Overline,
            separator: " + ",
        }
    }
}

/// A minimal sum-of-products cover.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Solution {
    /// The function is false everywhere.
    Zero,
    /// The function is true everywhere.
    One,
    /// Essential primes first, then the terms picked by Petrick's method.
    Cover {
        essentials: Vec<Implicant>,
        residual: Vec<Implicant>,
    },
}

impl Solution {
    /// All product terms, in output order.
    pub fn terms(&self) -> impl Iterator<Item = &Implicant> {
        let (essentials, residual) = match self {
            Solution::Cover { essentials, residual } => (essentials.as_slice(), residual.as_slice()),
            _ => (&[] as &[Implicant], &[] as &[Implicant]),
        };
        essentials.iter().chain(residual)
    }

    pub fn len(&self) -> usize {
        self.terms().count()
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Solution::Zero | Solution::One)
    }

    /// Minterms covered by the solution.
    pub fn covered(&self, num_variables: usize) -> BTreeSet<u32> {
        match self {
            Solution::Zero => BTreeSet::new(),
            Solution::One => (0..1u32 << num_variables).collect(),
            Solution::Cover { .. } => self.terms().flat_map(|t| t.minterms().iter().copied()).collect(),
        }
    }
}

/// Minimizes boolean functions of a fixed number of variables.
#[derive(Debug, Clone)]
pub struct Minimizer {
    num_variables: usize,
    config: MinimizeConfig,
}

impl Minimizer {
    /// Creates a minimizer with the default configuration.
    ///
    /// Fails unless `1 <= num_variables <= 15`.
    pub fn new(num_variables: usize) -> Result<Self> {
        Self::with_config(num_variables, MinimizeConfig::default())
    }

    /// Creates a minimizer with a custom configuration.
    ///
    /// Fails unless `num_variables` is at least 1 and at most the number of
    /// configured letters (and never more than 31, so that `2^N` minterms
    /// stay addressable).
    pub fn with_config(num_variables: usize, config: MinimizeConfig) -> Result<Self> {
        let max = config.letters.chars().count().min(u32::BITS as usize - 1);
        if num_variables == 0 || num_variables > max {
            return Err(Error::InvalidVariableCount { num_variables, max });
        }
        Ok(Self { num_variables, config })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn config(&self) -> &MinimizeConfig {
        &self.config
    }

    /// Number of distinct input combinations, `2^N`.
    pub fn universe(&self) -> u32 {
        1 << self.num_variables
    }

    fn collect_minterms(&self, minterms: impl IntoIterator<Item = u32>) -> Result<BTreeSet<u32>> {
        let minterms: BTreeSet<u32> = minterms.into_iter().collect();
        if let Some(&minterm) = minterms.iter().find(|&&m| m >= self.universe()) {
            return Err(Error::MintermOutOfRange {
                minterm,
                num_variables: self.num_variables,
            });
        }
        Ok(minterms)
    }

    /// Finds all prime implicants of the function true exactly on `minterms`.
    ///
    /// Primes are returned in the order they were harvested: the singletons
    /// that merge with nothing first, then primes of each later round.
    pub fn prime_implicants(&self, minterms: impl IntoIterator<Item = u32>) -> Result<Vec<Implicant>> {
        let minterms = self.collect_minterms(minterms)?;
        Ok(self.find_primes(&minterms)?.into_implicants())
    }

    fn find_primes(&self, minterms: &BTreeSet<u32>) -> Result<ImplicantArena> {
        let mut round = minterms
            .iter()
            .map(|&m| Implicant::from_minterm(m, self.num_variables))
            .collect::<Result<Vec<_>>>()?;
        debug!("find_primes: {} seed implicants", round.len());

        let mut primes = ImplicantArena::new();
        let mut ceiling = self.num_variables + 1;

        while !round.is_empty() {
            let buckets = partition(&round, ceiling);
            let (next, merged) = combine_round(&round, &buckets);
            debug!(
                "find_primes: round with ceiling {}: {} implicants, {} combined",
                ceiling,
                round.len(),
                next.len()
            );

            for (implicant, _) in round.into_iter().zip(merged).filter(|(_, m)| !m) {
                let (id, added) = primes.insert(implicant);
                if added {
                    debug!("find_primes: prime {} = {}", id, primes.get(id));
                }
            }

            round = next;
            ceiling = ceiling.saturating_sub(1).max(1);
        }

        Ok(primes)
    }

    /// Computes a minimal cover of the function true exactly on `minterms`.
    pub fn solve(&self, minterms: impl IntoIterator<Item = u32>) -> Result<Solution> {
        let minterms = self.collect_minterms(minterms)?;

        if minterms.is_empty() {
            return Ok(Solution::Zero);
        }
        if minterms.len() as u64 == u64::from(self.universe()) {
            return Ok(Solution::One);
        }

        let primes = self.find_primes(&minterms)?;
        let table = PrimeImplicantTable::build(&minterms, &primes);
        debug!("solve: table with {} rows and {} primes", table.len(), primes.len());

        let reduction = table.reduce();
        let chosen = petrick::solve(&reduction.residual);
        debug!("solve: petrick picked {:?}", chosen);

        Ok(Solution::Cover {
            essentials: reduction.essentials.iter().map(|&id| primes.get(id).clone()).collect(),
            residual: chosen.iter().map(|&id| primes.get(id).clone()).collect(),
        })
    }

    /// Renders a solution as text using this minimizer's configuration.
    pub fn render(&self, solution: &Solution) -> Result<String> {
        match solution {
            Solution::Zero => Ok("0".to_string()),
            Solution::One => Ok("1".to_string()),
            Solution::Cover { .. } => {
                let letters: String = self.config.letters.chars().take(self.num_variables).collect();
                let terms = solution
                    .terms()
                    .map(|t| t.to_literals(&letters, self.config.negation))
                    .collect::<Result<Vec<_>>>()?;
                Ok(terms.join(self.config.separator))
            }
        }
    }

    /// Computes the minimal sum-of-products expression for `minterms`.
    pub fn minimize(&self, minterms: impl IntoIterator<Item = u32>) -> Result<String> {
        let solution = self.solve(minterms)?;
        self.render(&solution)
    }
}

/// Groups implicants by ones-count into `ceiling` buckets of indices into `round`.
fn partition(round: &[Implicant], ceiling: usize) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); ceiling];
    for (i, implicant) in round.iter().enumerate() {
        let ones = implicant.ones_count();
        debug_assert!(ones < ceiling, "ones count {} above ceiling {}", ones, ceiling);
        buckets[ones.min(ceiling - 1)].push(i);
    }
    buckets
}

/// Tries every pair from adjacent buckets.
///
/// Returns the merged implicants (deduplicated by pattern, first occurrence
/// kept) and, for each implicant of `round`, whether it merged at all.
fn combine_round(round: &[Implicant], buckets: &[Vec<usize>]) -> (Vec<Implicant>, Vec<bool>) {
    let mut merged = vec![false; round.len()];
    let mut next = ImplicantArena::new();

    for pair in buckets.windows(2) {
        for &i in &pair[0] {
            for &j in &pair[1] {
                if let Some(combined) = round[i].combine(&round[j]) {
                    merged[i] = true;
                    merged[j] = true;
                    next.insert(combined);
                }
            }
        }
    }

    (next.into_implicants(), merged)
}

/// Computes the minimal sum-of-products expression of the `num_variables`-input
/// function that is true exactly on `minterms`, with the default configuration.
///
/// Returns `"0"` for the empty set and `"1"` when every input is a minterm.
pub fn minimize(num_variables: usize, minterms: impl IntoIterator<Item = u32>) -> Result<String> {
    Minimizer::new(num_variables)?.minimize(minterms)
}
