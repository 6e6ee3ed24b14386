//! # kmap-rs: exact two-level logic minimization
//!
//! **`kmap-rs`** turns the truth table of a boolean function, given as the set of
//! its minterms, into a minimal sum-of-products expression. It is the engine
//! behind an interactive Karnaugh map: toggle cells, ask for the expression.
//!
//! ## How it works
//!
//! The minimizer runs the classical **Quine-McCluskey** procedure to find all
//! prime implicants, reduces the prime-implicant table by extracting essential
//! primes and removing dominated rows and columns, and solves whatever is left
//! exactly with **Petrick's method**.
//!
//! ## Basic Usage
//!
//! ```rust
//! use kmap_rs::minimize::minimize;
//!
//! // f(A, B) is true for AB = 00, 01, 10
//! let f = minimize(2, [0, 1, 2]).unwrap();
//! assert_eq!(f, "A\u{305} + B\u{305}");
//!
//! // Constant functions
//! assert_eq!(minimize(3, []).unwrap(), "0");
//! assert_eq!(minimize(1, [0, 1]).unwrap(), "1");
//! ```
//!
//! ## Core Components
//!
//! - **[`minimize`](mod@crate::minimize)**: The [`Minimizer`][crate::minimize::Minimizer] engine and the one-shot [`minimize()`][crate::minimize::minimize] function.
//! - **[`pattern`]**: Bit patterns over `{0, 1, -}` and their decimal/literal conversions.
//! - **[`gray`]**: Reflected binary Gray code sequences.
//! - **[`implicant`]**, **[`table`]**, **[`petrick`]**: The building blocks of the algorithm.
//! - **[`kmap`]**: Grid addressing for Karnaugh maps and the pure [`toggle_minterm`][crate::kmap::toggle_minterm].
//!
//! The library logs its progress through the [`log`] facade at `debug` level
//! and never installs a logger itself.

pub mod bitset;
pub mod error;
pub mod gray;
pub mod implicant;
pub mod kmap;
pub mod minimize;
pub mod pattern;
pub mod petrick;
pub mod table;

pub use error::{Error, Result};
pub use gray::generate as generate_gray_codes;
pub use kmap::toggle_minterm;
pub use minimize::minimize;
pub use pattern::pattern_to_literal_expression;
