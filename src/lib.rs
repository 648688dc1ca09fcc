//! Solver for the Krypto card game.
//!
//! Given a hand of 2 to 7 cards and an objective, [`solve`] lists every way
//! to combine all the cards, each used once, with `+`, `-`, `×` and `÷` so
//! that the last result equals the objective. Every intermediate result must
//! be a non-negative integer, divisions must be exact, and the degenerate
//! steps `x-0` and `x÷1` are left out since `x+0` and `x×1` cover them.
//!
//! The search is exhaustive: each tree shape from [`trees`] is evaluated
//! against each ordering from [`permutations`]. Matches are rendered as
//! step lists and filtered through three duplicate checks: mirror shapes of
//! commutative operators, commutative steps already rendered with swapped
//! operands, and identical operation sequences.
//!
//! ```
//! let solutions = krypto::solve(&[2, 3, 4], 24);
//! assert_eq!(solutions.len(), 3);
//! assert!(solutions.iter().any(|s| s.to_string() == "3×4=12; 2×12=24"));
//! ```

mod eval;
mod hand;
mod operator;
mod permutation;
mod render;
mod solver;
mod tree;

pub use hand::{Deck, Hand, HandError, DEALT_CARDS, MAX_CARDS, MIN_CARDS};
pub use operator::Operator;
pub use permutation::{permutations, Permutations};
pub use render::{render, Solution, Step, Term, TermSet};
pub use solver::{solve, DedupContext, Report, Solver};
pub use tree::{trees, ExpressionTree, Token, TreeError, TreeTable};
