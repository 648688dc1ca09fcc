use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{
    permutation::permutations,
    render::{render, Solution, TermSet},
    tree::{trees, ExpressionTree},
};

/// Duplicate tracking for a single solve.
#[derive(Debug, Default)]
pub struct DedupContext {
    terms: TermSet,
    sequences: FxHashSet<Solution>,
}

impl DedupContext {
    /// Renders a matching pair and keeps it only if neither a mirrored
    /// commutative step nor an identical operation sequence was seen before.
    pub fn admit(&mut self, tree: &ExpressionTree, values: &[i64]) -> Option<Solution> {
        let Some(solution) = render(tree, values, &mut self.terms) else {
            trace!(%tree, ?values, "skipping duplicate subexpression");
            return None;
        };
        if self.sequences.contains(&solution) {
            trace!(%solution, "skipping duplicate operation sequence");
            return None;
        }
        self.sequences.insert(solution.clone());
        Some(solution)
    }
}

/// Outcome of one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub solutions: Vec<Solution>,
    /// (shape, ordering) pairs tried.
    pub candidates: usize,
    /// Pairs that evaluated to the goal, before duplicates were removed.
    pub matched: usize,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

/// Shapes and orderings for one hand, reusable across goals.
#[derive(Debug, Clone)]
pub struct Solver {
    trees: Vec<ExpressionTree>,
    permutations: Vec<Vec<i64>>,
}

impl Solver {
    pub fn new(operands: &[i64]) -> Self {
        Self {
            trees: trees(operands.len()),
            permutations: permutations(operands),
        }
    }

    pub fn trees(&self) -> &[ExpressionTree] {
        &self.trees
    }

    pub fn permutations(&self) -> &[Vec<i64>] {
        &self.permutations
    }

    pub fn solve(&self, goal: i64) -> Report {
        let mut context = DedupContext::default();
        let mut report = Report {
            candidates: self.trees.len() * self.permutations.len(),
            ..Default::default()
        };

        for tree in &self.trees {
            for values in &self.permutations {
                if tree.evaluate(values) != Some(goal) {
                    continue;
                }
                report.matched += 1;
                if let Some(solution) = context.admit(tree, values) {
                    report.solutions.push(solution);
                }
            }
        }

        debug!(
            goal,
            candidates = report.candidates,
            matched = report.matched,
            solutions = report.solutions.len(),
            "solve finished"
        );
        report
    }
}

/// Every distinct way to combine all `operands` into `goal`.
pub fn solve(operands: &[i64], goal: i64) -> Vec<Solution> {
    Solver::new(operands).solve(goal).solutions
}
