//! Turns a matching (shape, assignment) pair into an ordered list of steps.
//!
//! While walking the postfix sequence every stack slot carries a [`Term`]
//! describing which card values and operators produced it. Terms are
//! registered in a [`TermSet`] shared by every render of one solve; a
//! commutative step whose swapped term was registered earlier means the
//! same computation was already rendered with its operands the other way
//! round, so the render is dropped.

use std::{fmt::Display, rc::Rc};

use itertools::Itertools;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{
    operator::Operator,
    tree::{ExpressionTree, Token},
};

/// Canonical key of a sub-computation, keyed on the values feeding it
/// rather than on the tree shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Card(i64),
    Apply(Operator, Rc<Term>, Rc<Term>),
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Card(value) => write!(f, "{value}"),
            Term::Apply(op, lhs, rhs) => write!(f, "({lhs}{op}{rhs})"),
        }
    }
}

pub type TermSet = FxHashSet<Term>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub lhs: i64,
    pub rhs: i64,
    pub operator: Operator,
    pub result: i64,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}={}", self.lhs, self.operator, self.rhs, self.result)
    }
}

/// One way to reach the objective, as the binary operations in the order
/// they are carried out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    steps: Vec<Step>,
}

impl Solution {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Value of the last step; `None` for a single card, which needs no steps.
    pub fn result(&self) -> Option<i64> {
        self.steps.last().map(|step| step.result)
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.steps.iter().join("; "))
    }
}

/// Renders `tree` applied to `values` as a [`Solution`].
///
/// Expects a pair that [`ExpressionTree::evaluate`] already accepted.
/// Returns `None` when a commutative step mirrors a term already in
/// `seen`. Terms registered before that point stay registered.
pub fn render(tree: &ExpressionTree, values: &[i64], seen: &mut TermSet) -> Option<Solution> {
    let mut values = values.iter().copied();
    let mut stack: Vec<(i64, Rc<Term>)> = Vec::with_capacity(tree.operand_count());
    let mut steps = Vec::with_capacity(tree.operator_count());

    for token in tree.tokens() {
        match *token {
            Token::Operand => {
                let value = values.next()?;
                stack.push((value, Rc::new(Term::Card(value))));
            }
            Token::Operator(op) => {
                let (y, rhs) = stack.pop()?;
                let (x, lhs) = stack.pop()?;
                let result = op.apply(x, y)?;

                if op.is_commutative() {
                    let mirror = Term::Apply(op, Rc::clone(&rhs), Rc::clone(&lhs));
                    if seen.contains(&mirror) {
                        trace!(%mirror, "commutative step already rendered");
                        return None;
                    }
                }

                let term = Term::Apply(op, lhs, rhs);
                seen.insert(term.clone());
                stack.push((result, Rc::new(term)));
                steps.push(Step {
                    lhs: x,
                    rhs: y,
                    operator: op,
                    result,
                });
            }
        }
    }
    Some(Solution::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(value: i64) -> Rc<Term> {
        Rc::new(Term::Card(value))
    }

    fn render_str(tree: &str, values: &[i64], seen: &mut TermSet) -> Option<String> {
        let tree: ExpressionTree = tree.parse().unwrap();
        render(&tree, values, seen).map(|solution| solution.to_string())
    }

    #[test]
    fn test_render_steps() {
        let mut seen = TermSet::default();

        assert_eq!(
            render_str("xx*x/", &[4, 3, 12], &mut seen).as_deref(),
            Some("4×3=12; 12÷12=1")
        );
        assert_eq!(
            render_str("xxxx-/-", &[4, 2, 3, 1], &mut seen).as_deref(),
            Some("3-1=2; 2÷2=1; 4-1=3")
        );
    }

    #[test]
    fn test_solution_accessors() {
        let tree: ExpressionTree = "xx+x*".parse().unwrap();
        let solution = render(&tree, &[1, 2, 4], &mut TermSet::default()).unwrap();

        assert_eq!(solution.steps().len(), 2);
        assert_eq!(
            solution.steps()[1],
            Step {
                lhs: 3,
                rhs: 4,
                operator: Operator::Mul,
                result: 12,
            }
        );
        assert_eq!(solution.result(), Some(12));
    }

    #[test]
    fn test_single_card_has_no_steps() {
        let solution = render(&ExpressionTree::leaf(), &[7], &mut TermSet::default()).unwrap();

        assert!(solution.steps().is_empty());
        assert_eq!(solution.result(), None);
        assert_eq!(solution.to_string(), "");
    }

    #[test]
    fn test_swapped_commutative_step_is_dropped() {
        let mut seen = TermSet::default();

        assert!(render_str("xx+", &[1, 2], &mut seen).is_some());
        assert!(render_str("xx+", &[2, 1], &mut seen).is_none());
        // the same orientation is not a mirror
        assert!(render_str("xx+", &[1, 2], &mut seen).is_some());
    }

    #[test]
    fn test_equal_operands_collapse_after_first_render() {
        let mut seen = TermSet::default();

        assert!(render_str("xx*", &[3, 3], &mut seen).is_some());
        assert!(render_str("xx*", &[3, 3], &mut seen).is_none());
    }

    #[test]
    fn test_non_commutative_steps_are_never_dropped() {
        let mut seen = TermSet::default();

        assert!(render_str("xx-", &[3, 1], &mut seen).is_some());
        assert!(render_str("xx-", &[3, 1], &mut seen).is_some());
        assert!(render_str("xx/", &[6, 3], &mut seen).is_some());
    }

    #[test]
    fn test_terms_registered_before_a_drop_are_kept() {
        let sum = Rc::new(Term::Apply(Operator::Add, card(1), card(1)));
        let mut seen = TermSet::default();
        seen.insert(Term::Apply(Operator::Mul, card(3), Rc::clone(&sum)));

        assert!(render_str("xx+x*", &[1, 1, 3], &mut seen).is_none());
        assert!(seen.contains(sum.as_ref()));
    }

    #[test]
    fn test_terms_follow_values_not_shapes() {
        let mut seen = TermSet::default();

        assert!(render_str("xxx++", &[1, 2, 3], &mut seen).is_some());
        // (2+3) was registered by the first render, so 3+2 is a mirror.
        assert!(render_str("xx+x-", &[3, 2, 1], &mut seen).is_none());
    }

    #[test]
    fn test_term_display() {
        let term = Term::Apply(
            Operator::Div,
            Rc::new(Term::Apply(Operator::Add, card(1), card(2))),
            card(3),
        );

        assert_eq!(term.to_string(), "((1+2)÷3)");
    }
}
