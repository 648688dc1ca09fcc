//! Expression tree shapes in postfix form.
//!
//! A shape only says where operands go and which operators combine them;
//! the values are supplied later by a permutation of the hand. Shapes for
//! `n` operands are built from every split into a left part of `i` operands
//! and a right part of `n - i`. For `+` and `×` only one of the two mirror
//! orientations of a split is kept.

use std::{fmt::Display, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::operator::Operator;

const OPERAND: char = 'x';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Operand,
    Operator(Operator),
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Operand => write!(f, "{OPERAND}"),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("empty expression tree")]
    Empty,
    #[error("unknown token '{0}'")]
    UnknownToken(char),
    #[error("operator at position {0} is missing an operand")]
    MissingOperand(usize),
    #[error("expression leaves {0} values on the stack")]
    Unbalanced(usize),
}

/// An immutable tree shape, stored as its postfix token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionTree {
    tokens: Box<[Token]>,
}

impl ExpressionTree {
    pub fn leaf() -> Self {
        Self {
            tokens: Box::new([Token::Operand]),
        }
    }

    /// `left ++ right ++ op`
    fn combine(left: &Self, right: &Self, op: Operator) -> Self {
        let tokens = left
            .tokens
            .iter()
            .chain(right.tokens.iter())
            .copied()
            .chain(std::iter::once(Token::Operator(op)))
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn operand_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::Operand))
            .count()
    }

    pub fn operator_count(&self) -> usize {
        self.tokens.len() - self.operand_count()
    }
}

impl Display for ExpressionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}

impl FromStr for ExpressionTree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut depth = 0usize;
        let tokens = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                if c == OPERAND {
                    depth += 1;
                    return Ok(Token::Operand);
                }
                let op = Operator::try_from(c).map_err(TreeError::UnknownToken)?;
                if depth < 2 {
                    return Err(TreeError::MissingOperand(position));
                }
                depth -= 1;
                Ok(Token::Operator(op))
            })
            .collect::<Result<Box<[_]>, _>>()?;

        match depth {
            0 => Err(TreeError::Empty),
            1 => Ok(Self { tokens }),
            n => Err(TreeError::Unbalanced(n)),
        }
    }
}

/// Shapes for every operand count from 1 up to a maximum, built bottom-up
/// so each smaller size is generated once.
#[derive(Debug, Clone)]
pub struct TreeTable {
    sizes: Vec<Vec<ExpressionTree>>,
}

impl TreeTable {
    pub fn new(max_operands: usize) -> Self {
        let mut sizes: Vec<Vec<ExpressionTree>> = Vec::with_capacity(max_operands);
        for n in 1..=max_operands {
            let shapes = if n == 1 {
                vec![ExpressionTree::leaf()]
            } else {
                Self::shapes_for(&sizes, n)
            };
            debug!(operands = n, shapes = shapes.len(), "generated tree shapes");
            sizes.push(shapes);
        }
        Self { sizes }
    }

    fn shapes_for(sizes: &[Vec<ExpressionTree>], n: usize) -> Vec<ExpressionTree> {
        let mut shapes = Vec::new();
        let mut emitted = FxHashSet::default();

        for split in 1..n {
            let lefts = &sizes[split - 1];
            let rights = &sizes[n - split - 1];
            for right in rights {
                for left in lefts {
                    for op in Operator::COMMUTATIVE {
                        if emitted.contains(&ExpressionTree::combine(right, left, op)) {
                            trace!(%left, %right, %op, "mirror shape already emitted");
                            continue;
                        }
                        let shape = ExpressionTree::combine(left, right, op);
                        emitted.insert(shape.clone());
                        shapes.push(shape);
                    }
                    for op in Operator::NON_COMMUTATIVE {
                        shapes.push(ExpressionTree::combine(left, right, op));
                    }
                }
            }
        }
        shapes
    }

    pub fn max_operands(&self) -> usize {
        self.sizes.len()
    }

    /// Shapes with exactly `n` operands; empty when `n` is 0 or beyond the table.
    pub fn get(&self, n: usize) -> &[ExpressionTree] {
        n.checked_sub(1)
            .and_then(|index| self.sizes.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn into_shapes(mut self, n: usize) -> Vec<ExpressionTree> {
        if n == 0 || n > self.sizes.len() {
            return Vec::new();
        }
        self.sizes.swap_remove(n - 1)
    }
}

/// All structurally distinct shapes with `n` operands.
pub fn trees(n: usize) -> Vec<ExpressionTree> {
    TreeTable::new(n).into_shapes(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 4)]
    #[case(3, 24)]
    #[case(4, 196)]
    #[case(5, 1752)]
    #[case(6, 16968)]
    #[case(7, 172080)]
    fn test_tree_counts(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(trees(n).len(), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    fn test_shapes_are_well_formed_and_distinct(#[case] n: usize) {
        let shapes = trees(n);

        for shape in &shapes {
            assert_eq!(shape.operand_count(), n);
            assert_eq!(shape.operator_count(), n - 1);
            assert_eq!(shape.to_string().parse::<ExpressionTree>().as_ref(), Ok(shape));
        }
        assert!(shapes.iter().all_unique());
    }

    #[test]
    fn test_three_operand_order() {
        let shapes = trees(3).iter().map(ToString::to_string).collect_vec();

        assert_eq!(
            shapes,
            vec![
                "xxx++", "xxx+*", "xxx+-", "xxx+/", "xxx*+", "xxx**", "xxx*-", "xxx*/", "xxx-+",
                "xxx-*", "xxx--", "xxx-/", "xxx/+", "xxx/*", "xxx/-", "xxx//", "xx+x-", "xx+x/",
                "xx*x-", "xx*x/", "xx-x-", "xx-x/", "xx/x-", "xx/x/",
            ]
        );
    }

    #[test]
    fn test_commutative_mirrors_collapse() {
        let shapes = trees(3).into_iter().collect::<FxHashSet<_>>();

        // x(xx+)+ is kept, its mirror (xx+)x+ is not.
        assert!(shapes.contains(&"xxx++".parse::<ExpressionTree>().unwrap()));
        assert!(!shapes.contains(&"xx+x+".parse::<ExpressionTree>().unwrap()));
        // both orientations survive for subtraction.
        assert!(shapes.contains(&"xxx+-".parse::<ExpressionTree>().unwrap()));
        assert!(shapes.contains(&"xx+x-".parse::<ExpressionTree>().unwrap()));
    }

    #[test]
    fn test_table_matches_direct_generation() {
        let table = TreeTable::new(4);

        assert_eq!(table.max_operands(), 4);
        for n in 1..=4 {
            assert_eq!(table.get(n), trees(n).as_slice());
        }
        assert!(table.get(0).is_empty());
        assert!(table.get(5).is_empty());
    }

    #[rstest]
    #[case("", TreeError::Empty)]
    #[case("xy+", TreeError::UnknownToken('y'))]
    #[case("x+", TreeError::MissingOperand(1))]
    #[case("xxx+", TreeError::Unbalanced(2))]
    fn test_parse_errors(#[case] input: &str, #[case] expected: TreeError) {
        assert_eq!(input.parse::<ExpressionTree>(), Err(expected));
    }
}
