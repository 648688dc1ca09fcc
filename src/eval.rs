use smallvec::SmallVec;

use crate::tree::{ExpressionTree, Token};

impl ExpressionTree {
    /// Evaluates the shape with `values` assigned to its operand slots from
    /// left to right.
    ///
    /// Returns `None` as soon as any step breaks the rules of
    /// [`Operator::apply`](crate::Operator::apply), or when there are fewer
    /// values than operand slots.
    pub fn evaluate(&self, values: &[i64]) -> Option<i64> {
        let mut values = values.iter().copied();
        let mut stack: SmallVec<[i64; 8]> = SmallVec::new();

        for token in self.tokens() {
            match token {
                Token::Operand => stack.push(values.next()?),
                Token::Operator(op) => {
                    let y = stack.pop()?;
                    let x = stack.pop()?;
                    stack.push(op.apply(x, y)?);
                }
            }
        }
        stack.pop()
    }
}
