use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];
    pub const COMMUTATIVE: [Operator; 2] = [Operator::Add, Operator::Mul];
    pub const NON_COMMUTATIVE: [Operator; 2] = [Operator::Sub, Operator::Div];

    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }

    /// Applies the operator under the puzzle's rules.
    ///
    /// Returns `None` when the step is not allowed: a negative result, an
    /// uneven division, overflow, or one of the degenerate forms `x-0` and
    /// `x÷1` (those are already reachable as `x+0` and `x×1`).
    pub fn apply(self, x: i64, y: i64) -> Option<i64> {
        let result = match self {
            Operator::Add => x.checked_add(y)?,
            Operator::Sub if y > 0 => x.checked_sub(y)?,
            Operator::Mul => x.checked_mul(y)?,
            Operator::Div if y > 1 && x % y == 0 => x / y,
            Operator::Sub | Operator::Div => return None,
        };
        (result >= 0).then_some(result)
    }

    /// Token used in the postfix encoding of tree shapes.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operator::Add => '+',
                Operator::Sub => '-',
                Operator::Mul => '×',
                Operator::Div => '÷',
            }
        )
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Sub),
            '*' | '×' => Ok(Operator::Mul),
            '/' | '÷' => Ok(Operator::Div),
            other => Err(other),
        }
    }
}
