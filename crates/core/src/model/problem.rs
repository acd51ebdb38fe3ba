use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Operand combinations that cannot form a well-posed question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("{left} - {right} would be negative")]
    NegativeDifference { left: u32, right: u32 },

    #[error("cannot divide {left} by zero")]
    DivideByZero { left: u32 },

    #[error("{left} is not a multiple of {right}")]
    InexactDivision { left: u32, right: u32 },

    #[error("{left} {symbol} {right} overflows")]
    Overflow {
        left: u32,
        right: u32,
        symbol: &'static str,
    },
}

//
// ─── OPERATOR ─────────────────────────────────────────────────────────────────
//

/// The four arithmetic operations a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Symbol shown between the operands.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }

    /// Applies the operator over non-negative integers.
    ///
    /// Returns `None` when the result would be negative, fractional, undefined,
    /// or would not fit in a `u32`.
    #[must_use]
    pub fn evaluate(self, left: u32, right: u32) -> Option<u32> {
        match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div => {
                if right == 0 || left % right != 0 {
                    None
                } else {
                    Some(left / right)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// One arithmetic question with its precomputed answer.
///
/// Every value of this type satisfies `left <op> right == answer` over the
/// non-negative integers, so subtraction never goes below zero and division
/// never leaves a remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Problem {
    left: u32,
    right: u32,
    operator: Operator,
    answer: u32,
}

impl Problem {
    /// Builds a problem and computes its answer.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError` when the operands do not produce a non-negative
    /// integer result for `operator`.
    pub fn new(left: u32, right: u32, operator: Operator) -> Result<Self, ProblemError> {
        match operator.evaluate(left, right) {
            Some(answer) => Ok(Self {
                left,
                right,
                operator,
                answer,
            }),
            None => Err(match operator {
                Operator::Sub => ProblemError::NegativeDifference { left, right },
                Operator::Div if right == 0 => ProblemError::DivideByZero { left },
                Operator::Div => ProblemError::InexactDivision { left, right },
                Operator::Add | Operator::Mul => ProblemError::Overflow {
                    left,
                    right,
                    symbol: operator.symbol(),
                },
            }),
        }
    }

    /// Assembles a problem whose answer the caller already computed.
    pub(crate) fn generated(left: u32, right: u32, operator: Operator, answer: u32) -> Self {
        debug_assert_eq!(operator.evaluate(left, right), Some(answer));
        Self {
            left,
            right,
            operator,
            answer,
        }
    }

    #[must_use]
    pub fn left(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> u32 {
        self.right
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn answer(&self) -> u32 {
        self.answer
    }

    /// Question as shown to the player, e.g. `"12 ÷ 4 = ?"`.
    #[must_use]
    pub fn question_text(&self) -> String {
        format!("{} {} {} = ?", self.left, self.operator, self.right)
    }

    /// Checks a typed answer.
    ///
    /// Surrounding whitespace is ignored. Anything that is not an integer,
    /// including the empty string, is simply wrong.
    #[must_use]
    pub fn is_correct(&self, raw: &str) -> bool {
        raw.trim()
            .parse::<i64>()
            .is_ok_and(|value| value == i64::from(self.answer))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
