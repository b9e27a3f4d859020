//! Expression nodes.

use std::fmt;

use crate::BinaryOp;

/// A constant written directly in the template source.
///
/// Kept separate from the runtime value type so the tree has no dependency
/// on the evaluator; the interpreter converts literals when it meets them.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// One step of a member chain.
///
/// `a.b[0]["c"]` is `[Identifier("a"), Identifier("b"), Index(0), Index("c")]`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Property-style access (`.name`, or the leading variable).
    Identifier(String),
    /// Bracket access with a computed key.
    Index(Expression),
}

impl Segment {
    pub fn identifier(name: impl Into<String>) -> Self {
        Segment::Identifier(name.into())
    }
}

/// Expression node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// Constant value.
    Literal(Literal),

    /// Variable lookup followed by property/index steps. Never empty when
    /// produced by a parser; an empty chain evaluates to nil.
    Member(Vec<Segment>),

    /// Inclusive integer range `(start..end)`.
    Range {
        start: Box<Expression>,
        end: Box<Expression>,
    },

    /// Comparison, logical or membership operator.
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// `input | name: arguments`
    Filter {
        input: Box<Expression>,
        name: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn nil() -> Self {
        Expression::Literal(Literal::Nil)
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Literal(Literal::Boolean(value))
    }

    pub fn number(value: f64) -> Self {
        Expression::Literal(Literal::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    /// Build a member chain from a dotted path such as `forloop.index`.
    ///
    /// Only identifier segments are produced; use [`Expression::Member`]
    /// directly for index segments.
    pub fn path(path: &str) -> Self {
        Expression::Member(path.split('.').map(Segment::identifier).collect())
    }

    pub fn range(start: Expression, end: Expression) -> Self {
        Expression::Range {
            start: Box::new(start),
            end: Box::new(end),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn filter(input: Expression, name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Filter {
            input: Box::new(input),
            name: name.into(),
            arguments,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => write!(f, "nil"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "\"{s}\""),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{lit}"),
            Expression::Member(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    match segment {
                        Segment::Identifier(name) if i == 0 => write!(f, "{name}")?,
                        Segment::Identifier(name) => write!(f, ".{name}")?,
                        Segment::Index(index) => write!(f, "[{index}]")?,
                    }
                }
                Ok(())
            }
            Expression::Range { start, end } => write!(f, "({start}..{end})"),
            Expression::Binary { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_symbol())
            }
            Expression::Filter {
                input,
                name,
                arguments,
            } => {
                write!(f, "{input} | {name}")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i == 0 {
                        write!(f, ": {arg}")?;
                    } else {
                        write!(f, ", {arg}")?;
                    }
                }
                Ok(())
            }
        }
    }
}
