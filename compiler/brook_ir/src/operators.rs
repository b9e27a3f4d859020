//! Binary operators.
//!
//! All operators are total: the evaluator never fails on an operand type it
//! does not understand, it answers `false` instead.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Membership
    Contains,
    StartsWith,
    EndsWith,
}

impl BinaryOp {
    /// Returns the template-level spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
        }
    }

    /// Whether the operator short-circuits on its left operand.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}
