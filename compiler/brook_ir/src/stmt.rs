//! Statement nodes.

use crate::Expression;

/// `{% for <variable> in <source> limit: .. offset: .. reversed %}`
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForStatement {
    /// Name bound to the current element in each iteration.
    pub variable: String,
    /// A `Range` expression or anything that evaluates to an enumerable value.
    pub source: Expression,
    pub body: Vec<Statement>,
    pub limit: Option<Expression>,
    pub offset: Option<Expression>,
    pub reversed: bool,
    /// Runs instead of the body when the sliced sequence is empty.
    pub else_branch: Option<Vec<Statement>>,
}

impl ForStatement {
    pub fn new(variable: impl Into<String>, source: Expression, body: Vec<Statement>) -> Self {
        ForStatement {
            variable: variable.into(),
            source,
            body,
            limit: None,
            offset: None,
            reversed: false,
            else_branch: None,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: Expression) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: Expression) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[must_use]
    pub fn else_branch(mut self, statements: Vec<Statement>) -> Self {
        self.else_branch = Some(statements);
        self
    }
}

/// An `elsif` arm of an `if` statement.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElseIf {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

/// A `when` arm of a `case` statement. Matches if any option equals the subject.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct When {
    pub options: Vec<Expression>,
    pub body: Vec<Statement>,
}

/// Statement node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// Raw template text, written without encoding.
    Text(String),

    /// `{{ expression }}`, written through the render's encoder.
    Output(Expression),

    /// `{% assign identifier = value %}`
    Assign {
        identifier: String,
        value: Expression,
    },

    For(Box<ForStatement>),

    Break,

    Continue,

    If {
        condition: Expression,
        body: Vec<Statement>,
        else_ifs: Vec<ElseIf>,
        else_branch: Option<Vec<Statement>>,
    },

    Unless {
        condition: Expression,
        body: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
    },

    Case {
        subject: Expression,
        whens: Vec<When>,
        else_branch: Option<Vec<Statement>>,
    },

    /// `{% capture identifier %}...{% endcapture %}`
    Capture {
        identifier: String,
        body: Vec<Statement>,
    },

    Increment {
        identifier: String,
    },

    Decrement {
        identifier: String,
    },

    Comment(String),
}

impl Statement {
    pub fn text(text: impl Into<String>) -> Self {
        Statement::Text(text.into())
    }

    pub fn output(expression: Expression) -> Self {
        Statement::Output(expression)
    }

    pub fn assign(identifier: impl Into<String>, value: Expression) -> Self {
        Statement::Assign {
            identifier: identifier.into(),
            value,
        }
    }

    pub fn for_loop(statement: ForStatement) -> Self {
        Statement::For(Box::new(statement))
    }

    pub fn if_then(condition: Expression, body: Vec<Statement>) -> Self {
        Statement::If {
            condition,
            body,
            else_ifs: Vec::new(),
            else_branch: None,
        }
    }
}
