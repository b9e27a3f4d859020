//! Render entry points.

use brook_ir::Statement;

use crate::{
    Completion, Interpreter, RenderError, RenderOutcome, TemplateContext, TextEncoder, TextSink,
};

/// Render `statements` against `ctx`, appending to `sink`.
///
/// Literal text is written as-is; output statements go through `encoder`.
/// A `break` or `continue` outside any loop stops the statement list it
/// appears in and the render still completes.
#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
pub fn render(
    statements: &[Statement],
    ctx: &mut TemplateContext,
    sink: &mut dyn TextSink,
    encoder: TextEncoder,
) -> Result<RenderOutcome, RenderError> {
    let mut interpreter = Interpreter::new(ctx, sink, encoder);
    let outcome = match interpreter.execute_block(statements)? {
        Completion::Completed => RenderOutcome::Completed,
        Completion::Cancelled => RenderOutcome::Cancelled,
        signal @ (Completion::Break | Completion::Continue) => {
            tracing::trace!(?signal, "ignoring loop signal outside of a loop");
            RenderOutcome::Completed
        }
    };
    tracing::debug!(?outcome, "render finished");
    Ok(outcome)
}

/// Output of [`Template::render_to_string`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub outcome: RenderOutcome,
}

/// A parsed template: an owned statement list that can be rendered many
/// times, against different contexts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    statements: Vec<Statement>,
}

impl Template {
    pub fn new(statements: Vec<Statement>) -> Self {
        Template { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn render(
        &self,
        ctx: &mut TemplateContext,
        sink: &mut dyn TextSink,
        encoder: TextEncoder,
    ) -> Result<RenderOutcome, RenderError> {
        render(&self.statements, ctx, sink, encoder)
    }

    /// Render into a fresh string.
    pub fn render_to_string(
        &self,
        ctx: &mut TemplateContext,
        encoder: TextEncoder,
    ) -> Result<Rendered, RenderError> {
        let mut output = String::new();
        let outcome = self.render(ctx, &mut output, encoder)?;
        Ok(Rendered { output, outcome })
    }
}

impl From<Vec<Statement>> for Template {
    fn from(statements: Vec<Statement>) -> Self {
        Template::new(statements)
    }
}
