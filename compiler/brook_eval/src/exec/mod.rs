//! Statement execution.
//!
//! The [`Interpreter`] walks statements in order, writing text to its sink
//! and reporting a [`Completion`] for each statement list it runs. Loops
//! absorb `Break`/`Continue`; everything else passes signals up unchanged.

mod control;
mod expr;
mod scope_guard;
mod statement;

pub use control::{
    range_values, range_window, slice_sequence, Completion, ForLoop, MAX_RANGE_LEN,
};
pub use expr::{evaluate, literal_value};
pub use scope_guard::ScopedInterpreter;

use brook_ir::Statement;

use crate::stack::ensure_sufficient_stack;
use crate::{RenderError, TemplateContext, TextEncoder, TextSink};

/// Result of executing a statement or statement list.
pub type ExecResult = Result<Completion, RenderError>;

/// Executes statements against a context, writing to a sink.
pub struct Interpreter<'ctx, 'out> {
    pub(crate) ctx: &'ctx mut TemplateContext,
    sink: &'out mut dyn TextSink,
    encoder: TextEncoder,
}

impl<'ctx, 'out> Interpreter<'ctx, 'out> {
    pub fn new(
        ctx: &'ctx mut TemplateContext,
        sink: &'out mut dyn TextSink,
        encoder: TextEncoder,
    ) -> Self {
        Interpreter { ctx, sink, encoder }
    }

    pub fn context(&self) -> &TemplateContext {
        &*self.ctx
    }

    pub fn context_mut(&mut self) -> &mut TemplateContext {
        &mut *self.ctx
    }

    pub fn encoder(&self) -> TextEncoder {
        self.encoder
    }

    /// Run statements in order until one of them signals.
    ///
    /// Cancellation is checked before each statement. A `Break`, `Continue`
    /// or `Cancelled` from a statement stops the list and is returned to
    /// the caller.
    pub fn execute_block(&mut self, statements: &[Statement]) -> ExecResult {
        for statement in statements {
            if self.ctx.is_cancelled() {
                return Ok(Completion::Cancelled);
            }
            match self.execute(statement)? {
                Completion::Completed => {}
                signal => return Ok(signal),
            }
        }
        Ok(Completion::Completed)
    }

    /// Execute a single statement.
    pub fn execute(&mut self, statement: &Statement) -> ExecResult {
        ensure_sufficient_stack(|| self.execute_statement(statement))
    }

    /// Write template text as-is.
    fn write_raw(&mut self, text: &str) -> Result<(), RenderError> {
        self.sink.write_text(text)?;
        Ok(())
    }

    /// Write value text through the encoder.
    fn write_encoded(&mut self, text: &str) -> Result<(), RenderError> {
        let encoded = self.encoder.encode(text);
        self.sink.write_text(&encoded)?;
        Ok(())
    }

    /// Run `statements` with a different sink, returning what they wrote.
    fn execute_captured(
        &mut self,
        statements: &[Statement],
    ) -> Result<(String, Completion), RenderError> {
        let mut buffer = String::new();
        let completion = {
            let mut nested = Interpreter::new(&mut *self.ctx, &mut buffer, self.encoder);
            nested.execute_block(statements)?
        };
        Ok((buffer, completion))
    }
}
