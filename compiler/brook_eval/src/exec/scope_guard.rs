//! RAII scope guard for loop iterations.
//!
//! The guard pushes a child scope on creation and pops it on drop, so an
//! iteration scope is released on normal completion, on `break`, on
//! cancellation, on an output error propagated with `?`, and during
//! unwinding.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// Interpreter access with a child scope that is released on drop.
pub struct ScopedInterpreter<'guard, 'ctx, 'out> {
    interpreter: &'guard mut Interpreter<'ctx, 'out>,
}

impl Drop for ScopedInterpreter<'_, '_, '_> {
    fn drop(&mut self) {
        self.interpreter.ctx.release_scope();
    }
}

impl<'ctx, 'out> Deref for ScopedInterpreter<'_, 'ctx, 'out> {
    type Target = Interpreter<'ctx, 'out>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'ctx, 'out> Interpreter<'ctx, 'out> {
    /// Enter a child scope that is released when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'ctx, 'out> {
        self.ctx.enter_child_scope();
        ScopedInterpreter { interpreter: self }
    }
}
