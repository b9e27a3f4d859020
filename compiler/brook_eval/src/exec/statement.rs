//! Statement dispatch.

use brook_ir::{ElseIf, Expression, Statement, When};
use brook_value::Value;

use super::{evaluate, Completion, ExecResult, Interpreter};

impl Interpreter<'_, '_> {
    pub(super) fn execute_statement(&mut self, statement: &Statement) -> ExecResult {
        match statement {
            Statement::Text(text) => {
                self.write_raw(text)?;
                Ok(Completion::Completed)
            }
            Statement::Output(expr) => self.execute_output(expr),
            Statement::Assign { identifier, value } => {
                let value = evaluate(value, self.ctx);
                self.ctx.assign(identifier, value);
                Ok(Completion::Completed)
            }
            Statement::For(for_stmt) => self.execute_for(for_stmt),
            Statement::Break => Ok(Completion::Break),
            Statement::Continue => Ok(Completion::Continue),
            Statement::If {
                condition,
                body,
                else_ifs,
                else_branch,
            } => self.execute_if(condition, body, else_ifs, else_branch.as_deref()),
            Statement::Unless {
                condition,
                body,
                else_branch,
            } => {
                if evaluate(condition, self.ctx).to_boolean() {
                    self.execute_optional(else_branch.as_deref())
                } else {
                    self.execute_block(body)
                }
            }
            Statement::Case {
                subject,
                whens,
                else_branch,
            } => self.execute_case(subject, whens, else_branch.as_deref()),
            Statement::Capture { identifier, body } => {
                let (text, completion) = self.execute_captured(body)?;
                self.ctx.assign(identifier, Value::string(text));
                Ok(completion)
            }
            Statement::Increment { identifier } => {
                let current = self.ctx.increment(identifier);
                self.write_number(current)
            }
            Statement::Decrement { identifier } => {
                let current = self.ctx.decrement(identifier);
                self.write_number(current)
            }
            Statement::Comment(_) => Ok(Completion::Completed),
        }
    }

    fn execute_output(&mut self, expr: &Expression) -> ExecResult {
        let value = evaluate(expr, self.ctx);
        let text = value.to_output_string(self.ctx.culture());
        self.write_encoded(&text)?;
        Ok(Completion::Completed)
    }

    fn write_number(&mut self, n: i64) -> ExecResult {
        let text = self.ctx.culture().format_number(n as f64);
        self.write_encoded(&text)?;
        Ok(Completion::Completed)
    }

    fn execute_if(
        &mut self,
        condition: &Expression,
        body: &[Statement],
        else_ifs: &[ElseIf],
        else_branch: Option<&[Statement]>,
    ) -> ExecResult {
        if evaluate(condition, self.ctx).to_boolean() {
            return self.execute_block(body);
        }
        for arm in else_ifs {
            if evaluate(&arm.condition, self.ctx).to_boolean() {
                return self.execute_block(&arm.body);
            }
        }
        self.execute_optional(else_branch)
    }

    fn execute_case(
        &mut self,
        subject: &Expression,
        whens: &[When],
        else_branch: Option<&[Statement]>,
    ) -> ExecResult {
        let subject = evaluate(subject, self.ctx);
        for when in whens {
            let matched = when
                .options
                .iter()
                .any(|option| evaluate(option, self.ctx).equals(&subject));
            if matched {
                return self.execute_block(&when.body);
            }
        }
        self.execute_optional(else_branch)
    }

    fn execute_optional(&mut self, statements: Option<&[Statement]>) -> ExecResult {
        match statements {
            Some(statements) => self.execute_block(statements),
            None => Ok(Completion::Completed),
        }
    }
}
