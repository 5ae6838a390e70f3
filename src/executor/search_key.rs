//! Search-key scratch buffer
//!
//! The buffer is sized once at initialization from the index key schema
//! and reused for every execution: slots are overwritten in place, never
//! reallocated. Key values depend on parameter bindings, not on rows, so
//! a rebuild happens exactly once per execution.

use serde_json::Value;

use crate::plan::Expression;

use super::errors::{ExecutorError, ExecutorResult};

/// Fixed-capacity buffer of evaluated key values
#[derive(Debug, Clone)]
pub struct KeyBuffer {
    slots: Vec<Value>,
}

impl KeyBuffer {
    /// Allocates a buffer with one slot per key column
    pub fn new(width: usize) -> Self {
        Self {
            slots: vec![Value::Null; width],
        }
    }

    /// Returns the fixed capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Evaluates key expressions in order into the leading slots.
    ///
    /// Returns the active key count. The expression count must not exceed
    /// the buffer capacity; initialization validates this, so overflow
    /// here is a configuration error.
    pub fn build(&mut self, exprs: &[Expression], params: &[Value]) -> ExecutorResult<usize> {
        if exprs.len() > self.slots.len() {
            return Err(ExecutorError::configuration(format!(
                "{} key expressions against a {}-slot key buffer",
                exprs.len(),
                self.slots.len()
            )));
        }
        for (slot, expr) in exprs.iter().enumerate() {
            self.slots[slot] = expr.evaluate(params, None)?;
        }
        Ok(exprs.len())
    }

    /// Returns the leading `active` slots
    pub fn active(&self, active: usize) -> &[Value] {
        &self.slots[..active]
    }
}
