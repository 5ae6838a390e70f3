//! Inline projection
//!
//! The projector maps an accepted candidate row to an output row. When
//! every output column is a direct copy of an input column, the column
//! map is resolved once at initialization and projection is a plain
//! gather; otherwise each output column evaluates its expression with the
//! candidate row in scope.

use serde_json::Value;

use crate::plan::{ProjectionColumn, ProjectionPlan};
use crate::storage::Row;

use super::errors::{ExecutorError, ExecutorResult};

#[derive(Debug)]
enum Mode {
    /// No projection configured: rows route unmodified
    Identity,
    /// Every output column is a direct input-column copy
    ColumnMap(Vec<usize>),
    /// At least one output column is computed
    Expressions(Vec<ProjectionColumn>),
}

/// Row projector resolved once at initialization
#[derive(Debug)]
pub struct Projector {
    mode: Mode,
}

impl Projector {
    /// Resolves a projector against the input row width.
    ///
    /// Pass-through ordinals outside the input width are configuration
    /// errors.
    pub fn resolve(plan: Option<&ProjectionPlan>, input_width: usize) -> ExecutorResult<Self> {
        let Some(plan) = plan else {
            return Ok(Self {
                mode: Mode::Identity,
            });
        };
        for column in &plan.columns {
            if let ProjectionColumn::PassThrough(ordinal) = column {
                if *ordinal >= input_width {
                    return Err(ExecutorError::configuration(format!(
                        "projection copies column {ordinal} from a {input_width}-column row"
                    )));
                }
            }
        }
        let mode = match plan.all_pass_through() {
            Some(map) => Mode::ColumnMap(map),
            None => Mode::Expressions(plan.columns.clone()),
        };
        Ok(Self { mode })
    }

    /// Projects one accepted row
    pub fn project(&self, row: &Row, params: &[Value]) -> ExecutorResult<Row> {
        match &self.mode {
            Mode::Identity => Ok(row.clone()),
            Mode::ColumnMap(map) => {
                let values = map
                    .iter()
                    .map(|&ordinal| row.get(ordinal).cloned().unwrap_or(Value::Null))
                    .collect();
                Ok(Row::new(values))
            }
            Mode::Expressions(columns) => {
                let mut values = Vec::with_capacity(columns.len());
                for column in columns {
                    let value = match column {
                        ProjectionColumn::PassThrough(ordinal) => {
                            row.get(*ordinal).cloned().unwrap_or(Value::Null)
                        }
                        ProjectionColumn::Computed(expr) => expr.evaluate(params, Some(row))?,
                    };
                    values.push(value);
                }
                Ok(Row::new(values))
            }
        }
    }
}
