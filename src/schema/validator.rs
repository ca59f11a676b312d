//! Schema definition and the fail-closed validator

use crate::model::{Record, ToRecord};
use serde_json::Value;
use thiserror::Error;

/// Coarse column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Float,
    Int,
    Object,
}

impl ColumnType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            ColumnType::Text => value.is_string(),
            ColumnType::Float => value.is_f64(),
            ColumnType::Int => value.is_i64() || value.is_u64(),
            ColumnType::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
            Self::Object => write!(f, "object"),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One column contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

/// Ordered set of column contracts for one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a non-nullable column
    pub fn required(self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.with_column(name, column_type, false)
    }

    /// Add a nullable column
    pub fn optional(self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.with_column(name, column_type, true)
    }

    fn with_column(mut self, name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
        self.columns.push(Column {
            name: name.into(),
            column_type,
            nullable,
        });
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The first contract breach found in a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("schema '{schema}': row {row} is missing required column '{column}'")]
    MissingColumn {
        schema: String,
        column: String,
        row: usize,
    },

    #[error("schema '{schema}': column '{column}' is null in row {row}")]
    NullValue {
        schema: String,
        column: String,
        row: usize,
    },

    #[error("schema '{schema}': column '{column}' in row {row} should be {expected}, found {found}")]
    TypeMismatch {
        schema: String,
        column: String,
        row: usize,
        expected: ColumnType,
        found: &'static str,
    },
}

/// Check every row against the schema, returning the rows unchanged on success.
///
/// Columns are checked in declaration order and, within a column, rows in
/// insertion order; the first failure aborts validation.
pub fn validate<'a>(schema: &Schema, rows: &'a [Record]) -> Result<&'a [Record], SchemaViolation> {
    for col in &schema.columns {
        for (row_index, row) in rows.iter().enumerate() {
            let Some(value) = row.get(&col.name) else {
                return Err(SchemaViolation::MissingColumn {
                    schema: schema.name.clone(),
                    column: col.name.clone(),
                    row: row_index,
                });
            };
            if value.is_null() {
                if col.nullable {
                    continue;
                }
                return Err(SchemaViolation::NullValue {
                    schema: schema.name.clone(),
                    column: col.name.clone(),
                    row: row_index,
                });
            }
            if !col.column_type.accepts(value) {
                return Err(SchemaViolation::TypeMismatch {
                    schema: schema.name.clone(),
                    column: col.name.clone(),
                    row: row_index,
                    expected: col.column_type,
                    found: describe(value),
                });
            }
        }
    }
    Ok(rows)
}

/// Flatten typed rows to records and validate them.
pub fn validate_rows<T: ToRecord>(schema: &Schema, rows: &[T]) -> Result<Vec<Record>, SchemaViolation> {
    let records: Vec<Record> = rows.iter().map(ToRecord::to_record).collect();
    validate(schema, &records)?;
    Ok(records)
}
