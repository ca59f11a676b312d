//! Declarative column contracts for each pipeline stage
//!
//! A `Schema` maps column names to a coarse type and a nullability flag.
//! Validation fails closed on the first violation found.

mod validator;

pub use validator::{validate, validate_rows, Column, ColumnType, Schema, SchemaViolation};

use crate::model::column;
use crate::nlp::GrammarCategory;

/// No column requirements: anything passes.
pub fn raw() -> Schema {
    Schema::new("raw")
}

/// Output of gatherers and generators.
pub fn article() -> Schema {
    Schema::new("article")
        .required(column::HEADLINE, ColumnType::Text)
        .required(column::DESCRIPTION, ColumnType::Text)
        .required(column::URL, ColumnType::Text)
        .required(column::PUBLISHED_DATE, ColumnType::Text)
        .required(column::PUBLISHER, ColumnType::Object)
}

/// Output of the analyzer: article columns plus derived features per text field.
pub fn analyzed() -> Schema {
    let mut schema = article();
    schema.name = "analyzed".to_string();
    for field in column::TEXT_FIELDS {
        schema = schema
            .required(column::cleaned(field), ColumnType::Text)
            .required(column::abstracted(field), ColumnType::Text);
        for suffix in ["positive", "negative", "neutral", "compound"] {
            schema = schema.required(column::derived(field, suffix), ColumnType::Float);
        }
        schema = schema.required(column::derived(field, "wordcount"), ColumnType::Int);
        for category in GrammarCategory::ALL {
            schema = schema.required(
                column::derived(field, category.column_suffix()),
                ColumnType::Int,
            );
        }
    }
    schema
}
