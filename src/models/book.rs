//! Book model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Store-assigned book identifier
pub type BookId = i32;

/// Book record.
///
/// Fields missing from a request body take their zero value, so an absent
/// title or author is reported by validation rather than by body parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    /// Assigned by the store on creation; ignored in request bodies
    pub id: BookId,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(range(min = 0, message = "Number of pages cannot be negative"))]
    pub num_pages: i32,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Between 0 and 5 inclusive
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
}

impl Book {
    /// Field-level validation errors keyed by wire field name; empty when valid.
    /// Every rule is checked, so all violations are reported together.
    pub fn validation_errors(&self) -> BTreeMap<String, String> {
        let Err(errors) = self.validate() else {
            return BTreeMap::new();
        };

        errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let field: &str = field.as_ref();
                let message = errs.first()?.message.as_ref()?.to_string();
                Some((wire_field_name(field).to_string(), message))
            })
            .collect()
    }

    /// Copy of this book carrying the given identifier
    pub fn with_id(self, id: BookId) -> Self {
        Self { id, ..self }
    }
}

fn wire_field_name(field: &str) -> &str {
    match field {
        "num_pages" => "numPages",
        other => other,
    }
}
