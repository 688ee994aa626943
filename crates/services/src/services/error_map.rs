//! Remapping of backend validation errors onto UI field names.
//!
//! The backend keys its rejection bodies by its own field names; the schema
//! carries the translation table. Remapped errors merge into the same
//! [`ErrorState`] as local ones so the UI treatment is uniform.

use std::collections::HashMap;

use forms::models::{ErrorState, FormSchema};
use forms::schemas::{individual, organization};
use tracing::warn;

pub fn map_backend_errors(
    schema: &FormSchema,
    backend: &HashMap<String, String>,
) -> ErrorState {
    let mut errors = ErrorState::new();
    for (field, message) in backend {
        match schema.ui_field_for(field) {
            Some(ui_field) => errors.set(ui_field, message.clone()),
            None => warn!(
                form = schema.name,
                field = %field,
                "dropping error for unmapped backend field"
            ),
        }
    }
    errors
}

pub fn map_individual_errors(backend: &HashMap<String, String>) -> ErrorState {
    map_backend_errors(individual(), backend)
}

pub fn map_organization_errors(backend: &HashMap<String, String>) -> ErrorState {
    map_backend_errors(organization(), backend)
}
