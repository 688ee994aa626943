//! Deterministic DOM ids for form inputs.
//!
//! Ids are derived from the form variant and field name so they stay stable
//! across renders, which keeps label/input pairing and scroll-to-error
//! targets reliable.

/// DOM id for a field's input element, e.g. `individual-iban-input`.
pub fn field_input_id(form: &str, field: &str) -> String {
    format!("{form}-{field}-input")
}

/// DOM id for a field's label element.
pub fn field_label_id(form: &str, field: &str) -> String {
    format!("{form}-{field}-label")
}
