//! Pure validation of form snapshots against a schema.
//!
//! No function here throws for invalid user input; absence of a message is
//! the only "valid" signal. Rules that depend on sibling fields always see
//! the full form snapshot.

use chrono::{NaiveDate, Utc};
use forms::models::{ErrorState, FieldKind, FieldRule, FieldValue, FormSchema, FormState};
use utils::text::normalize_digits;

use super::{goals::MAX_GOALS, messages};

/// Result of a whole-form validation run. Only failing fields appear in
/// `errors`.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: ErrorState,
}

/// Validate a single field against the full form snapshot. `None` means
/// valid; unknown field names are ignored.
pub fn validate_field(schema: &FormSchema, name: &str, form: &FormState) -> Option<String> {
    let rule = schema.rule(name)?;
    field_error(rule, form)
}

/// Run every rule in schema order.
pub fn validate_form(schema: &FormSchema, form: &FormState) -> ValidationOutcome {
    let mut errors = ErrorState::new();
    for rule in &schema.rules {
        if let Some(message) = field_error(rule, form) {
            errors.set(rule.name, message);
        }
    }
    ValidationOutcome {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Goals are a list, not a scalar field: valid iff length is in
/// [1, MAX_GOALS] and at least one entry is non-blank after trimming.
pub fn validate_goals(goals: &[String]) -> Option<String> {
    if goals.len() > MAX_GOALS {
        return Some(messages::GOALS_TOO_MANY.to_string());
    }
    if goals.iter().all(|g| g.trim().is_empty()) {
        return Some(messages::GOALS_REQUIRED.to_string());
    }
    None
}

fn field_error(rule: &FieldRule, form: &FormState) -> Option<String> {
    let value = form.get(rule.name);
    if value.is_blank() {
        return rule
            .required
            .applies(form)
            .then(|| messages::required(rule.label));
    }
    match rule.kind {
        FieldKind::File => check_file(rule, value),
        FieldKind::Number => check_number(rule, value),
        FieldKind::Date => check_date(rule, value),
        FieldKind::Select => check_select(rule, value),
        FieldKind::Text | FieldKind::Email | FieldKind::Tel => check_text(rule, value),
    }
}

fn check_file(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    let meta = value.as_file()?;
    let constraint = rule.file?;
    match meta.extension() {
        Some(ext) if constraint.accepted.contains(&ext.as_str()) => {}
        _ => return Some(messages::file_type_not_allowed(&constraint)),
    }
    if meta.size_bytes > constraint.max_bytes {
        return Some(messages::file_too_large(&constraint));
    }
    None
}

fn check_number(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    let raw = value.as_text()?;
    let normalized = normalize_digits(raw.trim());
    let Ok(number) = normalized.parse::<f64>() else {
        return Some(messages::not_a_number(rule.label));
    };
    if let Some(min) = rule.min
        && number < min
    {
        return Some(messages::below_min(rule.label, min));
    }
    if let Some(max) = rule.max
        && number > max
    {
        return Some(messages::above_max(rule.label, max));
    }
    None
}

fn check_date(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    let raw = value.as_text()?.trim();
    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return Some(messages::INVALID_DATE.to_string());
    };
    if rule.past_only && date > Utc::now().date_naive() {
        return Some(messages::DATE_IN_FUTURE.to_string());
    }
    None
}

fn check_select(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    let raw = value.as_text()?.trim();
    if let Some(options) = rule.options
        && !options.contains(&raw)
    {
        return Some(messages::invalid_option(rule.label));
    }
    None
}

fn check_text(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    let raw = value.as_text()?.trim();
    let Some(pattern) = rule.pattern else {
        return None;
    };
    let candidate = match rule.kind {
        FieldKind::Tel => normalize_digits(raw),
        _ => raw.to_string(),
    };
    if !pattern.regex().is_match(&candidate) {
        return Some(pattern.message().to_string());
    }
    None
}
