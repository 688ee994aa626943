//! Declarative validation rules for one form variant.
//!
//! A [`FormSchema`] is a configuration table, not code: the validator in the
//! services crate interprets it against a live [`FormState`] snapshot. Rules
//! keep declaration order, which doubles as the document order used when
//! scrolling to the first invalid field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use super::form_state::{ErrorState, FormState};

/// Input control kind for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Select,
    File,
}

/// When a field must carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Optional,
    /// Required only while the named sibling field currently equals `value`.
    WhenEquals {
        field: &'static str,
        value: &'static str,
    },
}

impl Requirement {
    /// Evaluate against the full form snapshot. Conditional requiredness
    /// depends on sibling values, never on the field itself.
    pub fn applies(&self, form: &FormState) -> bool {
        match self {
            Self::Always => true,
            Self::Optional => false,
            Self::WhenEquals { field, value } => form.text(field) == Some(*value),
        }
    }
}

static SAUDI_IBAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SA[0-9A-Z]{22}$").unwrap());
static SAUDI_MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^05[0-9]{8}$").unwrap());
static NATIONAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[12][0-9]{9}$").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Named value patterns shared by both form variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePattern {
    /// `SA` followed by exactly 22 alphanumeric characters, case sensitive.
    SaudiIban,
    /// Local mobile format `05xxxxxxxx`.
    SaudiMobile,
    /// Ten digits starting with 1 (citizen) or 2 (resident).
    NationalId,
    Email,
}

impl ValuePattern {
    pub fn regex(&self) -> &'static Regex {
        match self {
            Self::SaudiIban => &SAUDI_IBAN,
            Self::SaudiMobile => &SAUDI_MOBILE,
            Self::NationalId => &NATIONAL_ID,
            Self::Email => &EMAIL,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::SaudiIban => "رقم الآيبان غير صحيح، يجب أن يبدأ بـ SA متبوعاً بـ 22 خانة",
            Self::SaudiMobile => "رقم الجوال غير صحيح، مثال: 05xxxxxxxx",
            Self::NationalId => "رقم الهوية غير صحيح",
            Self::Email => "البريد الإلكتروني غير صحيح",
        }
    }
}

/// Size and extension bounds for a file field.
#[derive(Debug, Clone, Copy)]
pub struct FileConstraint {
    pub max_bytes: u64,
    /// Accepted extensions, lowercase without the dot.
    pub accepted: &'static [&'static str],
}

impl FileConstraint {
    /// Identity documents, certificates and similar attachments.
    pub const ATTACHMENT: Self = Self {
        max_bytes: 5 * 1024 * 1024,
        accepted: &["pdf", "jpg", "jpeg", "png"],
    };

    /// Project and operational plan documents get a larger allowance.
    pub const PLAN_DOCUMENT: Self = Self {
        max_bytes: 10 * 1024 * 1024,
        accepted: &["pdf", "doc", "docx", "xls", "xlsx"],
    };

    pub fn max_megabytes(&self) -> u64 {
        self.max_bytes / (1024 * 1024)
    }
}

/// A select field and the free-text field it conditionally requires.
///
/// Applied uniformly by the form controller: whenever the trigger moves off
/// the sentinel, the paired field's value and error are cleared so stale
/// hidden data is never submitted.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalPair {
    pub trigger: &'static str,
    pub other: &'static str,
    pub sentinel: &'static str,
}

/// Validation rule for a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    /// Arabic label interpolated into validation messages.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: Requirement,
    pub pattern: Option<ValuePattern>,
    /// Allowed values for select fields.
    pub options: Option<&'static [&'static str]>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Date fields: value must not be in the future.
    pub past_only: bool,
    pub file: Option<FileConstraint>,
}

impl FieldRule {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: Requirement::Always,
            pattern: None,
            options: None,
            min: None,
            max: None,
            past_only: false,
            file: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email).pattern(ValuePattern::Email)
    }

    pub fn tel(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Tel).pattern(ValuePattern::SaudiMobile)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        let mut rule = Self::new(name, label, FieldKind::Select);
        rule.options = Some(options);
        rule
    }

    pub fn file(name: &'static str, label: &'static str, constraint: FileConstraint) -> Self {
        let mut rule = Self::new(name, label, FieldKind::File);
        rule.file = Some(constraint);
        rule
    }

    pub fn optional(mut self) -> Self {
        self.required = Requirement::Optional;
        self
    }

    /// Required only while `field` equals `value`.
    pub fn when(mut self, field: &'static str, value: &'static str) -> Self {
        self.required = Requirement::WhenEquals { field, value };
        self
    }

    pub fn pattern(mut self, pattern: ValuePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn past(mut self) -> Self {
        self.past_only = true;
        self
    }
}

/// Pseudo-field name used for the organization goals list in error state
/// and scroll-target lookups. Goals are validated separately because they
/// are a list, not a scalar field.
pub const GOALS_FIELD: &str = "goals";

/// The complete rule table for one form variant.
#[derive(Debug, Clone)]
pub struct FormSchema {
    /// Variant name, also the DOM id prefix: `individual` or `organization`.
    pub name: &'static str,
    pub rules: Vec<FieldRule>,
    pub pairs: Vec<ConditionalPair>,
    /// Backend field name → UI field name, for remapping rejection bodies.
    pub backend_fields: Vec<(&'static str, &'static str)>,
    pub has_goals: bool,
}

impl FormSchema {
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    pub fn pairs_for_trigger<'a>(
        &'a self,
        trigger: &'a str,
    ) -> impl Iterator<Item = &'a ConditionalPair> + 'a {
        self.pairs.iter().filter(move |p| p.trigger == trigger)
    }

    /// Translate a backend field name to its UI counterpart. Backend names
    /// that already match a UI field map to themselves.
    pub fn ui_field_for(&self, backend: &str) -> Option<&'static str> {
        if let Some((_, ui)) = self.backend_fields.iter().find(|(b, _)| *b == backend) {
            return Some(ui);
        }
        if self.has_goals && backend == GOALS_FIELD {
            return Some(GOALS_FIELD);
        }
        self.rules.iter().find(|r| r.name == backend).map(|r| r.name)
    }

    /// First erroring field in document order, goals last.
    pub fn first_error_field(&self, errors: &ErrorState) -> Option<&'static str> {
        for rule in &self.rules {
            if errors.contains(rule.name) {
                return Some(rule.name);
            }
        }
        if self.has_goals && errors.contains(GOALS_FIELD) {
            return Some(GOALS_FIELD);
        }
        None
    }
}
