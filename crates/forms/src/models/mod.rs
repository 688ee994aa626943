pub mod field_rule;
pub mod form_state;
pub mod submission;

pub use field_rule::{
    ConditionalPair, FieldKind, FieldRule, FileConstraint, FormSchema, GOALS_FIELD, Requirement,
    ValuePattern,
};
pub use form_state::{ErrorState, FieldValue, FileMeta, FormState, TouchedState};
pub use submission::{RequestState, RequestStatus, SubmissionReceipt};
