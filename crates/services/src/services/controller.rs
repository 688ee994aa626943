//! Per-mount form controller for one intake form instance.
//!
//! Owns the form/touched/error state and the submit lifecycle:
//! `Editing` → `Submitting` → `Submitted` on success, or back to `Editing`
//! with errors and a notice on any failure. Every failure path preserves the
//! entered data; only a confirmed success resets the form.

use forms::models::{
    ErrorState, FieldValue, FileMeta, FormSchema, FormState, GOALS_FIELD, Requirement,
    SubmissionReceipt, TouchedState,
};
use forms::schemas;
use tracing::{debug, info, warn};
use utils::ids;

use super::error_map::map_backend_errors;
use super::goals::GoalsEditor;
use super::messages;
use super::submission::{SubmitBackend, SubmitOutcome};
use super::validator;

/// Where a mounted form currently is in its submit lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// Confirmation is showing; the form state has been reset.
    Submitted(SubmissionReceipt),
}

/// One-line notice shown outside any specific field.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Inline field errors exist.
    FixFields,
    /// Intake is closed; entered data is kept for when it reopens.
    ServiceDisabled(String),
    /// Transport or unexpected backend failure; the user may retry.
    SubmitFailed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::FixFields => messages::FIX_FIELDS,
            Self::ServiceDisabled(msg) | Self::SubmitFailed(msg) => msg,
        }
    }
}

pub struct FormController {
    schema: &'static FormSchema,
    form: FormState,
    touched: TouchedState,
    errors: ErrorState,
    goals: Option<GoalsEditor>,
    phase: FormPhase,
    notice: Option<Notice>,
    scroll_target: Option<&'static str>,
}

impl FormController {
    pub fn individual() -> Self {
        Self::new(schemas::individual())
    }

    pub fn organization() -> Self {
        Self::new(schemas::organization())
    }

    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            form: FormState::new(),
            touched: TouchedState::new(),
            errors: ErrorState::new(),
            goals: schema.has_goals.then(GoalsEditor::new),
            phase: FormPhase::Editing,
            notice: None,
            scroll_target: None,
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn goals(&self) -> Option<&[String]> {
        self.goals.as_ref().map(GoalsEditor::goals)
    }

    /// DOM id of the first invalid field's input, for scroll-to-error.
    pub fn scroll_target_id(&self) -> Option<String> {
        self.scroll_target
            .map(|field| ids::field_input_id(self.schema.name, field))
    }

    /// Free-text input. Errors refresh only once the field is touched.
    pub fn on_input(&mut self, field: &str, value: &str) {
        self.form.set(field, FieldValue::text(value));
        if self.touched.contains(field) {
            self.revalidate(field);
        }
    }

    /// Select change: touches the field, re-validates, and clears any paired
    /// "other" field the new value no longer requires.
    pub fn on_select(&mut self, field: &str, value: &str) {
        self.form.set(field, FieldValue::text(value));
        self.touched.mark(field);
        self.apply_pair_clearing(field);
        self.revalidate(field);
        self.revalidate_dependents(field);
    }

    /// File pick or removal. Same contract as [`Self::on_select`].
    pub fn on_file(&mut self, field: &str, file: Option<FileMeta>) {
        match file {
            Some(meta) => self.form.set(field, FieldValue::File(meta)),
            None => self.form.clear(field),
        }
        self.touched.mark(field);
        self.revalidate(field);
    }

    pub fn on_blur(&mut self, field: &str) {
        self.touched.mark(field);
        self.revalidate(field);
    }

    pub fn add_goal(&mut self) -> bool {
        match self.goals.as_mut() {
            Some(editor) => editor.add_goal(),
            None => false,
        }
    }

    pub fn update_goal(&mut self, index: usize, value: &str) {
        let Some(editor) = self.goals.as_mut() else {
            return;
        };
        if !editor.update_goal(index, value) {
            return;
        }
        self.touched.mark(GOALS_FIELD);
        match validator::validate_goals(editor.goals()) {
            Some(message) => self.errors.set(GOALS_FIELD, message),
            None => self.errors.remove(GOALS_FIELD),
        }
    }

    /// Dismiss the confirmation view and start a fresh editing session.
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, FormPhase::Submitted(_)) {
            self.phase = FormPhase::Editing;
        }
    }

    /// Validate everything and, if clean, post once through `backend`.
    pub async fn submit<B: SubmitBackend + ?Sized>(&mut self, backend: &B) {
        // The submit control stays disabled while a request is in flight.
        if self.is_submitting() {
            debug!(form = self.schema.name, "submit ignored, already in flight");
            return;
        }
        self.notice = None;
        self.scroll_target = None;

        self.touched.mark_all(self.schema.field_names());
        if self.goals.is_some() {
            self.touched.mark(GOALS_FIELD);
        }

        let outcome = validator::validate_form(self.schema, &self.form);
        let mut errors = outcome.errors;
        if let Some(editor) = &self.goals
            && let Some(message) = validator::validate_goals(editor.goals())
        {
            errors.set(GOALS_FIELD, message);
        }
        if !errors.is_empty() {
            info!(
                form = self.schema.name,
                fields = errors.len(),
                "submission blocked by local validation"
            );
            self.scroll_target = self.schema.first_error_field(&errors);
            self.errors = errors;
            self.notice = Some(Notice::FixFields);
            return;
        }

        self.errors.reset();
        self.phase = FormPhase::Submitting;
        info!(form = self.schema.name, "submitting support request");

        let goals = self.goals.as_ref().map(GoalsEditor::trimmed);
        let result = backend
            .submit(self.schema, &self.form, goals.as_deref())
            .await;

        match result {
            Ok(SubmitOutcome::Accepted(receipt)) => {
                info!(
                    form = self.schema.name,
                    request_number = %receipt.request_number,
                    "support request accepted"
                );
                self.form.reset();
                self.touched.reset();
                self.errors.reset();
                if let Some(editor) = self.goals.as_mut() {
                    editor.reset();
                }
                self.phase = FormPhase::Submitted(receipt);
            }
            Ok(SubmitOutcome::Rejected(backend_errors)) => {
                let remapped = map_backend_errors(self.schema, &backend_errors);
                warn!(
                    form = self.schema.name,
                    fields = remapped.len(),
                    "backend rejected submission"
                );
                self.scroll_target = self.schema.first_error_field(&remapped);
                self.errors = remapped;
                self.notice = Some(Notice::FixFields);
                self.phase = FormPhase::Editing;
            }
            Ok(SubmitOutcome::ServiceDisabled(message)) => {
                warn!(form = self.schema.name, "intake is closed");
                self.notice = Some(Notice::ServiceDisabled(message));
                self.phase = FormPhase::Editing;
            }
            Err(e) => {
                warn!(form = self.schema.name, error = %e, "submission failed");
                self.notice = Some(Notice::SubmitFailed(messages::SUBMIT_FAILED.to_string()));
                self.phase = FormPhase::Editing;
            }
        }
    }

    fn revalidate(&mut self, field: &str) {
        match validator::validate_field(self.schema, field, &self.form) {
            Some(message) => self.errors.set(field, message),
            None => self.errors.remove(field),
        }
    }

    /// Table-driven clearing: when a trigger moves off its sentinel, the
    /// paired field's value and error go away with it.
    fn apply_pair_clearing(&mut self, trigger: &str) {
        let cleared: Vec<&'static str> = self
            .schema
            .pairs_for_trigger(trigger)
            .filter(|pair| self.form.text(pair.trigger) != Some(pair.sentinel))
            .map(|pair| pair.other)
            .collect();
        for other in cleared {
            self.form.clear(other);
            self.errors.remove(other);
        }
    }

    /// Touched fields whose requiredness depends on `field` get their error
    /// refreshed when the trigger changes.
    fn revalidate_dependents(&mut self, field: &str) {
        let dependents: Vec<&'static str> = self
            .schema
            .rules
            .iter()
            .filter(|rule| {
                matches!(rule.required, Requirement::WhenEquals { field: f, .. } if f == field)
            })
            .map(|rule| rule.name)
            .filter(|name| self.touched.contains(name))
            .collect();
        for name in dependents {
            self.revalidate(name);
        }
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: FormPhase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use forms::models::SubmissionReceipt;

    use super::super::submission::SubmitError;
    use super::super::test_fixtures::{attachment, fill, valid_individual_form};
    use super::*;
    use async_trait::async_trait;

    struct StubBackend {
        outcome: Result<SubmitOutcome, SubmitError>,
        calls: Mutex<Vec<(FormState, Option<Vec<String>>)>>,
    }

    impl StubBackend {
        fn new(outcome: Result<SubmitOutcome, SubmitError>) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn accepted() -> Self {
            Self::new(Ok(SubmitOutcome::Accepted(SubmissionReceipt {
                request_number: "REQ-2024-0042".into(),
                phone_number: "0501234567".into(),
                message: "تم استلام طلبكم".into(),
            })))
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubmitBackend for StubBackend {
        async fn submit(
            &self,
            _schema: &FormSchema,
            form: &FormState,
            goals: Option<&[String]>,
        ) -> Result<SubmitOutcome, SubmitError> {
            self.calls
                .lock()
                .unwrap()
                .push((form.clone(), goals.map(<[String]>::to_vec)));
            self.outcome.clone()
        }
    }

    fn filled_individual() -> FormController {
        let mut controller = FormController::individual();
        fill(&mut controller.form, &valid_individual_form());
        controller
    }

    #[test]
    fn test_untouched_fields_show_no_errors() {
        let mut controller = FormController::individual();
        controller.on_input("email", "not-an-email");
        assert_eq!(controller.error("email"), None);

        controller.on_blur("email");
        assert!(controller.error("email").is_some());
    }

    #[test]
    fn test_touched_field_revalidates_on_input() {
        let mut controller = FormController::individual();
        controller.on_blur("email");
        assert!(controller.error("email").is_some());

        controller.on_input("email", "sara@example.com");
        assert_eq!(controller.error("email"), None);
    }

    #[test]
    fn test_select_clears_paired_other_field() {
        let mut controller = FormController::individual();
        controller.on_select("housing_type", "other");
        controller.on_input("housing_type_other", "سكن خيري");
        controller.on_blur("housing_type_other");
        assert_eq!(controller.form().text("housing_type_other"), Some("سكن خيري"));

        controller.on_select("housing_type", "owned");
        assert_eq!(controller.form().text("housing_type_other"), None);
        assert_eq!(controller.error("housing_type_other"), None);
    }

    #[test]
    fn test_trigger_change_refreshes_dependent_requirements() {
        let mut controller = FormController::individual();
        controller.on_select("housing_type", "rented");
        controller.on_blur("rental_contract");
        assert!(controller.error("rental_contract").is_some());

        controller.on_select("housing_type", "owned");
        assert_eq!(controller.error("rental_contract"), None);
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_network_call() {
        let backend = StubBackend::accepted();
        let mut controller = FormController::individual();
        controller.submit(&backend).await;

        assert_eq!(backend.call_count(), 0);
        assert_eq!(controller.phase(), &FormPhase::Editing);
        assert_eq!(controller.notice(), Some(&Notice::FixFields));
        assert!(controller.error("full_name").is_some());
        assert_eq!(
            controller.scroll_target_id().as_deref(),
            Some("individual-full_name-input")
        );
    }

    #[tokio::test]
    async fn test_valid_submit_resets_and_shows_receipt() {
        let backend = StubBackend::accepted();
        let mut controller = filled_individual();
        controller.submit(&backend).await;

        assert_eq!(backend.call_count(), 1);
        let (sent, goals) = backend.calls.lock().unwrap()[0].clone();
        // housing type is "owned", so no stale "other" value goes out
        assert_eq!(sent.text("housing_type_other"), None);
        assert_eq!(goals, None);

        match controller.phase() {
            FormPhase::Submitted(receipt) => {
                assert_eq!(receipt.request_number, "REQ-2024-0042");
            }
            other => panic!("expected Submitted, got {other:?}"),
        }
        assert!(controller.form().is_empty());
        assert!(controller.errors().is_empty());

        controller.acknowledge();
        assert_eq!(controller.phase(), &FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_backend_rejection_remaps_to_ui_fields() {
        let backend = StubBackend::new(Ok(SubmitOutcome::Rejected(
            [("bank_iban".to_string(), "رقم الآيبان مرفوض".to_string())].into(),
        )));
        let mut controller = filled_individual();
        controller.submit(&backend).await;

        assert_eq!(controller.phase(), &FormPhase::Editing);
        assert_eq!(controller.error("iban"), Some("رقم الآيبان مرفوض"));
        assert_eq!(
            controller.scroll_target_id().as_deref(),
            Some("individual-iban-input")
        );
    }

    #[tokio::test]
    async fn test_service_disabled_preserves_entered_data() {
        let backend = StubBackend::new(Ok(SubmitOutcome::ServiceDisabled(
            "استقبال الطلبات متوقف حالياً".into(),
        )));
        let mut controller = filled_individual();
        controller.submit(&backend).await;

        assert_eq!(controller.phase(), &FormPhase::Editing);
        assert!(matches!(
            controller.notice(),
            Some(Notice::ServiceDisabled(_))
        ));
        assert_eq!(controller.form().text("full_name"), Some("أحمد محمد العتيبي"));
        assert!(controller.errors().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_editing_state() {
        let backend = StubBackend::new(Err(SubmitError::Transport("connection refused".into())));
        let mut controller = filled_individual();
        controller.submit(&backend).await;

        assert_eq!(controller.phase(), &FormPhase::Editing);
        assert!(matches!(controller.notice(), Some(Notice::SubmitFailed(_))));
        assert!(!controller.form().is_empty());
    }

    #[tokio::test]
    async fn test_submit_is_ignored_while_in_flight() {
        let backend = StubBackend::accepted();
        let mut controller = filled_individual();
        controller.force_phase(FormPhase::Submitting);
        controller.submit(&backend).await;
        assert_eq!(backend.call_count(), 0);
        assert!(controller.is_submitting());
    }

    #[tokio::test]
    async fn test_organization_submit_sends_trimmed_goals() {
        let backend = StubBackend::accepted();
        let mut controller = FormController::organization();
        fill(
            &mut controller.form,
            &super::super::test_fixtures::valid_organization_form(),
        );
        controller.update_goal(0, "  حفر بئر ");
        controller.add_goal();
        controller.submit(&backend).await;

        assert_eq!(backend.call_count(), 1);
        let (_, goals) = backend.calls.lock().unwrap()[0].clone();
        assert_eq!(goals, Some(vec!["حفر بئر".to_string()]));
        assert!(matches!(controller.phase(), FormPhase::Submitted(_)));
        assert_eq!(controller.goals(), Some(&[String::new()][..]));
    }

    #[tokio::test]
    async fn test_blank_goals_block_organization_submit() {
        let backend = StubBackend::accepted();
        let mut controller = FormController::organization();
        fill(
            &mut controller.form,
            &super::super::test_fixtures::valid_organization_form(),
        );
        controller.submit(&backend).await;

        assert_eq!(backend.call_count(), 0);
        assert!(controller.error(GOALS_FIELD).is_some());
    }

    #[test]
    fn test_goal_edit_marks_touched_and_validates() {
        let mut controller = FormController::organization();
        controller.update_goal(0, "");
        assert!(controller.error(GOALS_FIELD).is_some());
        controller.update_goal(0, "كفالة يتيم");
        assert_eq!(controller.error(GOALS_FIELD), None);
    }

    #[test]
    fn test_individual_form_has_no_goal_editor() {
        let mut controller = FormController::individual();
        assert!(!controller.add_goal());
        assert_eq!(controller.goals(), None);
    }

    #[test]
    fn test_file_events_touch_and_validate() {
        let mut controller = FormController::individual();
        let mut oversized = attachment("id");
        oversized.size_bytes = 9 * 1024 * 1024;
        controller.on_file("id_copy", Some(oversized));
        assert!(controller.error("id_copy").is_some());

        controller.on_file("id_copy", Some(attachment("id")));
        assert_eq!(controller.error("id_copy"), None);

        controller.on_file("id_copy", None);
        assert!(controller.error("id_copy").is_some());
    }
}
