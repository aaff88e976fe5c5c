//! Form controller: owns the draft, publishes validation results and drives
//! the submission lifecycle.
//!
//! Submitting is split in three so a UI thread can hand the network work to
//! a backend worker: [`FormController::begin_submit`] validates and snapshots,
//! [`PreparedSubmission::send`] encodes and posts, and
//! [`FormController::finish_submit`] applies the outcome. While a submission
//! is outstanding `begin_submit` refuses, so at most one request is in flight.

use std::{collections::BTreeMap, path::Path};

use shared::{
    domain::{AttachmentSlot, FieldId, HandoverLocation, TextField, YesNo},
    error::{AttachmentRejection, ValidationErrors},
    protocol::{RenewalPayload, SubmissionPayload},
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{
    attachment::{Attachment, AttachmentGate, CandidateFile},
    error::{FieldUpdateError, SubmitError, SubmitRejected},
    form::{Application, FormDraft, RenewalDetails},
    submitter::Submitter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
}

/// Blocking notice shown once a submission completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    SubmitFailed,
}

#[derive(Debug)]
pub struct FormController {
    draft: FormDraft,
    errors: ValidationErrors,
    rejections: BTreeMap<AttachmentSlot, AttachmentRejection>,
    status: SubmissionStatus,
    gate: AttachmentGate,
    scroll_to_top: bool,
    notice: Option<Notice>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(AttachmentGate::default())
    }
}

impl FormController {
    pub fn new(gate: AttachmentGate) -> Self {
        Self {
            draft: FormDraft::default(),
            errors: ValidationErrors::new(),
            rejections: BTreeMap::new(),
            status: SubmissionStatus::Idle,
            gate,
            scroll_to_top: false,
            notice: None,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Errors published by the last submit attempt. Editing a field does not
    /// clear its entry; only the next validation pass does.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn visible_fields(&self) -> Vec<FieldId> {
        self.draft.visible_fields()
    }

    pub fn set_wants_renewal(&mut self, value: Option<YesNo>) {
        self.draft.wants_renewal = value;
    }

    pub fn set_has_dependents(&mut self, value: Option<YesNo>) {
        self.draft.has_dependents = value;
    }

    pub fn set_handover_location(&mut self, value: Option<HandoverLocation>) {
        self.draft.handover_location = value;
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.draft.text_mut(field) = value.into();
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        self.draft.text_mut(field)
    }

    /// String-keyed update for non-attachment fields. An empty value unsets a
    /// choice field.
    pub fn update_field(&mut self, field: FieldId, value: &str) -> Result<(), FieldUpdateError> {
        if field.attachment_slot().is_some() {
            return Err(FieldUpdateError::AttachmentField {
                field: field.as_str(),
            });
        }

        match field {
            FieldId::WantsRenewal => self.draft.wants_renewal = parse_choice(value)?,
            FieldId::HasDependents => self.draft.has_dependents = parse_choice(value)?,
            FieldId::HandoverLocation => self.draft.handover_location = parse_choice(value)?,
            other => {
                if let Some(text) = other.text_field() {
                    self.set_text(text, value);
                }
            }
        }
        Ok(())
    }

    pub fn set_attachment(&mut self, slot: AttachmentSlot, attachment: Option<Attachment>) {
        self.rejections.remove(&slot);
        self.draft.set_attachment(slot, attachment);
    }

    /// Runs the attachment gate at selection time. A rejection leaves the slot
    /// as it was and records a slot-local message.
    pub fn select_attachment(
        &mut self,
        slot: AttachmentSlot,
        candidate: CandidateFile,
    ) -> Result<(), AttachmentRejection> {
        match self.gate.admit(candidate) {
            Ok(attachment) => {
                info!(
                    slot = %slot,
                    name = attachment.name(),
                    size = attachment.size_bytes(),
                    "attachment accepted"
                );
                self.set_attachment(slot, Some(attachment));
                Ok(())
            }
            Err(rejection) => Err(self.reject(slot, rejection)),
        }
    }

    /// Same as [`FormController::select_attachment`] for a file on disk. An
    /// unreadable path is recorded as a slot-local rejection too.
    pub fn select_attachment_path(
        &mut self,
        slot: AttachmentSlot,
        path: &Path,
    ) -> Result<(), AttachmentRejection> {
        match CandidateFile::from_path(path) {
            Ok(candidate) => self.select_attachment(slot, candidate),
            Err(rejection) => Err(self.reject(slot, rejection)),
        }
    }

    fn reject(
        &mut self,
        slot: AttachmentSlot,
        rejection: AttachmentRejection,
    ) -> AttachmentRejection {
        warn!(slot = %slot, reason = %rejection, "attachment rejected");
        self.rejections.insert(slot, rejection.clone());
        rejection
    }

    pub fn attachment_rejection(&self, slot: AttachmentSlot) -> Option<&AttachmentRejection> {
        self.rejections.get(&slot)
    }

    /// Computes the full error map for the current draft without publishing it.
    pub fn validate(&self) -> ValidationErrors {
        self.draft.validate().err().unwrap_or_default()
    }

    pub fn begin_submit(&mut self) -> Result<PreparedSubmission, SubmitRejected> {
        if self.is_submitting() {
            warn!("submit ignored while a submission is in flight");
            return Err(SubmitRejected::InFlight);
        }

        match self.draft.validate() {
            Ok(application) => {
                self.errors.clear();
                self.status = SubmissionStatus::Submitting;
                let prepared = PreparedSubmission {
                    id: Uuid::new_v4(),
                    application,
                };
                info!(submission_id = %prepared.id, "submission started");
                Ok(prepared)
            }
            Err(errors) => {
                info!(invalid_fields = errors.len(), "submission blocked by validation");
                self.errors = errors.clone();
                self.scroll_to_top = true;
                Err(SubmitRejected::Invalid(errors))
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) -> Notice {
        self.status = SubmissionStatus::Idle;
        let notice = match outcome {
            Ok(()) => {
                self.draft = FormDraft::default();
                self.errors.clear();
                self.rejections.clear();
                self.scroll_to_top = true;
                Notice::Submitted
            }
            Err(err) => {
                warn!(error = %err, "submission failed; form data retained");
                Notice::SubmitFailed
            }
        };
        self.notice = Some(notice);
        notice
    }

    pub async fn submit<S>(&mut self, submitter: &S) -> Result<Notice, SubmitRejected>
    where
        S: Submitter + ?Sized,
    {
        let prepared = self.begin_submit()?;
        let outcome = prepared.send(submitter).await;
        Ok(self.finish_submit(outcome))
    }

    /// Returns and clears a pending scroll-to-top request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

fn parse_choice<T>(value: &str) -> Result<Option<T>, FieldUpdateError>
where
    T: std::str::FromStr<Err = shared::error::UnknownValue>,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

/// A validated snapshot on its way to the endpoint. The controller keeps the
/// live draft, so a failure leaves everything the user entered in place.
#[derive(Debug)]
pub struct PreparedSubmission {
    id: Uuid,
    application: Application,
}

impl PreparedSubmission {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    /// Encodes populated slots one after another, in slot order.
    pub async fn payload(&self) -> Result<SubmissionPayload, SubmitError> {
        let details = match &self.application {
            Application::Declined => return Ok(SubmissionPayload::declined()),
            Application::Renewal(details) => details,
        };

        let passport_copy = details.passport_copy.encode().await?;
        let contract_letter = details.contract_letter.encode().await?;
        let e_filing_slip = details.e_filing_slip.encode().await?;
        let resume = match &details.resume {
            Some(attachment) => Some(attachment.encode().await?),
            None => None,
        };
        let certificates = match &details.certificates {
            Some(attachment) => Some(attachment.encode().await?),
            None => None,
        };

        Ok(SubmissionPayload::renewal(RenewalPayload {
            dependents: details.dependents,
            email: details.email.clone(),
            bms_number: details.bms_number.clone(),
            full_name: details.full_name.clone(),
            passport_number: details.passport_number.clone(),
            passport_expiry: RenewalDetails::format_date(details.passport_expiry),
            issue_country: details.issue_country.clone(),
            passport_issue: RenewalDetails::format_date(details.passport_issue),
            tax_number: details.tax_number.clone(),
            location: details.location,
            passport_copy,
            contract_letter,
            e_filing_slip,
            resume,
            certificates,
        }))
    }

    pub async fn send<S>(self, submitter: &S) -> Result<(), SubmitError>
    where
        S: Submitter + ?Sized,
    {
        let span = info_span!("submission", submission_id = %self.id);
        async move {
            let payload = self.payload().await?;
            info!(
                renew_ep = %payload.renew_ep,
                attachments = payload.attachments().len(),
                "payload assembled"
            );
            submitter.submit(&payload).await
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
