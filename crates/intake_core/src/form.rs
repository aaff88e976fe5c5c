//! Draft state of the renewal form and its submit-time validation.

use std::{collections::BTreeMap, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use shared::{
    domain::{AttachmentSlot, FieldId, HandoverLocation, TextField, YesNo},
    error::{FieldErrorKind, ValidationErrors},
};

use crate::attachment::Attachment;

const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Everything the user has entered so far. Nothing here is validated until
/// [`FormDraft::validate`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub wants_renewal: Option<YesNo>,
    pub has_dependents: Option<YesNo>,
    pub email: String,
    pub bms_number: String,
    pub full_name: String,
    pub passport_number: String,
    pub passport_expiry: String,
    pub issue_country: String,
    pub passport_issue: String,
    pub tax_number: String,
    pub handover_location: Option<HandoverLocation>,
    attachments: BTreeMap<AttachmentSlot, Attachment>,
}

impl FormDraft {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Email => &self.email,
            TextField::BmsNumber => &self.bms_number,
            TextField::FullName => &self.full_name,
            TextField::PassportNumber => &self.passport_number,
            TextField::PassportExpiry => &self.passport_expiry,
            TextField::IssueCountry => &self.issue_country,
            TextField::PassportIssue => &self.passport_issue,
            TextField::TaxNumber => &self.tax_number,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Email => &mut self.email,
            TextField::BmsNumber => &mut self.bms_number,
            TextField::FullName => &mut self.full_name,
            TextField::PassportNumber => &mut self.passport_number,
            TextField::PassportExpiry => &mut self.passport_expiry,
            TextField::IssueCountry => &mut self.issue_country,
            TextField::PassportIssue => &mut self.passport_issue,
            TextField::TaxNumber => &mut self.tax_number,
        }
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        self.attachments.get(&slot)
    }

    /// Replaces the slot wholesale; `None` clears it.
    pub fn set_attachment(&mut self, slot: AttachmentSlot, attachment: Option<Attachment>) {
        match attachment {
            Some(attachment) => {
                self.attachments.insert(slot, attachment);
            }
            None => {
                self.attachments.remove(&slot);
            }
        }
    }

    /// Fields to render, in form order. Only the opening question shows until
    /// the user answers yes.
    pub fn visible_fields(&self) -> Vec<FieldId> {
        match self.wants_renewal {
            Some(YesNo::Yes) => FieldId::ALL.to_vec(),
            _ => vec![FieldId::WantsRenewal],
        }
    }

    pub fn validate(&self) -> Result<Application, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(wants_renewal) = self.wants_renewal else {
            errors.insert(FieldId::WantsRenewal, FieldErrorKind::Required);
            return Err(errors);
        };

        match wants_renewal {
            YesNo::No => Ok(Application::Declined),
            YesNo::Yes => self
                .validate_renewal(&mut errors)
                .map(|details| Application::Renewal(Box::new(details)))
                .ok_or(errors),
        }
    }

    fn validate_renewal(&self, errors: &mut ValidationErrors) -> Option<RenewalDetails> {
        let dependents = required_choice(self.has_dependents, FieldId::HasDependents, errors);
        let email = self.required_email(errors);
        let bms_number = self.required_text(TextField::BmsNumber, errors);
        let full_name = self.required_text(TextField::FullName, errors);
        let passport_number = self.required_text(TextField::PassportNumber, errors);
        let passport_expiry = self.required_date(TextField::PassportExpiry, errors);
        let issue_country = self.required_text(TextField::IssueCountry, errors);
        let passport_issue = self.required_date(TextField::PassportIssue, errors);
        let tax_number = self.required_text(TextField::TaxNumber, errors);
        let location = required_choice(self.handover_location, FieldId::HandoverLocation, errors);
        let passport_copy = self.required_attachment(AttachmentSlot::PassportCopy, errors);
        let contract_letter = self.required_attachment(AttachmentSlot::ContractLetter, errors);
        let e_filing_slip = self.required_attachment(AttachmentSlot::EFilingSlip, errors);

        let (
            Some(dependents),
            Some(email),
            Some(bms_number),
            Some(full_name),
            Some(passport_number),
            Some(passport_expiry),
            Some(issue_country),
            Some(passport_issue),
            Some(tax_number),
            Some(location),
            Some(passport_copy),
            Some(contract_letter),
            Some(e_filing_slip),
        ) = (
            dependents,
            email,
            bms_number,
            full_name,
            passport_number,
            passport_expiry,
            issue_country,
            passport_issue,
            tax_number,
            location,
            passport_copy,
            contract_letter,
            e_filing_slip,
        )
        else {
            return None;
        };

        Some(RenewalDetails {
            dependents,
            email,
            bms_number,
            full_name,
            passport_number,
            passport_expiry,
            issue_country,
            passport_issue,
            tax_number,
            location,
            passport_copy,
            contract_letter,
            e_filing_slip,
            resume: self.attachment(AttachmentSlot::Resume).cloned(),
            certificates: self.attachment(AttachmentSlot::Certificates).cloned(),
        })
    }

    fn required_text(&self, field: TextField, errors: &mut ValidationErrors) -> Option<String> {
        let value = self.text(field).trim();
        if value.is_empty() {
            errors.insert(field.field_id(), FieldErrorKind::Required);
            return None;
        }
        Some(value.to_string())
    }

    fn required_email(&self, errors: &mut ValidationErrors) -> Option<String> {
        let email = self.required_text(TextField::Email, errors)?;
        if !EMAIL_SHAPE.is_match(&email) {
            errors.insert(FieldId::Email, FieldErrorKind::InvalidEmail);
            return None;
        }
        Some(email)
    }

    fn required_date(&self, field: TextField, errors: &mut ValidationErrors) -> Option<NaiveDate> {
        let raw = self.required_text(field, errors)?;
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert(field.field_id(), FieldErrorKind::InvalidDate);
                None
            }
        }
    }

    fn required_attachment(
        &self,
        slot: AttachmentSlot,
        errors: &mut ValidationErrors,
    ) -> Option<Attachment> {
        let attachment = self.attachment(slot).cloned();
        if attachment.is_none() {
            errors.insert(slot.field_id(), FieldErrorKind::FileRequired);
        }
        attachment
    }
}

fn required_choice<T: Copy>(
    value: Option<T>,
    field: FieldId,
    errors: &mut ValidationErrors,
) -> Option<T> {
    if value.is_none() {
        errors.insert(field, FieldErrorKind::Required);
    }
    value
}

/// A draft that passed validation. Declining needs no further data; a renewal
/// carries every required value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Application {
    Declined,
    Renewal(Box<RenewalDetails>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalDetails {
    pub dependents: YesNo,
    pub email: String,
    pub bms_number: String,
    pub full_name: String,
    pub passport_number: String,
    pub passport_expiry: NaiveDate,
    pub issue_country: String,
    pub passport_issue: NaiveDate,
    pub tax_number: String,
    pub location: HandoverLocation,
    pub passport_copy: Attachment,
    pub contract_letter: Attachment,
    pub e_filing_slip: Attachment,
    pub resume: Option<Attachment>,
    pub certificates: Option<Attachment>,
}

impl RenewalDetails {
    pub fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
