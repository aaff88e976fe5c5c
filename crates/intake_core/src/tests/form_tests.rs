use super::*;

use crate::attachment::{AttachmentGate, CandidateFile, PDF_CONTENT_TYPE};

fn pdf(name: &str) -> Attachment {
    AttachmentGate::default()
        .admit(CandidateFile::in_memory(
            name,
            PDF_CONTENT_TYPE,
            b"%PDF-1.7 test".to_vec(),
        ))
        .expect("admit pdf")
}

fn complete_renewal() -> FormDraft {
    let mut draft = FormDraft {
        wants_renewal: Some(YesNo::Yes),
        has_dependents: Some(YesNo::No),
        email: "alex.tan@example.com".into(),
        bms_number: "BMS12345".into(),
        full_name: "Alex Tan".into(),
        passport_number: "A12345678".into(),
        passport_expiry: "2031-04-30".into(),
        issue_country: "Malaysia".into(),
        passport_issue: "2021-05-01".into(),
        tax_number: "IG987654321".into(),
        handover_location: Some(HandoverLocation::Office),
        ..FormDraft::default()
    };
    draft.set_attachment(AttachmentSlot::PassportCopy, Some(pdf("passport.pdf")));
    draft.set_attachment(AttachmentSlot::ContractLetter, Some(pdf("contract.pdf")));
    draft.set_attachment(AttachmentSlot::EFilingSlip, Some(pdf("efiling.pdf")));
    draft
}

#[test]
fn unanswered_opening_question_is_the_only_error() {
    let mut draft = complete_renewal();
    draft.wants_renewal = None;
    draft.email = "not-an-email".into();
    draft.full_name.clear();

    let errors = draft.validate().expect_err("unset");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(FieldId::WantsRenewal), Some(FieldErrorKind::Required));

    let errors = FormDraft::default().validate().expect_err("empty form");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldId::WantsRenewal]);
}

#[test]
fn declining_ignores_every_other_field() {
    let mut draft = FormDraft {
        wants_renewal: Some(YesNo::No),
        email: "not-an-email".into(),
        passport_expiry: "tomorrow".into(),
        ..FormDraft::default()
    };
    assert_eq!(draft.validate(), Ok(Application::Declined));

    draft.set_attachment(AttachmentSlot::Resume, Some(pdf("cv.pdf")));
    assert_eq!(draft.validate(), Ok(Application::Declined));
}

#[test]
fn complete_renewal_validates_into_typed_details() {
    let application = complete_renewal().validate().expect("valid");
    let Application::Renewal(details) = application else {
        panic!("expected renewal details");
    };
    assert_eq!(details.email, "alex.tan@example.com");
    assert_eq!(
        details.passport_expiry,
        NaiveDate::from_ymd_opt(2031, 4, 30).expect("date")
    );
    assert_eq!(details.location, HandoverLocation::Office);
    assert!(details.resume.is_none());
    assert!(details.certificates.is_none());
}

#[test]
fn malformed_email_is_reported_only_on_email() {
    let mut draft = complete_renewal();
    draft.email = "not-an-email".into();

    let errors = draft.validate().expect_err("bad email");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(FieldId::Email), Some(FieldErrorKind::InvalidEmail));
}

#[test]
fn empty_renewal_reports_every_required_field_at_once() {
    let draft = FormDraft {
        wants_renewal: Some(YesNo::Yes),
        ..FormDraft::default()
    };
    let errors = draft.validate().expect_err("empty renewal");

    let expected: Vec<FieldId> = FieldId::ALL
        .iter()
        .copied()
        .filter(|field| {
            !matches!(
                field,
                FieldId::WantsRenewal | FieldId::Resume | FieldId::Certificates
            )
        })
        .collect();
    assert_eq!(errors.fields().collect::<Vec<_>>(), expected);
    assert_eq!(errors.get(FieldId::Email), Some(FieldErrorKind::Required));
    assert_eq!(
        errors.get(FieldId::EFilingSlip),
        Some(FieldErrorKind::FileRequired)
    );
}

#[test]
fn whitespace_only_values_count_as_empty() {
    let mut draft = complete_renewal();
    draft.tax_number = "   ".into();
    let errors = draft.validate().expect_err("blank");
    assert_eq!(errors.get(FieldId::TaxNumber), Some(FieldErrorKind::Required));
}

#[test]
fn dates_must_be_calendar_dates() {
    let mut draft = complete_renewal();
    draft.passport_expiry = "30/04/2031".into();
    draft.passport_issue = "2021-02-30".into();

    let errors = draft.validate().expect_err("bad dates");
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get(FieldId::PassportExpiry),
        Some(FieldErrorKind::InvalidDate)
    );
    assert_eq!(
        errors.get(FieldId::PassportIssue),
        Some(FieldErrorKind::InvalidDate)
    );
}

#[test]
fn clearing_a_mandatory_slot_invalidates_the_form() {
    let mut draft = complete_renewal();
    draft.set_attachment(AttachmentSlot::ContractLetter, None);
    let errors = draft.validate().expect_err("missing contract");
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec![FieldId::ContractLetter]
    );
}

#[test]
fn renewal_fields_only_visible_after_yes() {
    let mut draft = FormDraft::default();
    assert_eq!(draft.visible_fields(), vec![FieldId::WantsRenewal]);

    draft.wants_renewal = Some(YesNo::No);
    assert_eq!(draft.visible_fields(), vec![FieldId::WantsRenewal]);

    draft.wants_renewal = Some(YesNo::Yes);
    let visible = draft.visible_fields();
    assert_eq!(visible.len(), FieldId::ALL.len());
    assert_eq!(visible.last(), Some(&FieldId::Certificates));
}
