//! TOML answers file for headless submissions.
//!
//! ```toml
//! renew_ep = "yes"
//! dependents = "no"
//! email = "alex.tan@example.com"
//! location = "office"
//!
//! [attachments]
//! passport_copy = "docs/passport.pdf"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::FormController;
use serde::Deserialize;
use shared::{
    domain::{AttachmentSlot, HandoverLocation, TextField, YesNo},
    error::AttachmentRejection,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    pub renew_ep: Option<YesNo>,
    pub dependents: Option<YesNo>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bms_number: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub passport_number: String,
    #[serde(default)]
    pub passport_expiry: String,
    #[serde(default)]
    pub issue_country: String,
    #[serde(default)]
    pub passport_issue: String,
    #[serde(default)]
    pub tax_number: String,
    pub location: Option<HandoverLocation>,
    #[serde(default)]
    pub attachments: AttachmentPaths,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentPaths {
    pub passport_copy: Option<PathBuf>,
    pub contract_letter: Option<PathBuf>,
    pub e_filing_slip: Option<PathBuf>,
    pub resume: Option<PathBuf>,
    pub certificates: Option<PathBuf>,
}

impl AttachmentPaths {
    fn entries(&self) -> Vec<(AttachmentSlot, &Path)> {
        [
            (AttachmentSlot::PassportCopy, &self.passport_copy),
            (AttachmentSlot::ContractLetter, &self.contract_letter),
            (AttachmentSlot::EFilingSlip, &self.e_filing_slip),
            (AttachmentSlot::Resume, &self.resume),
            (AttachmentSlot::Certificates, &self.certificates),
        ]
        .into_iter()
        .filter_map(|(slot, path)| path.as_deref().map(|path| (slot, path)))
        .collect()
    }
}

pub fn load_answers(path: &Path) -> Result<Answers> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse answers file '{}'", path.display()))
}

impl Answers {
    /// Copies the answers into the controller. Attachment paths are resolved
    /// against `base_dir` and go through the selection gate; rejections are
    /// returned rather than aborting so every slot gets reported.
    pub fn apply(
        self,
        controller: &mut FormController,
        base_dir: &Path,
    ) -> Vec<(AttachmentSlot, AttachmentRejection)> {
        controller.set_wants_renewal(self.renew_ep);
        controller.set_has_dependents(self.dependents);
        controller.set_handover_location(self.location);
        for (field, value) in [
            (TextField::Email, &self.email),
            (TextField::BmsNumber, &self.bms_number),
            (TextField::FullName, &self.full_name),
            (TextField::PassportNumber, &self.passport_number),
            (TextField::PassportExpiry, &self.passport_expiry),
            (TextField::IssueCountry, &self.issue_country),
            (TextField::PassportIssue, &self.passport_issue),
            (TextField::TaxNumber, &self.tax_number),
        ] {
            controller.set_text(field, value.as_str());
        }

        let mut rejections = Vec::new();
        for (slot, path) in self.attachments.entries() {
            let resolved = base_dir.join(path);
            if let Err(rejection) = controller.select_attachment_path(slot, &resolved) {
                rejections.push((slot, rejection));
            }
        }
        rejections
    }
}

#[cfg(test)]
mod tests {
    use intake_core::FormController;
    use shared::domain::{FieldId, HandoverLocation, YesNo};

    use super::*;

    #[test]
    fn applies_answers_and_resolves_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("docs")).expect("docs");
        std::fs::write(dir.path().join("docs/passport.pdf"), b"%PDF-1.7 passport")
            .expect("passport");
        std::fs::write(dir.path().join("docs/photo.png"), b"\x89PNG").expect("png");

        let answers: Answers = toml::from_str(
            r#"
            renew_ep = "yes"
            dependents = "no"
            email = "alex.tan@example.com"
            location = "courier"

            [attachments]
            passport_copy = "docs/passport.pdf"
            contract_letter = "docs/photo.png"
            "#,
        )
        .expect("answers");

        let mut controller = FormController::default();
        let rejections = answers.apply(&mut controller, dir.path());

        assert_eq!(controller.draft().wants_renewal, Some(YesNo::Yes));
        assert_eq!(
            controller.draft().handover_location,
            Some(HandoverLocation::Courier)
        );
        assert!(controller
            .draft()
            .attachment(AttachmentSlot::PassportCopy)
            .is_some());
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].0, AttachmentSlot::ContractLetter);
        assert!(matches!(rejections[0].1, AttachmentRejection::NotPdf { .. }));

        let errors = controller.validate();
        assert!(errors.contains(FieldId::FullName));
        assert!(errors.contains(FieldId::ContractLetter));
        assert!(!errors.contains(FieldId::Email));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = toml::from_str::<Answers>("renew = \"yes\"\n").expect_err("typo");
        assert!(err.to_string().contains("renew"));
    }

    #[test]
    fn empty_file_leaves_opening_question_unanswered() {
        let answers: Answers = toml::from_str("").expect("empty");
        let mut controller = FormController::default();
        assert!(answers.apply(&mut controller, Path::new(".")).is_empty());
        assert_eq!(
            controller.validate().fields().collect::<Vec<_>>(),
            vec![FieldId::WantsRenewal]
        );
    }
}
