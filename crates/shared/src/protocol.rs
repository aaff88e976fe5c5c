use serde::Serialize;

use crate::domain::{AttachmentSlot, HandoverLocation, YesNo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedAttachment {
    pub name: String,
    pub content: String,
    pub content_type: String,
}

/// JSON body posted to the workflow endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    #[serde(rename = "renewEP")]
    pub renew_ep: YesNo,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<RenewalPayload>,
}

impl SubmissionPayload {
    pub fn declined() -> Self {
        Self {
            renew_ep: YesNo::No,
            details: None,
        }
    }

    pub fn renewal(details: RenewalPayload) -> Self {
        Self {
            renew_ep: YesNo::Yes,
            details: Some(details),
        }
    }

    pub fn attachments(&self) -> Vec<(AttachmentSlot, &EncodedAttachment)> {
        self.details
            .as_ref()
            .map(RenewalPayload::attachments)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalPayload {
    pub dependents: YesNo,
    pub email: String,
    pub bms_number: String,
    pub full_name: String,
    pub passport_number: String,
    pub passport_expiry: String,
    pub issue_country: String,
    pub passport_issue: String,
    pub tax_number: String,
    pub location: HandoverLocation,
    pub passport_copy: EncodedAttachment,
    pub contract_letter: EncodedAttachment,
    pub e_filing_slip: EncodedAttachment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<EncodedAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificates: Option<EncodedAttachment>,
}

impl RenewalPayload {
    pub fn attachments(&self) -> Vec<(AttachmentSlot, &EncodedAttachment)> {
        let mut out = vec![
            (AttachmentSlot::PassportCopy, &self.passport_copy),
            (AttachmentSlot::ContractLetter, &self.contract_letter),
            (AttachmentSlot::EFilingSlip, &self.e_filing_slip),
        ];
        if let Some(resume) = &self.resume {
            out.push((AttachmentSlot::Resume, resume));
        }
        if let Some(certificates) = &self.certificates {
            out.push((AttachmentSlot::Certificates, certificates));
        }
        out
    }
}
