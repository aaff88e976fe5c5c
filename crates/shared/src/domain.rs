use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownValue;

macro_rules! wire_enum {
    ($name:ident, $what:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownValue::new($what, other)),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

wire_enum!(YesNo, "yes/no answer", { Yes => "yes", No => "no" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoverLocation {
    Office,
    Home,
    Courier,
}

wire_enum!(HandoverLocation, "handover location", {
    Office => "office",
    Home => "home",
    Courier => "courier",
});

/// Free-text inputs of the renewal section, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Email,
    BmsNumber,
    FullName,
    PassportNumber,
    PassportExpiry,
    IssueCountry,
    PassportIssue,
    TaxNumber,
}

wire_enum!(TextField, "text field", {
    Email => "email",
    BmsNumber => "bmsNumber",
    FullName => "fullName",
    PassportNumber => "passportNumber",
    PassportExpiry => "passportExpiry",
    IssueCountry => "issueCountry",
    PassportIssue => "passportIssue",
    TaxNumber => "taxNumber",
});

impl TextField {
    pub fn field_id(self) -> FieldId {
        match self {
            TextField::Email => FieldId::Email,
            TextField::BmsNumber => FieldId::BmsNumber,
            TextField::FullName => FieldId::FullName,
            TextField::PassportNumber => FieldId::PassportNumber,
            TextField::PassportExpiry => FieldId::PassportExpiry,
            TextField::IssueCountry => FieldId::IssueCountry,
            TextField::PassportIssue => FieldId::PassportIssue,
            TextField::TaxNumber => FieldId::TaxNumber,
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, TextField::PassportExpiry | TextField::PassportIssue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentSlot {
    PassportCopy,
    ContractLetter,
    EFilingSlip,
    Resume,
    Certificates,
}

wire_enum!(AttachmentSlot, "attachment slot", {
    PassportCopy => "passportCopy",
    ContractLetter => "contractLetter",
    EFilingSlip => "eFilingSlip",
    Resume => "resume",
    Certificates => "certificates",
});

impl AttachmentSlot {
    pub const REQUIRED: &'static [AttachmentSlot] = &[
        AttachmentSlot::PassportCopy,
        AttachmentSlot::ContractLetter,
        AttachmentSlot::EFilingSlip,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn field_id(self) -> FieldId {
        match self {
            AttachmentSlot::PassportCopy => FieldId::PassportCopy,
            AttachmentSlot::ContractLetter => FieldId::ContractLetter,
            AttachmentSlot::EFilingSlip => FieldId::EFilingSlip,
            AttachmentSlot::Resume => FieldId::Resume,
            AttachmentSlot::Certificates => FieldId::Certificates,
        }
    }
}

/// Every addressable input on the form. Declaration order is form order, so
/// ordered maps keyed by `FieldId` iterate top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    WantsRenewal,
    HasDependents,
    Email,
    BmsNumber,
    FullName,
    PassportNumber,
    PassportExpiry,
    IssueCountry,
    PassportIssue,
    TaxNumber,
    HandoverLocation,
    PassportCopy,
    ContractLetter,
    EFilingSlip,
    Resume,
    Certificates,
}

wire_enum!(FieldId, "form field", {
    WantsRenewal => "renewEP",
    HasDependents => "dependents",
    Email => "email",
    BmsNumber => "bmsNumber",
    FullName => "fullName",
    PassportNumber => "passportNumber",
    PassportExpiry => "passportExpiry",
    IssueCountry => "issueCountry",
    PassportIssue => "passportIssue",
    TaxNumber => "taxNumber",
    HandoverLocation => "location",
    PassportCopy => "passportCopy",
    ContractLetter => "contractLetter",
    EFilingSlip => "eFilingSlip",
    Resume => "resume",
    Certificates => "certificates",
});

impl FieldId {
    pub fn attachment_slot(self) -> Option<AttachmentSlot> {
        match self {
            FieldId::PassportCopy => Some(AttachmentSlot::PassportCopy),
            FieldId::ContractLetter => Some(AttachmentSlot::ContractLetter),
            FieldId::EFilingSlip => Some(AttachmentSlot::EFilingSlip),
            FieldId::Resume => Some(AttachmentSlot::Resume),
            FieldId::Certificates => Some(AttachmentSlot::Certificates),
            _ => None,
        }
    }

    pub fn text_field(self) -> Option<TextField> {
        TextField::ALL
            .iter()
            .copied()
            .find(|field| field.field_id() == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ids_parse_from_wire_keys() {
        for field in FieldId::ALL {
            assert_eq!(field.as_str().parse::<FieldId>().expect("parse"), *field);
        }
        assert!("renewal".parse::<FieldId>().is_err());
    }

    #[test]
    fn only_first_three_slots_are_required() {
        let required: Vec<_> = AttachmentSlot::ALL
            .iter()
            .filter(|slot| slot.is_required())
            .collect();
        assert_eq!(required.len(), 3);
        assert!(!AttachmentSlot::Resume.is_required());
        assert!(!AttachmentSlot::Certificates.is_required());
    }

    #[test]
    fn text_and_slot_fields_map_back_to_field_ids() {
        assert_eq!(FieldId::TaxNumber.text_field(), Some(TextField::TaxNumber));
        assert_eq!(FieldId::HandoverLocation.text_field(), None);
        assert_eq!(
            FieldId::EFilingSlip.attachment_slot(),
            Some(AttachmentSlot::EFilingSlip)
        );
        assert_eq!(
            AttachmentSlot::Certificates.field_id(),
            FieldId::Certificates
        );
    }

    #[test]
    fn answers_parse_case_sensitively_after_trim() {
        assert_eq!(" yes ".parse::<YesNo>().expect("yes"), YesNo::Yes);
        assert_eq!(
            "courier".parse::<HandoverLocation>().expect("courier"),
            HandoverLocation::Courier
        );
        let err = "Office".parse::<HandoverLocation>().expect_err("case");
        assert!(err.to_string().contains("handover location"));
    }
}
