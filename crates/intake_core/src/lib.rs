//! Renewal intake core: form state, validation, attachment handling and the
//! single outbound submission.

pub mod attachment;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod submitter;

pub use attachment::{
    human_readable_bytes, Attachment, AttachmentGate, CandidateFile, MAX_ATTACHMENT_BYTES,
    PDF_CONTENT_TYPE,
};
pub use config::{load_settings, EndpointSecret, Settings};
pub use controller::{FormController, Notice, PreparedSubmission, SubmissionStatus};
pub use error::{ConfigError, FieldUpdateError, SubmitError, SubmitRejected};
pub use form::{Application, FormDraft, RenewalDetails};
pub use submitter::{HttpSubmitter, Submitter};
