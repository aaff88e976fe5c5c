//! Backend commands queued from UI to backend worker.

use intake_core::PreparedSubmission;

pub enum BackendCommand {
    /// Encode the snapshot's attachments and post it once.
    Submit(PreparedSubmission),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit(_) => "submit",
        }
    }
}
