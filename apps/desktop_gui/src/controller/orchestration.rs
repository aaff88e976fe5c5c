//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use intake_core::SubmitError;

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    QueueFull,
    WorkerDisconnected,
}

impl DispatchFailure {
    pub fn reason(self) -> &'static str {
        match self {
            DispatchFailure::QueueFull => "backend command queue is full",
            DispatchFailure::WorkerDisconnected => "backend worker disconnected",
        }
    }

    /// A refused submission ends the attempt like any other send failure.
    pub fn into_submit_error(self) -> SubmitError {
        SubmitError::Dispatch {
            reason: self.reason().to_string(),
        }
    }
}

/// Queues `cmd` without blocking the UI. A refused command is dropped.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchFailure> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err(DispatchFailure::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend worker disconnected");
            Err(DispatchFailure::WorkerDisconnected)
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use intake_core::{FormController, SubmitError};
    use shared::domain::YesNo;

    use super::*;

    fn declined_submission() -> BackendCommand {
        let mut controller = FormController::default();
        controller.set_wants_renewal(Some(YesNo::No));
        BackendCommand::Submit(controller.begin_submit().expect("valid"))
    }

    #[test]
    fn queues_when_worker_has_room() {
        let (tx, rx) = bounded(1);
        dispatch_backend_command(&tx, declined_submission()).expect("queued");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Submit(_))));
    }

    #[test]
    fn full_queue_is_a_dispatch_failure() {
        let (tx, _rx) = bounded(1);
        dispatch_backend_command(&tx, declined_submission()).expect("queued");
        let err = dispatch_backend_command(&tx, declined_submission()).expect_err("full");
        assert_eq!(err, DispatchFailure::QueueFull);
        assert!(matches!(err.into_submit_error(), SubmitError::Dispatch { .. }));
    }

    #[test]
    fn dropped_worker_is_a_dispatch_failure() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let err = dispatch_backend_command(&tx, declined_submission()).expect_err("gone");
        assert_eq!(err, DispatchFailure::WorkerDisconnected);
        assert!(err.into_submit_error().to_string().contains("disconnected"));
    }
}
