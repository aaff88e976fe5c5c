//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use intake_core::{HttpSubmitter, Settings};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. The UI learns it is usable from
/// `UiEvent::BackendReady`; startup failures arrive as `UiEvent::Error`.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        let submitter = match HttpSubmitter::new(&settings) {
            Ok(submitter) => submitter,
            Err(err) => {
                error!("failed to build workflow client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                return;
            }
        };

        info!(host = %submitter.endpoint_host(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::BackendReady);

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit(prepared) => {
                        let id = prepared.id();
                        let outcome = prepared.send(&submitter).await;
                        if ui_tx
                            .send(UiEvent::SubmissionFinished { id, outcome })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
        });
        info!("backend worker stopped");
    });
}
