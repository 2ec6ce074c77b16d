//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. Returns `false` and updates `status`
/// when the worker cannot take it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped (possible startup/runtime failure); restart the app"
                .to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}
