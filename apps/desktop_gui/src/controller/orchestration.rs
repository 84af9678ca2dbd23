//! Hands UI actions to the backend worker without blocking the frame.

use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`. When it cannot be queued, the reason goes to the status bar.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    let Err(err) = cmd_tx.try_send(cmd) else {
        tracing::debug!(command = cmd_name, "queued student command");
        return;
    };

    *status = if err.is_full() {
        format!("Still waiting on earlier student requests; {cmd_name} was not sent, try again")
    } else {
        format!("Student records worker has stopped; {cmd_name} was not sent, reopen the window")
    };
    tracing::warn!(command = cmd_name, "student command dropped");
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn queues_command_and_leaves_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = "Ready".to_string();

        dispatch_backend_command(&tx, BackendCommand::Reload, &mut status);

        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Reload)));
        assert_eq!(status, "Ready");
    }

    #[test]
    fn full_queue_names_the_dropped_command() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();

        dispatch_backend_command(&tx, BackendCommand::Reload, &mut status);
        dispatch_backend_command(&tx, BackendCommand::CancelEdit, &mut status);

        assert_eq!(
            status,
            "Still waiting on earlier student requests; cancel_edit was not sent, try again"
        );
    }

    #[test]
    fn stopped_worker_asks_to_reopen_the_window() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let mut status = String::new();

        dispatch_backend_command(&tx, BackendCommand::Reload, &mut status);

        assert!(status.starts_with("Student records worker has stopped; reload was not sent"));
    }
}
