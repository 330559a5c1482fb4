//! Long-running loop: one cycle, then sleep until the next one or shutdown.

use std::time::Duration;

use tokio::sync::watch;

use crate::bot::cycle::{Bot, CycleReport};
use crate::error::Result;

/// Run cycles until `shutdown` flips to `true`.
///
/// The signal only interrupts the sleep between cycles; a cycle already in
/// progress always runs to completion.
pub async fn run_forever(bot: &Bot, delay: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut iteration: u64 = 0;
    // Cleared once the sender is gone; no stop request can arrive after that
    let mut listening = true;

    loop {
        iteration += 1;
        if iteration > 1 {
            tracing::info!("Restarting main process (iteration {})", iteration);
        }

        match bot.run_cycle().await {
            Ok(CycleReport::NoCandidates) => {}
            Ok(CycleReport::Recorded { id, .. }) => tracing::debug!("Cycle finished with {}", id),
            Err(e) => tracing::error!("Cycle aborted ({}): {}", e.kind(), e),
        }

        if *shutdown.borrow() {
            break;
        }

        tracing::info!("Sleeping for {} seconds", delay.as_secs());
        if sleep_or_shutdown(delay, &mut shutdown, &mut listening).await {
            break;
        }
    }

    tracing::info!("Shutting down after {} cycle(s)", iteration);
}

/// Sleep for `delay`; returns `true` if a stop was requested first.
async fn sleep_or_shutdown(
    delay: Duration,
    shutdown: &mut watch::Receiver<bool>,
    listening: &mut bool,
) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed(), if *listening => match changed {
                Ok(()) if *shutdown.borrow() => return true,
                Ok(()) => {}
                Err(_) => {
                    tracing::warn!("Shutdown signal handler is gone; running until killed");
                    *listening = false;
                }
            },
        }
    }
}

/// Spawn a task that flips the returned receiver on SIGINT, SIGTERM or SIGHUP.
#[cfg(unix)]
pub fn shutdown_signal() -> Result<watch::Receiver<bool>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
            _ = hangup.recv() => "SIGHUP",
        };
        tracing::info!("Received {}, stopping", name);
        let _ = tx.send(true);
    });

    Ok(rx)
}

/// Spawn a task that flips the returned receiver on Ctrl+C.
#[cfg(not(unix))]
pub fn shutdown_signal() -> Result<watch::Receiver<bool>> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl+C, stopping");
                let _ = tx.send(true);
            }
            Err(e) => {
                tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                // Keep the channel open so the loop carries on
                tx.closed().await;
            }
        }
    });

    Ok(rx)
}
