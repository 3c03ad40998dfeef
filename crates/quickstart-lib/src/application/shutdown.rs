//! Process-wide stop signal handling
//!
//! Ctrl-C and SIGTERM are listened for from startup until exit. While a child
//! is supervised the supervisor owns the signal and stops the child itself.
//! A signal at any other point ends the launcher cleanly.

use std::sync::atomic::{AtomicUsize, Ordering};

static SUPERVISED_CHILDREN: AtomicUsize = AtomicUsize::new(0);

/// Marks a supervised child for as long as it is held
pub struct SupervisionGuard(());

impl SupervisionGuard {
    pub fn acquire() -> Self {
        SUPERVISED_CHILDREN.fetch_add(1, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for SupervisionGuard {
    fn drop(&mut self) {
        SUPERVISED_CHILDREN.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn child_supervised() -> bool {
    SUPERVISED_CHILDREN.load(Ordering::SeqCst) > 0
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Resolves on the first stop signal that arrives while no child is supervised
pub async fn unsupervised_stop() {
    loop {
        shutdown_signal().await;
        if !child_supervised() {
            return;
        }
        tracing::debug!("stop signal left to the child supervisor");
    }
}

/// Listen for stop signals in the background for the rest of the process
///
/// Launch stages block their worker thread on synchronous commands, so the
/// listener runs as its own task. `on_stop` runs before the process exits
/// with status 0.
pub fn spawn_stop_listener<F>(on_stop: F) -> tokio::task::JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        unsupervised_stop().await;
        tracing::info!("stop signal received outside supervision, exiting");
        on_stop();
        std::process::exit(0);
    })
}

#[cfg(test)]
mod tests {
    include!("shutdown.test.rs");
}
