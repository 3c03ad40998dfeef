use super::*;
use crate::testing::PROCESS_SIGNALS;
use std::time::Duration;

#[tokio::test]
async fn test_guard_tracks_supervised_children() {
    let _lock = PROCESS_SIGNALS.lock().await;
    assert!(!child_supervised());

    let outer = SupervisionGuard::acquire();
    let inner = SupervisionGuard::acquire();
    drop(inner);
    assert!(child_supervised());

    drop(outer);
    assert!(!child_supervised());
}

#[cfg(unix)]
mod unix {
    use super::*;

    fn raise_sigterm() {
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }
    }

    #[tokio::test]
    async fn test_stop_outside_supervision_resolves() {
        let _lock = PROCESS_SIGNALS.lock().await;
        let waiter = tokio::spawn(unsupervised_stop());
        tokio::time::sleep(Duration::from_millis(200)).await;

        raise_sigterm();

        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("stop signal was not observed")
            .unwrap();
    }

    #[tokio::test]
    async fn test_stop_between_children_is_not_swallowed() {
        let _lock = PROCESS_SIGNALS.lock().await;
        let guard = SupervisionGuard::acquire();
        let waiter = tokio::spawn(unsupervised_stop());
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Owned by the supervisor while a child runs
        raise_sigterm();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!waiter.is_finished());

        // First child reaped, second not yet spawned
        drop(guard);
        raise_sigterm();

        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("stop signal between children was swallowed")
            .unwrap();
    }
}
