// ABOUTME: Tests for OutcomeHandle settlement and WorkError formatting.
// ABOUTME: Exercises the handle directly against its oneshot channel.

use tokio::sync::oneshot;
use tokio_test::{assert_pending, assert_ready_eq, task};

use super::handle::{OutcomeHandle, Settlement};
use super::{Sequencer, WorkError};

#[test]
fn test_pending_until_settled() {
    let (tx, rx) = oneshot::channel::<Settlement<u32, String>>();
    let mut handle = task::spawn(OutcomeHandle::new(1, rx));

    assert_pending!(handle.poll());
    tx.send(Ok(Ok(42))).unwrap();
    assert!(handle.is_woken());
    assert_ready_eq!(handle.poll(), Ok(42));
}

#[test]
fn test_work_error_passed_through() {
    let (tx, rx) = oneshot::channel::<Settlement<u32, String>>();
    let mut handle = task::spawn(OutcomeHandle::new(2, rx));

    tx.send(Ok(Err("bad status".to_string()))).unwrap();
    assert_ready_eq!(
        handle.poll(),
        Err(WorkError::Failed("bad status".to_string()))
    );
}

#[test]
fn test_dropped_sender_reports_abandoned() {
    let (tx, rx) = oneshot::channel::<Settlement<u32, String>>();
    let mut handle = task::spawn(OutcomeHandle::new(3, rx));

    drop(tx);
    assert_ready_eq!(handle.poll(), Err(WorkError::Abandoned));
}

#[test]
fn test_handle_id() {
    let (_tx, rx) = oneshot::channel::<Settlement<(), ()>>();
    assert_eq!(OutcomeHandle::new(9, rx).id(), 9);
}

#[tokio::test]
async fn test_handle_pending_while_queued() {
    let sequencer = Sequencer::new(1.0).unwrap();
    let mut handle = task::spawn(sequencer.submit(|| async { Ok::<_, String>("done") }));

    // The drain task has not run yet on this single-threaded runtime.
    assert_pending!(handle.poll());
    for _ in 0..10 {
        if handle.is_woken() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_ready_eq!(handle.poll(), Ok("done"));
}

#[test]
fn test_work_error_display() {
    let failed: WorkError<String> = WorkError::Failed("API error (429): slow down".to_string());
    assert_eq!(failed.to_string(), "API error (429): slow down");

    let panicked: WorkError<String> = WorkError::Panicked("oops".to_string());
    assert_eq!(panicked.to_string(), "work panicked: oops");

    let abandoned: WorkError<String> = WorkError::Abandoned;
    assert_eq!(abandoned.to_string(), "work was abandoned before it settled");
}

#[test]
fn test_into_failed() {
    assert_eq!(WorkError::Failed(5).into_failed(), Some(5));
    assert_eq!(WorkError::<i32>::Abandoned.into_failed(), None);
}
