// ABOUTME: OutcomeHandle - the future a submitter awaits for one work item.
// ABOUTME: Settles exactly once with the item's value or its failure.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::WorkError;

/// What the drain loop sends back: the work's own result, or a panic message.
pub(crate) type Settlement<T, E> = Result<Result<T, E>, String>;

/// Handle to the eventual outcome of a submitted work item.
///
/// Awaiting the handle yields `Ok` with the value the work produced, or
/// `Err(WorkError::Failed)` with the exact error it returned. Dropping the
/// handle does not cancel the item; it still runs in its turn.
#[derive(Debug)]
pub struct OutcomeHandle<T, E> {
    id: u64,
    rx: oneshot::Receiver<Settlement<T, E>>,
}

impl<T, E> OutcomeHandle<T, E> {
    pub(crate) fn new(id: u64, rx: oneshot::Receiver<Settlement<T, E>>) -> Self {
        Self { id, rx }
    }

    /// Submission sequence number, unique per sequencer.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<T, E> Future for OutcomeHandle<T, E> {
    type Output = Result<T, WorkError<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|settled| match settled {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(WorkError::Failed(e)),
            Ok(Err(panic)) => Err(WorkError::Panicked(panic)),
            Err(_) => Err(WorkError::Abandoned),
        })
    }
}
