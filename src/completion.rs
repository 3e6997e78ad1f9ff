use crate::models::PickOutcome;
use tokio::sync::oneshot;

/// Single-shot completion handle for a pick request.
///
/// Consumed by [`Completion::complete`], so an outcome can be delivered at
/// most once. Dropping an unfinished completion delivers nothing; a channel
/// receiver then sees the sender closed.
pub struct Completion {
    inner: Box<dyn FnOnce(PickOutcome)>,
}

impl Completion {
    /// Wraps a closure called with the outcome
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(PickOutcome) + 'static,
    {
        Self { inner: Box::new(f) }
    }

    /// Completion that sends the outcome through a oneshot channel
    pub fn channel() -> (Self, oneshot::Receiver<PickOutcome>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self::new(move |outcome| {
            if tx.send(outcome).is_err() {
                log::debug!("Pick outcome dropped, receiver already gone");
            }
        });
        (completion, rx)
    }

    pub fn complete(self, outcome: PickOutcome) {
        (self.inner)(outcome)
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageLocation;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_closure_receives_outcome() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let completion = Completion::new(move |outcome| *sink.borrow_mut() = Some(outcome));

        completion.complete(PickOutcome::Cancelled);
        assert_eq!(*seen.borrow(), Some(PickOutcome::Cancelled));
    }

    #[test]
    fn test_channel_delivers_outcome() {
        let (completion, mut rx) = Completion::channel();
        let location = ImageLocation::new("content://media/1");
        completion.complete(PickOutcome::Selected(location.clone()));
        assert_eq!(rx.try_recv().unwrap(), PickOutcome::Selected(location));
    }

    #[test]
    fn test_dropped_completion_closes_channel() {
        let (completion, mut rx) = Completion::channel();
        drop(completion);
        assert!(matches!(
            rx.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        ));
    }
}
