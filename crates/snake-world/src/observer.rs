//! Read-only view of the snapshots an [`crate::Engine`] publishes.

use snake_core::SnakeState;
use tokio::sync::watch;

/// Hot stream of snapshots, one per tick.
///
/// A subscriber starts from the most recent snapshot (if any tick has run yet)
/// and then sees every later one it is fast enough to observe. A slow reader
/// skips straight to the newest value instead of queueing history.
#[derive(Debug, Clone)]
pub struct SnapshotStream {
    rx: watch::Receiver<Option<SnakeState>>,
    primed: bool,
}

impl SnapshotStream {
    pub(crate) fn new(rx: watch::Receiver<Option<SnakeState>>) -> Self {
        Self { rx, primed: false }
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the engine has stopped and no unseen snapshot is
    /// left, after which the stream stays terminated.
    pub async fn next(&mut self) -> Option<SnakeState> {
        if !self.primed {
            self.primed = true;
            if let Some(state) = self.rx.borrow_and_update().clone() {
                return Some(state);
            }
        }

        loop {
            self.rx.changed().await.ok()?;
            if let Some(state) = self.rx.borrow_and_update().clone() {
                return Some(state);
            }
        }
    }

    /// Most recent snapshot without waiting; `None` before the first tick.
    pub fn latest(&self) -> Option<SnakeState> {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::Position;

    fn state(head: (i32, i32)) -> SnakeState {
        SnakeState::new(Position::new(5, 5), vec![Position::from(head)])
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_latest_first() {
        let (tx, rx) = watch::channel(None);
        tx.send_replace(Some(state((8, 7))));
        tx.send_replace(Some(state((9, 7))));

        let mut stream = SnapshotStream::new(rx);
        assert_eq!(stream.next().await, Some(state((9, 7))));

        tx.send_replace(Some(state((10, 7))));
        assert_eq!(stream.next().await, Some(state((10, 7))));
    }

    #[tokio::test]
    async fn test_nothing_before_first_tick() {
        let (tx, rx) = watch::channel(None);
        let stream = SnapshotStream::new(rx);
        assert_eq!(stream.latest(), None);

        tx.send_replace(Some(state((8, 7))));
        assert_eq!(stream.latest(), Some(state((8, 7))));
    }

    #[tokio::test]
    async fn test_terminates_when_publisher_dropped() {
        let (tx, rx) = watch::channel(None);
        let mut stream = SnapshotStream::new(rx);

        tx.send_replace(Some(state((8, 7))));
        drop(tx);

        // The unseen value is still delivered, then the stream ends
        assert_eq!(stream.next().await, Some(state((8, 7))));
        assert_eq!(stream.next().await, None);
        assert_eq!(stream.next().await, None);
    }
}
