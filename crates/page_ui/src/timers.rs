//! Cancellable fixed-delay timeouts delivered back to the page event loop.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::document::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    BodyInitialized,
    ScrollToHash,
    DropdownFadeIn,
    DropdownHide,
    NotificationFade(NodeId),
    NotificationRemove(NodeId),
    SubmitSafetyReset(NodeId),
}

/// A timeout that ran out. Dropped by the event loop when it was cancelled
/// after it had already been queued.
#[derive(Debug)]
pub struct Expired {
    key: TimerKey,
    cancelled: Arc<AtomicBool>,
}

impl Expired {
    pub fn key(&self) -> TimerKey {
        self.key
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

pub struct TimeoutHandle {
    key: TimerKey,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl TimeoutHandle {
    pub fn key(&self) -> TimerKey {
        self.key
    }

    pub fn cancel(self) {
        self.cancelled.store(true, Ordering::Release);
        self.task.abort();
    }
}

#[derive(Clone)]
pub struct Timeouts {
    tx: UnboundedSender<Expired>,
}

impl Timeouts {
    pub fn new() -> (Self, UnboundedReceiver<Expired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, after: Duration, key: TimerKey) -> TimeoutHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let tx = self.tx.clone();
        let flag = cancelled.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(Expired {
                key,
                cancelled: flag,
            });
        });
        TimeoutHandle {
            key,
            cancelled,
            task,
        }
    }
}
