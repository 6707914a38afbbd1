use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use masterror::AppError;
use tokio::sync::Notify;

use crate::modules;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BusEvent {
    Redraw,
    Module(ModuleEvent),
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        // Tick events must never coalesce: one renderer invocation per tick,
        // in production order.
        matches!((self, other), (BusEvent::Redraw, BusEvent::Redraw))
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ModuleEvent {
    Clock(modules::clock::Message),
}

#[derive(Debug)]
struct EventBusInner {
    queue: Mutex<VecDeque<BusEvent>>,
    capacity: usize,
    notify: Notify,
}

impl EventBusInner {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity: capacity.get(),
            notify: Notify::new(),
        }
    }

    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        if queue.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        if let Some(last) = queue.back() {
            if event.is_coalescable_with(last) {
                return Ok(());
            }
        }

        queue.push_back(event);
        drop(queue);

        self.notify.notify_one();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum EventBusError {
    QueueFull { capacity: usize },
    Poisoned,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Event queue is full (capacity: {})", capacity)
            }
            Self::Poisoned => write!(f, "Event queue state is poisoned"),
        }
    }
}

impl std::error::Error for EventBusError {}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        match err {
            EventBusError::QueueFull { .. } => AppError::internal(err.to_string()),
            EventBusError::Poisoned => AppError::internal(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner::new(capacity)),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.pop_front())
    }

    /// Wait for the next event, in FIFO order.
    ///
    /// Pending events are drained before suspending, so a receiver that
    /// lagged behind the producer observes every queued event before it
    /// parks again.
    pub async fn recv(&mut self) -> Result<BusEvent, EventBusError> {
        loop {
            let notified = self.inner.notify.notified();

            {
                let mut queue = self
                    .inner
                    .queue
                    .lock()
                    .map_err(|_| EventBusError::Poisoned)?;

                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }

            notified.await;
        }
    }
}
