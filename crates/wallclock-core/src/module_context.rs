use std::sync::Arc;

use tokio::runtime::Handle;

use crate::event_bus::{BusEvent, EventBusError, EventSender, ModuleEvent};

/// Shared utilities exposed to individual modules when they need to interact
/// with the core event loop.
///
/// The context owns an [`EventSender`] used to push [`BusEvent`] values into
/// the render queue and a [`Handle`] tied to the runtime powering background
/// tasks. Modules can use the handle to spawn asynchronous work; those tasks
/// must cooperate with cancellation by completing promptly when dropped.
/// Because event publication is synchronous, no pending publishes are left
/// behind when a task is cancelled.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    event_sender: EventSender,
    runtime_handle: Handle,
}

impl ModuleContext {
    /// Create a new context bound to the provided event sender and runtime
    /// handle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wallclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// # drop(context);
    /// ```
    pub fn new(event_sender: EventSender, runtime_handle: Handle) -> Self {
        Self {
            event_sender,
            runtime_handle,
        }
    }

    /// Access the runtime handle used for spawning background tasks.
    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    /// Request a redraw of the output surface.
    ///
    /// Enqueues a [`BusEvent::Redraw`] if the bus has remaining capacity,
    /// otherwise returns [`EventBusError::QueueFull`]. Consecutive redraw
    /// requests coalesce into one.
    pub fn request_redraw(&self) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Redraw)
    }

    fn publish_module_event(&self, event: ModuleEvent) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Module(event))
    }

    /// Build a type-safe module event sender from the provided conversion
    /// function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wallclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use wallclock_core::event_bus::ModuleEvent;
    /// # use wallclock_core::modules;
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(2).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// let sender = context.module_sender(ModuleEvent::Clock);
    /// sender
    ///     .try_send(modules::clock::Message::Tick(chrono::Utc::now()))
    ///     .expect("queued");
    /// ```
    pub fn module_sender<T, F>(&self, convert: F) -> ModuleEventSender<T>
    where
        T: Send + 'static,
        F: Fn(T) -> ModuleEvent + Send + Sync + 'static,
    {
        ModuleEventSender {
            context: self.clone(),
            convert: Arc::new(convert),
        }
    }
}

/// Strongly-typed wrapper around [`ModuleContext::publish_module_event`].
#[derive(Clone)]
pub struct ModuleEventSender<T> {
    context: ModuleContext,
    convert: Arc<dyn Fn(T) -> ModuleEvent + Send + Sync>,
}

impl<T> ModuleEventSender<T>
where
    T: Send + 'static,
{
    /// Convert the payload into a [`ModuleEvent`] and enqueue it on the bus.
    pub fn try_send(&self, payload: T) -> Result<(), EventBusError> {
        let event = (self.convert)(payload);
        self.context.publish_module_event(event)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use chrono::Utc;
    use tokio::runtime::Runtime;

    use crate::event_bus::{BusEvent, EventBus, ModuleEvent};
    use crate::modules::clock;

    use super::ModuleContext;

    #[test]
    fn request_redraw_enqueues_event() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
        let sender = bus.sender();
        let mut receiver = bus.receiver();
        let context = ModuleContext::new(sender, runtime.handle().clone());

        context.request_redraw().expect("redraw enqueued");

        let event = receiver.try_recv().expect("receive");
        assert!(matches!(event, Some(BusEvent::Redraw)));
    }

    #[test]
    fn module_sender_enqueues_module_event() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
        let sender = bus.sender();
        let mut receiver = bus.receiver();
        let context = ModuleContext::new(sender, runtime.handle().clone());

        let now = Utc::now();
        let clock_sender = context.module_sender(ModuleEvent::Clock);
        clock_sender
            .try_send(clock::Message::Tick(now))
            .expect("module enqueued");

        let event = receiver.try_recv().expect("receive");
        let Some(BusEvent::Module(ModuleEvent::Clock(clock::Message::Tick(received)))) = event
        else {
            panic!("unexpected event");
        };
        assert_eq!(received, now);
    }
}
