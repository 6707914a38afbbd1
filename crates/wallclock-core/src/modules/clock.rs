mod format;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use log::error;
use tokio::{task::JoinHandle, time::interval};

pub use format::ClockString;

use wallclock_proto::{
    config::{ClockModuleConfig, Timezone},
    ports::clock::{SystemWallClock, WallClockPort},
};

use crate::{
    ModuleContext, ModuleEventSender,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
};

/// Tick cadence of the time source. The rendered format always includes
/// seconds, so the cadence is fixed at one second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Clock data for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockData {
    pub current_time: DateTime<Utc>,
}

impl ClockData {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { current_time: now }
    }

    pub fn update(&mut self, now: DateTime<Utc>) {
        self.current_time = now;
    }

    /// Format the held instant as `HH:MM:SS` in the given timezone.
    pub fn format(&self, timezone: Timezone) -> ClockString {
        match timezone {
            Timezone::Local => ClockString::format(self.current_time.with_timezone(&Local).time()),
            Timezone::Utc => ClockString::format(self.current_time.time()),
        }
    }
}

/// Events emitted by the clock module
#[derive(Debug, Clone)]
pub enum Message {
    Tick(DateTime<Utc>),
}

/// Clock module: owns the tick task that reads the wall clock once per
/// second and publishes the instant onto the event bus.
pub struct Clock {
    data: ClockData,
    tick_interval: Duration,
    sender: Option<ModuleEventSender<Message>>,
    task: Option<JoinHandle<()>>,
    wall_clock: Arc<dyn WallClockPort>,
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("data", &self.data)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::with_wall_clock(Arc::new(SystemWallClock))
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clock reading time from the provided port instead of the
    /// system clock.
    pub fn with_wall_clock(wall_clock: Arc<dyn WallClockPort>) -> Self {
        Self {
            data: ClockData::new(wall_clock.now()),
            tick_interval: TICK_INTERVAL,
            sender: None,
            task: None,
            wall_clock,
        }
    }

    /// Get current clock data for rendering
    pub fn data(&self) -> &ClockData {
        &self.data
    }

    /// Initialize with the module context and start the tick task.
    ///
    /// The task produces one timestamp per interval for as long as the
    /// process lives; a failed publish is logged and the tick dropped.
    /// Re-registering aborts the previous task first.
    pub fn register(&mut self, ctx: &ModuleContext) {
        self.data.update(self.wall_clock.now());
        self.sender = Some(ctx.module_sender(ModuleEvent::Clock));

        if let Some(task) = self.task.take() {
            task.abort();
        }

        if let Some(sender) = self.sender.clone() {
            let interval_duration = self.tick_interval;
            let wall_clock = Arc::clone(&self.wall_clock);

            self.task = Some(ctx.runtime_handle().spawn(async move {
                let mut ticker = interval(interval_duration);

                loop {
                    ticker.tick().await;
                    let now = wall_clock.now();

                    if let Err(err) = sender.try_send(Message::Tick(now)) {
                        error!("Failed to publish clock tick: {err}");
                    }
                }
            }));
        }
    }

    /// Update clock state from a drained bus message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick(now) => self.data.update(now),
        }
    }
}

impl Module for Clock {
    type ViewData<'a> = &'a ClockModuleConfig;
    type RegistrationData<'a> = &'a ClockModuleConfig;

    fn register(
        &mut self,
        ctx: &ModuleContext,
        _config: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        self.register(ctx);
        Ok(())
    }

    fn view(&self, config: Self::ViewData<'_>) -> Option<String> {
        Some(self.data.format(config.timezone).to_string())
    }
}
