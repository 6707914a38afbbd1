use std::num::NonZeroUsize;

use log::{error, info};
use masterror::AppError;
use tokio::runtime::Handle;
use wallclock_core::{
    ModuleContext,
    event_bus::{BusEvent, EventBus, EventReceiver, ModuleEvent},
    modules::{Module, ModuleError, clock::Clock},
};
use wallclock_proto::{config::Config, ports::surface::TextSurfacePort};

const EVENT_BUS_CAPACITY: NonZeroUsize = NonZeroUsize::new(32).unwrap();

/// Owns the pipeline: the clock module producing ticks, the bus they travel
/// over, and the surface the formatted time is rendered to.
pub struct App<S> {
    clock: Clock,
    config: Config,
    bus_receiver: EventReceiver,
    surface: S,
}

impl<S> App<S>
where
    S: TextSurfacePort,
{
    /// Wire the pipeline and start the time source.
    ///
    /// The clock module's tick task begins publishing as soon as this
    /// returns; events accumulate on the bus until [`run`](App::run) drains
    /// them.
    pub fn new(config: Config, surface: S, runtime_handle: Handle) -> Result<Self, ModuleError> {
        let bus = EventBus::new(EVENT_BUS_CAPACITY);
        let context = ModuleContext::new(bus.sender(), runtime_handle);

        let mut clock = Clock::new();
        Module::register(&mut clock, &context, &config.clock)?;

        Ok(Self {
            clock,
            config,
            bus_receiver: bus.receiver(),
            surface,
        })
    }

    /// Drive the pipeline until Ctrl-C.
    ///
    /// Every drained tick updates the clock state and triggers exactly one
    /// surface write, in the order the ticks were produced.
    pub async fn run(mut self) -> Result<(), AppError> {
        self.render()?;
        info!("wallclock started");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
                event = self.bus_receiver.recv() => {
                    match event {
                        Ok(event) => self.handle_event(event)?,
                        Err(err) => {
                            error!("failed to read event bus payload: {err}");
                            return Err(err.into());
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: BusEvent) -> Result<(), AppError> {
        match event {
            BusEvent::Module(ModuleEvent::Clock(message)) => {
                self.clock.update(message);
                self.render()
            }
            BusEvent::Redraw => self.render(),
            _ => Ok(()),
        }
    }

    fn render(&mut self) -> Result<(), AppError> {
        if let Some(text) = self.clock.view(&self.config.clock) {
            self.surface.set_text(&text)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use wallclock_core::modules::clock;
    use wallclock_proto::config::{ClockModuleConfig, Timezone};
    use wallclock_proto::ports::surface::SurfaceError;

    use super::*;

    #[derive(Debug, Default)]
    struct MockSurface {
        writes: Vec<String>,
    }

    impl TextSurfacePort for MockSurface {
        fn set_text(&mut self, text: &str) -> Result<(), SurfaceError> {
            self.writes.push(text.to_owned());
            Ok(())
        }
    }

    fn utc_config() -> Config {
        Config {
            clock: ClockModuleConfig {
                timezone: Timezone::Utc,
            },
            ..Config::default()
        }
    }

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, s)
            .single()
            .expect("valid instant")
    }

    fn app_without_ticker(bus: &EventBus) -> App<MockSurface> {
        App {
            clock: Clock::new(),
            config: utc_config(),
            bus_receiver: bus.receiver(),
            surface: MockSurface::default(),
        }
    }

    #[test]
    fn renders_each_tick_exactly_once_in_order() {
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let mut app = app_without_ticker(&bus);

        for instant in [utc(7, 1, 1), utc(8, 2, 2), utc(9, 3, 3)] {
            bus.publish(BusEvent::Module(ModuleEvent::Clock(clock::Message::Tick(
                instant,
            ))))
            .expect("publish");
        }

        while let Some(event) = app.bus_receiver.try_recv().expect("receive") {
            app.handle_event(event).expect("handle");
        }

        assert_eq!(app.surface.writes, ["07:01:01", "08:02:02", "09:03:03"]);
    }

    #[test]
    fn redraw_repeats_the_current_value() {
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let mut app = app_without_ticker(&bus);

        app.handle_event(BusEvent::Module(ModuleEvent::Clock(clock::Message::Tick(
            utc(12, 0, 0),
        ))))
        .expect("tick");
        app.handle_event(BusEvent::Redraw).expect("redraw");

        assert_eq!(app.surface.writes, ["12:00:00", "12:00:00"]);
    }

    #[tokio::test(start_paused = true)]
    async fn registered_ticker_drives_surface_writes() {
        let mut app = App::new(utc_config(), MockSurface::default(), Handle::current())
            .expect("wire pipeline");

        // First interval tick fires as soon as the task runs.
        tokio::task::yield_now().await;

        for _ in 0..3 {
            tokio::time::advance(clock::TICK_INTERVAL).await;
            tokio::task::yield_now().await;
        }

        while let Some(event) = app.bus_receiver.try_recv().expect("receive") {
            app.handle_event(event).expect("handle");
        }

        assert_eq!(app.surface.writes.len(), 4);
        for text in &app.surface.writes {
            assert_eq!(text.len(), 8);
        }
    }
}
