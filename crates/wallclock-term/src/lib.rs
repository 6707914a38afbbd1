use flexi_logger::LogSpecification;

pub mod app;
mod surface;

pub use app::App;
pub use surface::TerminalSurface;

pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        panic!("Failed to parse log level: {err}");
    })
}
