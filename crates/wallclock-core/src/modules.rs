use std::borrow::Cow;

use masterror::AppError;

use crate::{event_bus::EventBusError, module_context::ModuleContext};

pub mod clock;

/// Errors that can occur while registering a module.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Propagates failures originating from the event bus.
    #[error("module event bus interaction failed: {0}")]
    EventBus(#[from] EventBusError),
    /// Domain-specific registration failures surfaced by the module.
    #[error("module registration failed: {reason}")]
    Registration { reason: Cow<'static, str> },
}

impl ModuleError {
    /// Construct a registration error with the provided reason.
    pub fn registration(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Registration {
            reason: reason.into(),
        }
    }
}

impl From<ModuleError> for AppError {
    fn from(err: ModuleError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Behaviour shared by all modules rendered on the output surface.
///
/// Modules receive configuration snapshots as [`ViewData`](Module::ViewData)
/// when rendering and may opt into background work during
/// [`register`](Module::register), which exposes the shared
/// [`ModuleContext`] so they can cache typed event senders or spawn tasks.
pub trait Module {
    type ViewData<'a>;
    type RegistrationData<'a>;

    /// Register the module with the shared runtime context.
    ///
    /// The default implementation performs no work.
    fn register(
        &mut self,
        ctx: &ModuleContext,
        data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        let _ = (ctx, data);
        Ok(())
    }

    /// Produce the text this module currently wants displayed, if any.
    fn view(&self, data: Self::ViewData<'_>) -> Option<String>;
}
