pub use crate::container::{Container, ContainerKind, Payload};
pub use crate::reference::{GeoPoint, ReferenceState};

/// Common error type for processor execution.
///
/// Every variant names the processor that raised it, so a pipeline can pass
/// errors through untouched and callers still see where the run stopped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("processor `{0}` does not implement process")]
    NotImplemented(String),
    #[error("processor `{processor}` expected a {expected} container, got {found}")]
    VariantMismatch {
        processor: String,
        expected: ContainerKind,
        found: ContainerKind,
    },
    #[error("processor `{processor}` failed: {reason}")]
    Failed { processor: String, reason: String },
}

impl ProcessError {
    pub fn mismatch(processor: &str, expected: ContainerKind, found: ContainerKind) -> Self {
        ProcessError::VariantMismatch {
            processor: processor.to_string(),
            expected,
            found,
        }
    }

    pub fn failed(processor: &str, reason: impl Into<String>) -> Self {
        ProcessError::Failed {
            processor: processor.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the processor the error originated from.
    pub fn processor(&self) -> &str {
        match self {
            ProcessError::NotImplemented(processor)
            | ProcessError::VariantMismatch { processor, .. }
            | ProcessError::Failed { processor, .. } => processor,
        }
    }
}

pub type ProcessResult<T> = Result<T, ProcessError>;

/// A step that takes one container and hands one back.
///
/// Processors must return a container on success even when they only mutate
/// it in place. Implementors that keep state across calls should override
/// `reset` so callers can start a new series with the same instance.
pub trait Processor: Send {
    fn name(&self) -> &str;

    fn process(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        let _ = (container, context);
        Err(ProcessError::NotImplemented(self.name().to_string()))
    }

    fn reset(&mut self) {}
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        (**self).process(container, context)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
