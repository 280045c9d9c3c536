use crate::prelude::{Container, ProcessResult, Processor, ReferenceState};
use crate::telemetry::log::LogManager;

/// Identity step: hands back the container it was given.
pub fn null_process(container: Container) -> Container {
    container
}

/// Logs the container's diagnostic rendering and hands it back unchanged.
pub fn print_process(container: Container) -> Container {
    LogManager::new("print_process").record(&container.to_string());
    container
}

/// Adapts a plain `Container -> Container` function into a [`Processor`].
pub struct FnProcessor<F> {
    name: String,
    func: F,
}

impl<F> FnProcessor<F>
where
    F: FnMut(Container) -> Container + Send,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Processor for FnProcessor<F>
where
    F: FnMut(Container) -> Container + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        container: Container,
        _context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        Ok((self.func)(container))
    }
}

/// Signature shared by the stateless built-ins.
pub type StatelessFn = fn(Container) -> Container;

pub fn null_processor() -> FnProcessor<StatelessFn> {
    FnProcessor::new("null_process", null_process as StatelessFn)
}

pub fn print_processor() -> FnProcessor<StatelessFn> {
    FnProcessor::new("print_process", print_process as StatelessFn)
}
