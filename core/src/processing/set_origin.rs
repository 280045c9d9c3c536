use crate::prelude::{
    Container, ContainerKind, ProcessError, ProcessResult, Processor, ReferenceState,
};
use crate::telemetry::log::LogManager;

/// Captures the first `Coordinates` sample it sees as the run's origin.
///
/// Every call logs the stored origin, whether or not that call set it.
#[derive(Debug, Clone)]
pub struct SetOriginProcessor {
    origin_set: bool,
    logger: LogManager,
}

impl SetOriginProcessor {
    pub fn new() -> Self {
        Self {
            origin_set: false,
            logger: LogManager::new("SetOriginProcessor"),
        }
    }

    pub fn origin_set(&self) -> bool {
        self.origin_set
    }
}

impl Default for SetOriginProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for SetOriginProcessor {
    fn name(&self) -> &str {
        "SetOriginProcessor"
    }

    fn process(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        let coords = container.as_coordinates().ok_or_else(|| {
            ProcessError::mismatch(self.name(), ContainerKind::Coordinates, container.kind())
        })?;

        if !self.origin_set {
            context.set_origin(coords.lat, coords.long, coords.alt);
            self.origin_set = true;
        }

        self.logger.record(&format!("origin {}", context.origin()));
        Ok(container)
    }

    fn reset(&mut self) {
        self.origin_set = false;
    }
}
