use crate::prelude::Processor;
use crate::processing::builtin::{null_processor, print_processor};
use crate::processing::pipeline::Pipeline;
use crate::processing::relative_position::{Anchor, RelativePositionProcessor};
use crate::processing::set_origin::SetOriginProcessor;
use crate::processing::time_zero::TimeZeroProcessor;
use serde::{Deserialize, Serialize};

/// Declarative description of a built-in processor.
///
/// Lets a pipeline be written down in configuration and rebuilt with fresh
/// state each time `build` is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessorKind {
    Null,
    Print,
    TimeZero,
    SetOrigin,
    RelativePosition {
        #[serde(default)]
        anchor: Anchor,
    },
    Pipeline {
        #[serde(default)]
        name: Option<String>,
        stages: Vec<ProcessorKind>,
    },
}

impl ProcessorKind {
    pub fn build(&self) -> Box<dyn Processor> {
        match self {
            ProcessorKind::Null => Box::new(null_processor()),
            ProcessorKind::Print => Box::new(print_processor()),
            ProcessorKind::TimeZero => Box::new(TimeZeroProcessor::new()),
            ProcessorKind::SetOrigin => Box::new(SetOriginProcessor::new()),
            ProcessorKind::RelativePosition { anchor } => {
                Box::new(RelativePositionProcessor::new(*anchor))
            }
            ProcessorKind::Pipeline { name, stages } => {
                Box::new(build_pipeline(name.as_deref().unwrap_or("Pipeline"), stages))
            }
        }
    }
}

/// Builds a pipeline whose elements follow `stages` in order.
pub fn build_pipeline(name: &str, stages: &[ProcessorKind]) -> Pipeline {
    let mut pipeline = Pipeline::named(name);
    pipeline.extend(stages.iter().map(ProcessorKind::build));
    pipeline
}
