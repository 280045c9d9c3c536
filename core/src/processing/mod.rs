pub mod builtin;
pub mod kind;
pub mod pipeline;
pub mod relative_position;
pub mod set_origin;
pub mod time_zero;

pub use builtin::{null_process, print_process, FnProcessor};
pub use kind::{build_pipeline, ProcessorKind};
pub use pipeline::Pipeline;
pub use relative_position::{Anchor, RelativePositionProcessor};
pub use set_origin::SetOriginProcessor;
pub use time_zero::TimeZeroProcessor;
