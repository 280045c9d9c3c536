//! Telemetry-conditioning core for tracked-object samples.
//!
//! Raw samples arrive as [`Container`]s and are threaded through a
//! [`Pipeline`] of processors that re-base time, capture origins and convert
//! representations before the prediction model sees them.

pub mod container;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod reference;
pub mod telemetry;

pub use container::{Container, ContainerKind, Payload};
pub use prelude::{ProcessError, ProcessResult, Processor};
pub use processing::Pipeline;
pub use reference::{GeoPoint, ReferenceState};
