pub mod geo;

pub use geo::LocalFrame;
