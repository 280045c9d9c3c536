use crate::container::Position;
use crate::math::geo::LocalFrame;
use crate::prelude::{
    Container, ContainerKind, GeoPoint, Payload, ProcessError, ProcessResult, Processor,
    ReferenceState,
};
use serde::{Deserialize, Serialize};

/// Which stored location a relative position is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Origin,
    Reference,
}

impl Anchor {
    fn resolve(&self, context: &ReferenceState) -> GeoPoint {
        match self {
            Anchor::Origin => context.origin(),
            Anchor::Reference => context.reference(),
        }
    }
}

/// Converts `Coordinates` into a `Position` relative to an anchor location.
///
/// Rates are already meters per second and are carried over onto the local
/// axes: `vlong` east, `vlat` north, `valt` up. When anchored on the origin, the
/// origin must already be captured (usually by a `SetOriginProcessor` placed
/// earlier in the pipeline).
#[derive(Debug, Clone, Default)]
pub struct RelativePositionProcessor {
    anchor: Anchor,
}

impl RelativePositionProcessor {
    pub fn new(anchor: Anchor) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

impl Processor for RelativePositionProcessor {
    fn name(&self) -> &str {
        "RelativePositionProcessor"
    }

    fn process(
        &mut self,
        container: Container,
        context: &mut ReferenceState,
    ) -> ProcessResult<Container> {
        let coords = container.as_coordinates().ok_or_else(|| {
            ProcessError::mismatch(self.name(), ContainerKind::Coordinates, container.kind())
        })?;

        if self.anchor == Anchor::Origin && !context.is_origin_set() {
            return Err(ProcessError::failed(self.name(), "origin has not been captured"));
        }

        let frame = LocalFrame::new(self.anchor.resolve(context));
        let (x, y, z) = frame.offset(GeoPoint::new(coords.lat, coords.long, coords.alt));

        Ok(Container::new(
            container.time,
            Payload::Position(Position {
                x,
                y,
                z,
                vx: coords.vlong,
                vy: coords.vlat,
                vz: coords.valt,
            }),
        ))
    }
}
