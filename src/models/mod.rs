pub mod coordinates;
pub mod distance;
pub mod geo;
pub mod route;

pub use coordinates::Coordinates;
pub use distance::DistanceRange;
pub use geo::BoundingBox;
pub use route::{Path, RouteCandidate, TransportMode};
