pub mod land_check;
pub mod nominatim;
pub mod polyline;
pub mod route_generator;
pub mod routing;
pub mod valhalla;
