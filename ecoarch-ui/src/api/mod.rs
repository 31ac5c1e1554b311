//! HTTP API handlers for ecoarch-ui

pub mod buildings;
pub mod health;
pub mod location;
pub mod options;
pub mod sessions;

pub use buildings::building_routes;
pub use health::health_routes;
pub use location::location_routes;
pub use options::option_routes;
pub use sessions::session_routes;
