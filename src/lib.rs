//! # skyresolve
//!
//! Resolve solar-system object identifiers into sexagesimal sky coordinates using the
//! JPL Horizons ephemeris service, and look around those coordinates in the SIMBAD catalog.
//!
//! - [`resolver::CoordinateResolver`] – batch resolution with per-item failure isolation.
//! - [`jpl_request`] – the [`jpl_request::EphemerisSource`] capability and the Horizons client.
//! - [`catalog`] – the [`catalog::CatalogSource`] capability and the SIMBAD client.
//! - [`conversion`] / [`coordinates`] – sexagesimal formatting and parsing.
pub mod catalog;
pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod env_state;
pub mod jpl_request;
pub mod resolver;
pub mod skyresolve_errors;
pub mod time;

pub use constants::{CoordinateMap, CoordinateString};
pub use coordinates::SkyCoordinate;
pub use jpl_request::ObjectId;
pub use resolver::{BatchPolicy, CoordinateResolver};
pub use skyresolve_errors::SkyResolveError;
