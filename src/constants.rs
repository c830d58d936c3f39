//! # Constants and type definitions for skyresolve
//!
//! This module centralizes the **unit conversions**, **service defaults** and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ hours ↔ radians, base 60)
//! - Default endpoints of the JPL Horizons and SIMBAD services
//! - Core type aliases shared by the resolver, the ephemeris readers and the catalog client

use indexmap::IndexMap;

use crate::jpl_request::ObjectId;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of degrees in one hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;

/// Number of minutes in a unit (hour or degree), and seconds in a minute
pub const SEXAGESIMAL_BASE: f64 = 60.0;

/// Seconds fields are rounded to this many decimals before being printed.
/// It removes the floating noise left by the base-60 decomposition.
pub const SECONDS_DECIMALS: i32 = 9;

// -------------------------------------------------------------------------------------------------
// Service defaults
// -------------------------------------------------------------------------------------------------

/// JPL Horizons REST API (plain text output)
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// SIMBAD TAP synchronous endpoint
pub const SIMBAD_TAP_URL: &str = "https://simbad.cds.unistra.fr/simbad/sim-tap/sync";

/// Horizons site code for the geocenter (`500`) of the Earth (`399`)
pub const GEOCENTER: &str = "500@399";

/// Global timeout applied to every HTTP call, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Maximum number of rows requested from the catalog for one region query
pub const CATALOG_ROW_LIMIT: usize = 1000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Julian date, UTC scale
pub type JulianDate = f64;

/// Right ascension in hms directly followed by declination in dms,
/// e.g. `4h43m28.3464s16d12m45.18s`
pub type CoordinateString = String;

/// Ordered map from object identifier to its coordinate string, in first-insertion order
pub type CoordinateMap = IndexMap<ObjectId, CoordinateString>;
