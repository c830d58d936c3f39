//! # Ephemeris sources
//!
//! Types shared by every provider able to answer "where is this object at this time":
//!
//! - [`ObjectId`]: the opaque identifier of a solar-system body, forwarded untouched.
//! - [`IdType`]: an optional hint telling the provider how to interpret the identifier.
//! - [`EphemerisRequest`] / [`Ephemeris`]: the query and the resulting table.
//! - [`EphemerisSource`]: the capability implemented by [`horizons_client::HorizonsClient`]
//!   and by test doubles.
use std::borrow::Borrow;
use std::fmt;

use hifitime::Epoch;

use crate::constants::Degree;
use crate::skyresolve_errors::SkyResolveError;

pub mod horizons_client;
pub mod horizons_reader;

/// Identifier of a solar-system body: a name (`ceres`) or a numeric code (`199`).
///
/// Its meaning is defined by the provider; no validation is done locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        ObjectId(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        ObjectId(id)
    }
}

impl From<&String> for ObjectId {
    fn from(id: &String) -> Self {
        ObjectId(id.clone())
    }
}

impl From<&ObjectId> for ObjectId {
    fn from(id: &ObjectId) -> Self {
        id.clone()
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        ObjectId(id.to_string())
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        ObjectId(id.to_string())
    }
}

/// Negative codes designate spacecraft in Horizons (e.g. `-48` for Hubble)
impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        ObjectId(id.to_string())
    }
}

/// How the provider should interpret an [`ObjectId`].
///
/// `Unspecified` lets the provider search major bodies first, then small bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdType {
    #[default]
    Unspecified,
    SmallBody,
    MajorBody,
    Designation,
    Name,
    AsteroidName,
    CometName,
}

/// One ephemeris query: a target seen from a location at one or more epochs.
///
/// # Fields
///
/// * `target` - the object identifier
/// * `id_type` - interpretation hint for `target`
/// * `location` - observer location code; `None` means geocentric
/// * `epochs` - UTC epochs, one output row each
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRequest {
    pub target: ObjectId,
    pub id_type: IdType,
    pub location: Option<String>,
    pub epochs: Vec<Epoch>,
}

impl EphemerisRequest {
    /// Geocentric request for a single epoch, without identifier hint
    pub fn geocentric(target: impl Into<ObjectId>, epoch: Epoch) -> Self {
        EphemerisRequest {
            target: target.into(),
            id_type: IdType::Unspecified,
            location: None,
            epochs: vec![epoch],
        }
    }

    pub fn with_id_type(mut self, id_type: IdType) -> Self {
        self.id_type = id_type;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// One row of an ephemeris table
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRow {
    /// Calendar date as printed by the provider
    pub date: String,
    pub ra: Degree,
    pub dec: Degree,
}

/// Ephemeris table returned by a source
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris {
    /// Target name as reported by the provider, when available
    pub target_name: Option<String>,
    pub rows: Vec<EphemerisRow>,
}

impl Ephemeris {
    /// Right ascension and declination (degrees) of the first row
    ///
    /// Return
    /// ------
    /// * `(ra, dec)` of row 0, or [`SkyResolveError::MalformedEphemeris`] if the table is empty
    ///   or the position is not finite
    pub fn first_position(&self) -> Result<(Degree, Degree), SkyResolveError> {
        let row = self
            .rows
            .first()
            .ok_or_else(|| SkyResolveError::MalformedEphemeris("empty ephemeris table".into()))?;

        if !row.ra.is_finite() || !row.dec.is_finite() {
            return Err(SkyResolveError::MalformedEphemeris(format!(
                "non-finite position ({}, {}) at {}",
                row.ra, row.dec, row.date
            )));
        }
        Ok((row.ra, row.dec))
    }
}

/// Capability to compute the ephemerides of a solar-system body.
pub trait EphemerisSource {
    /// Run one ephemeris query.
    ///
    /// Errors meaning "this identifier has no usable record" must be reported with the
    /// variants for which [`SkyResolveError::is_lookup_failure`] is `true`.
    fn ephemerides(&self, request: &EphemerisRequest) -> Result<Ephemeris, SkyResolveError>;
}

impl<S: EphemerisSource + ?Sized> EphemerisSource for &S {
    fn ephemerides(&self, request: &EphemerisRequest) -> Result<Ephemeris, SkyResolveError> {
        (**self).ephemerides(request)
    }
}

impl<S: EphemerisSource + ?Sized> EphemerisSource for Box<S> {
    fn ephemerides(&self, request: &EphemerisRequest) -> Result<Ephemeris, SkyResolveError> {
        (**self).ephemerides(request)
    }
}
