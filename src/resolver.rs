//! # Batch coordinate resolution
//!
//! [`CoordinateResolver`] turns a list of object identifiers into their coordinate strings at a
//! given observation time, one geocentric ephemeris query per identifier, strictly in input order.
//!
//! ## Failure isolation
//!
//! Each identifier is resolved into its own `Result`. Lookup failures (no record, ambiguous
//! name, no ephemeris at the epoch) are logged with the failing identifier and then handled
//! according to the [`BatchPolicy`]:
//!
//! - [`BatchPolicy::SkipFailed`] (default): the identifier gets no entry and the batch goes on.
//! - [`BatchPolicy::StopAtFirstFailure`]: the batch stops and the entries accumulated so far
//!   are returned.
//!
//! Any other error (transport failure, unreadable answer) aborts the call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skyresolve::env_state::ResolverEnv;
//! use skyresolve::jpl_request::horizons_client::HorizonsClient;
//! use skyresolve::resolver::CoordinateResolver;
//! use skyresolve::time::parse_observation_time;
//!
//! let epoch = parse_observation_time("2021-Oct-18 09:30:00", "%Y-%b-%d %H:%M:%S").unwrap();
//! let resolver = CoordinateResolver::new(HorizonsClient::new(ResolverEnv::new()));
//!
//! let coords = resolver.resolve(&epoch, ["ceres", "pallas", "vesta", "199"]).unwrap();
//! assert_eq!(coords["ceres"], "4h43m28.3464s16d12m45.18s");
//! ```
use hifitime::Epoch;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogObject, CatalogSource, ReferenceFrame};
use crate::constants::{CoordinateMap, CoordinateString};
use crate::coordinates::SkyCoordinate;
use crate::jpl_request::{EphemerisRequest, EphemerisSource, IdType, ObjectId};
use crate::skyresolve_errors::SkyResolveError;

/// What to do with the rest of a batch once an identifier fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Leave the failing identifier out and continue with the next one
    #[default]
    SkipFailed,
    /// Stop the batch and return the entries resolved before the failure
    StopAtFirstFailure,
}

/// An identifier that could not be resolved, with the reason
#[derive(Debug, PartialEq)]
pub struct ResolutionFailure {
    pub id: ObjectId,
    pub error: SkyResolveError,
}

/// Outcome of a batch resolution
///
/// # Fields
///
/// * `coordinates` - one entry per resolved identifier, in input order
/// * `failures` - the identifiers isolated by the [`BatchPolicy`], in input order
/// * `stopped_early` - `true` when [`BatchPolicy::StopAtFirstFailure`] interrupted the batch
#[derive(Debug, Default, PartialEq)]
pub struct ResolutionReport {
    pub coordinates: CoordinateMap,
    pub failures: Vec<ResolutionFailure>,
    pub stopped_early: bool,
}

/// Catalog entries found around a resolved object
#[derive(Debug, PartialEq)]
pub struct RegionSurvey {
    pub target: ObjectId,
    pub coordinate: SkyCoordinate,
    pub coordinate_string: CoordinateString,
    pub matches: Vec<CatalogObject>,
}

/// Resolves object identifiers into coordinate strings through an [`EphemerisSource`].
#[derive(Debug, Clone)]
pub struct CoordinateResolver<S> {
    source: S,
    policy: BatchPolicy,
}

impl<S: EphemerisSource> CoordinateResolver<S> {
    pub fn new(source: S) -> Self {
        CoordinateResolver {
            source,
            policy: BatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Geocentric position of one object at `epoch`, taken from the first ephemeris row
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: the observation time
    /// * `id`: the object identifier, forwarded as is
    /// * `id_type`: how the provider should interpret `id`
    ///
    /// Return
    /// ------
    /// * the right ascension and declination of the object
    pub fn resolve_one(
        &self,
        epoch: &Epoch,
        id: &ObjectId,
        id_type: IdType,
    ) -> Result<SkyCoordinate, SkyResolveError> {
        let request = EphemerisRequest::geocentric(id, *epoch).with_id_type(id_type);
        let ephemeris = self.source.ephemerides(&request)?;
        let (ra, dec) = ephemeris.first_position()?;
        Ok(SkyCoordinate::new(ra, dec))
    }

    /// Resolve a batch of identifiers and keep the per-item failures
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: the observation time shared by the whole batch
    /// * `ids`: the identifiers, possibly empty or with duplicates (the last value wins,
    ///   the first position is kept)
    ///
    /// Return
    /// ------
    /// * the report of the batch, or the first error that is not a lookup failure
    pub fn resolve_report<I, T>(
        &self,
        epoch: &Epoch,
        ids: I,
    ) -> Result<ResolutionReport, SkyResolveError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        let mut report = ResolutionReport::default();

        for id in ids.into_iter().map(Into::into) {
            match self.resolve_one(epoch, &id, IdType::Unspecified) {
                Ok(coordinate) => {
                    debug!(object_id = %id, %coordinate, "object resolved");
                    report.coordinates.insert(id, coordinate.coordinate_string());
                }
                Err(error) if error.is_lookup_failure() => {
                    warn!(
                        object_id = %error.object_id().unwrap_or(&id),
                        %error,
                        "No value found for object id"
                    );
                    report.failures.push(ResolutionFailure { id, error });
                    if self.policy == BatchPolicy::StopAtFirstFailure {
                        report.stopped_early = true;
                        break;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            resolved = report.coordinates.len(),
            failed = report.failures.len(),
            stopped_early = report.stopped_early,
            "batch resolution done"
        );
        Ok(report)
    }

    /// Resolve a batch of identifiers into their coordinate strings
    ///
    /// Same as [`Self::resolve_report`], keeping only the mapping.
    pub fn resolve<I, T>(&self, epoch: &Epoch, ids: I) -> Result<CoordinateMap, SkyResolveError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        Ok(self.resolve_report(epoch, ids)?.coordinates)
    }

    /// Resolve one object, then list the catalog entries around its coordinate string
    ///
    /// Arguments
    /// ---------
    /// * `catalog`: the catalog to query
    /// * `epoch`: the observation time
    /// * `id`, `id_type`: the object to locate
    /// * `frame`: reference frame of the region center
    /// * `radius`: search radius, `1d0m0s` or decimal degrees
    ///
    /// Return
    /// ------
    /// * the object position and the catalog matches, closest first
    pub fn survey_region<C: CatalogSource>(
        &self,
        catalog: &C,
        epoch: &Epoch,
        id: impl Into<ObjectId>,
        id_type: IdType,
        frame: ReferenceFrame,
        radius: &str,
    ) -> Result<RegionSurvey, SkyResolveError> {
        let target = id.into();
        let coordinate = self.resolve_one(epoch, &target, id_type)?;
        let coordinate_string = coordinate.coordinate_string();
        let matches = catalog.query_region_str(&coordinate_string, frame, radius)?;
        info!(object_id = %target, %coordinate_string, n_matches = matches.len(), "region surveyed");

        Ok(RegionSurvey {
            target,
            coordinate,
            coordinate_string,
            matches,
        })
    }
}
