use tracing::debug;

use super::horizons_reader::read_horizons_response;
use super::{Ephemeris, EphemerisRequest, EphemerisSource, IdType, ObjectId};
use crate::env_state::ResolverEnv;
use crate::skyresolve_errors::SkyResolveError;
use crate::time::jd_tlist;

/// Blocking client of the JPL Horizons API producing observer tables (astrometric RA/DEC).
///
/// Each call to [`EphemerisSource::ephemerides`] is one HTTP round trip; nothing is cached.
#[derive(Debug, Clone)]
pub struct HorizonsClient {
    env: ResolverEnv,
}

impl HorizonsClient {
    pub fn new(env: ResolverEnv) -> Self {
        HorizonsClient { env }
    }

    pub fn env(&self) -> &ResolverEnv {
        &self.env
    }

    /// Build the Horizons `COMMAND` value, decorating the identifier according to its type
    fn command(target: &ObjectId, id_type: IdType) -> String {
        let prefix = match id_type {
            IdType::Designation => "DES=",
            IdType::Name => "NAME=",
            IdType::AsteroidName => "ASTNAM=",
            IdType::CometName => "COMNAM=",
            IdType::Unspecified | IdType::SmallBody | IdType::MajorBody => "",
        };
        let suffix = match id_type {
            IdType::SmallBody
            | IdType::AsteroidName
            | IdType::CometName
            | IdType::Designation => ";",
            IdType::Unspecified | IdType::MajorBody | IdType::Name => "",
        };
        format!("{prefix}{target}{suffix}")
    }

    /// Query parameters of an observer table request
    ///
    /// Arguments
    /// ---------
    /// * `request`: the target, its type, the location and the epochs
    ///
    /// Return
    /// ------
    /// * the parameter list, or [`SkyResolveError::EmptyEpochList`] when no epoch is given
    pub(crate) fn query_params(
        &self,
        request: &EphemerisRequest,
    ) -> Result<Vec<(&'static str, String)>, SkyResolveError> {
        if request.epochs.is_empty() {
            return Err(SkyResolveError::EmptyEpochList);
        }

        let center = request
            .location
            .as_deref()
            .unwrap_or(&self.env.config.default_center);

        Ok(vec![
            ("format", "text".into()),
            (
                "COMMAND",
                format!("'{}'", Self::command(&request.target, request.id_type)),
            ),
            ("OBJ_DATA", "'NO'".into()),
            ("MAKE_EPHEM", "'YES'".into()),
            ("EPHEM_TYPE", "'OBSERVER'".into()),
            ("CENTER", format!("'{center}'")),
            ("TLIST", format!("'{}'", jd_tlist(&request.epochs))),
            ("TLIST_TYPE", "'JD'".into()),
            ("TIME_TYPE", "'UT'".into()),
            ("QUANTITIES", "'1'".into()),
            ("ANG_FORMAT", "'DEG'".into()),
            ("CSV_FORMAT", "'YES'".into()),
        ])
    }
}

impl EphemerisSource for HorizonsClient {
    fn ephemerides(&self, request: &EphemerisRequest) -> Result<Ephemeris, SkyResolveError> {
        let params = self.query_params(request)?;
        debug!(target_id = %request.target, n_epochs = request.epochs.len(), "Horizons query");
        let response = self
            .env
            .get_with_query(&self.env.config.horizons_url, &params)?;
        read_horizons_response(&response, &request.target)
    }
}
