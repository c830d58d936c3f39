use serde::Deserialize;
use tracing::debug;

use super::{CatalogObject, CatalogSource, ReferenceFrame};
use crate::constants::Degree;
use crate::coordinates::SkyCoordinate;
use crate::env_state::ResolverEnv;
use crate::skyresolve_errors::SkyResolveError;

/// Row of the SIMBAD `basic` table as returned in CSV by the TAP service
#[derive(Debug, Deserialize, PartialEq)]
struct SimbadRecord {
    main_id: String,
    ra: Option<f64>,
    dec: Option<f64>,
    otype: Option<String>,
}

/// Blocking client of the SIMBAD TAP synchronous endpoint.
#[derive(Debug, Clone)]
pub struct SimbadClient {
    env: ResolverEnv,
}

impl SimbadClient {
    pub fn new(env: ResolverEnv) -> Self {
        SimbadClient { env }
    }

    /// ADQL cone query over the `basic` table
    ///
    /// SIMBAD stores ICRS positions only, so both frames use an ICRS circle.
    fn cone_query(&self, center: &SkyCoordinate, _frame: ReferenceFrame, radius: Degree) -> String {
        format!(
            "SELECT TOP {} main_id, ra, dec, otype FROM basic \
             WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', {}, {}, {})) = 1",
            self.env.config.catalog_row_limit, center.ra, center.dec, radius
        )
    }

    fn query_params(
        &self,
        center: &SkyCoordinate,
        frame: ReferenceFrame,
        radius: Degree,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("REQUEST", "doQuery".into()),
            ("LANG", "ADQL".into()),
            ("FORMAT", "csv".into()),
            ("QUERY", self.cone_query(center, frame, radius)),
        ]
    }
}

/// Parse the CSV answer of a SIMBAD cone query
///
/// Arguments
/// ---------
/// * `response`: the CSV body (header line first)
/// * `center`: the region center, used to compute the separations
///
/// Return
/// ------
/// * the catalog objects sorted by increasing separation, entries without position last
pub(crate) fn read_simbad_csv(
    response: &str,
    center: &SkyCoordinate,
) -> Result<Vec<CatalogObject>, SkyResolveError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(response.as_bytes());

    let headers = csv_reader.headers()?;
    if !headers.iter().any(|name| name == "main_id") {
        return Err(SkyResolveError::MalformedCatalog(
            response.lines().next().unwrap_or_default().to_string(),
        ));
    }

    let mut objects = csv_reader
        .deserialize::<SimbadRecord>()
        .map(|record| -> Result<CatalogObject, SkyResolveError> {
            let record = record?;
            let position = record.ra.zip(record.dec).map(|(ra, dec)| SkyCoordinate::new(ra, dec));
            Ok(CatalogObject {
                main_id: record.main_id,
                separation: position.map(|pos| center.separation(&pos)),
                position,
                object_type: record.otype.filter(|otype| !otype.is_empty()),
            })
        })
        .collect::<Result<Vec<CatalogObject>, SkyResolveError>>()?;

    objects.sort_by(|a, b| match (a.separation, b.separation) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    Ok(objects)
}

impl CatalogSource for SimbadClient {
    fn query_region(
        &self,
        center: &SkyCoordinate,
        frame: ReferenceFrame,
        radius: Degree,
    ) -> Result<Vec<CatalogObject>, SkyResolveError> {
        debug!(%center, %frame, radius, "SIMBAD region query");
        let params = self.query_params(center, frame, radius);
        let response = self.env.get_with_query(&self.env.config.simbad_url, &params)?;
        read_simbad_csv(&response, center)
    }
}
