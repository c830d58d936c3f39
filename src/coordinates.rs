use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use nalgebra::Vector3;
use regex::Regex;

use crate::constants::{CoordinateString, Degree, RADEG};
use crate::conversion::{dec_deg_to_dms, parse_dms_to_deg, parse_hms_to_deg, ra_deg_to_hms};
use crate::skyresolve_errors::SkyResolveError;

// the right ascension ends at the first 's', the declination takes the rest
static COORDINATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+h\d+m[\d.]+s)\s*([+-]?\d+d\d+m[\d.]+s)\s*$")
        .expect("valid coordinate regex")
});

/// Equatorial position of an object, both angles in degrees.
///
/// Its [`Display`](fmt::Display) form is the coordinate string: right ascension in hms
/// directly followed by declination in dms, with no separator.
///
/// ```rust
/// use skyresolve::coordinates::SkyCoordinate;
///
/// let ceres = SkyCoordinate::new(70.86811, 16.21255);
/// assert_eq!(ceres.to_string(), "4h43m28.3464s16d12m45.18s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoordinate {
    pub ra: Degree,
    pub dec: Degree,
}

impl SkyCoordinate {
    pub fn new(ra: Degree, dec: Degree) -> Self {
        SkyCoordinate { ra, dec }
    }

    pub fn coordinate_string(&self) -> CoordinateString {
        self.to_string()
    }

    /// Unit vector pointing to the coordinate on the celestial sphere
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (ra, dec) = (self.ra * RADEG, self.dec * RADEG);
        Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
    }

    /// Angular separation with another coordinate, in degrees
    pub fn separation(&self, other: &SkyCoordinate) -> Degree {
        let (u, v) = (self.unit_vector(), other.unit_vector());
        // atan2 keeps the precision for small and near-antipodal separations
        u.cross(&v).norm().atan2(u.dot(&v)) / RADEG
    }
}

impl fmt::Display for SkyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ra_deg_to_hms(self.ra), dec_deg_to_dms(self.dec))
    }
}

impl FromStr for SkyCoordinate {
    type Err = SkyResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = COORDINATE_REGEX
            .captures(s)
            .ok_or_else(|| SkyResolveError::InvalidSexagesimal(s.into()))?;
        Ok(SkyCoordinate {
            ra: parse_hms_to_deg(&caps[1])?,
            dec: parse_dms_to_deg(&caps[2])?,
        })
    }
}
