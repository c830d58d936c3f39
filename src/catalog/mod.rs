//! # Catalog region queries
//!
//! A [`CatalogSource`] lists the catalogued objects lying within a radius of a sky position.
//! [`simbad::SimbadClient`] implements it against the SIMBAD TAP service.
//!
//! The region center can be given as a [`SkyCoordinate`] or directly as a coordinate string
//! (`22h47m40.224s-29d14m33.144s`) together with a radius string (`1d0m0s`), see
//! [`CatalogSource::query_region_str`].
use std::fmt;

use crate::constants::Degree;
use crate::conversion::parse_angle_to_deg;
use crate::coordinates::SkyCoordinate;
use crate::skyresolve_errors::SkyResolveError;

pub mod simbad;

/// Reference frame of a region center.
///
/// FK5 (J2000) differs from ICRS by a few tens of milliarcseconds; both are queried as ICRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceFrame {
    #[default]
    Icrs,
    Fk5,
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFrame::Icrs => f.write_str("ICRS"),
            ReferenceFrame::Fk5 => f.write_str("FK5"),
        }
    }
}

/// One catalog entry returned by a region query
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogObject {
    /// Main identifier in the catalog
    pub main_id: String,
    pub position: Option<SkyCoordinate>,
    pub object_type: Option<String>,
    /// Angular distance to the region center in degrees, `None` when the entry has no position
    pub separation: Option<Degree>,
}

/// Capability to list catalog entries around a position.
pub trait CatalogSource {
    /// Objects within `radius` degrees of `center`, closest first. An empty vector means no match.
    fn query_region(
        &self,
        center: &SkyCoordinate,
        frame: ReferenceFrame,
        radius: Degree,
    ) -> Result<Vec<CatalogObject>, SkyResolveError>;

    /// Same as [`Self::query_region`] with the center given as a coordinate string and the radius
    /// as an angle string (`1d0m0s` or decimal degrees)
    fn query_region_str(
        &self,
        center: &str,
        frame: ReferenceFrame,
        radius: &str,
    ) -> Result<Vec<CatalogObject>, SkyResolveError> {
        let center: SkyCoordinate = center.parse()?;
        let radius = parse_angle_to_deg(radius)?;
        if radius < 0.0 {
            return Err(SkyResolveError::InvalidSexagesimal(format!(
                "negative search radius {radius}"
            )));
        }
        self.query_region(&center, frame, radius)
    }
}

impl<C: CatalogSource + ?Sized> CatalogSource for &C {
    fn query_region(
        &self,
        center: &SkyCoordinate,
        frame: ReferenceFrame,
        radius: Degree,
    ) -> Result<Vec<CatalogObject>, SkyResolveError> {
        (**self).query_region(center, frame, radius)
    }
}

#[cfg(test)]
mod catalog_test {
    use std::cell::RefCell;

    use super::*;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct RecordingCatalog {
        calls: RefCell<Vec<(SkyCoordinate, ReferenceFrame, Degree)>>,
    }

    impl CatalogSource for RecordingCatalog {
        fn query_region(
            &self,
            center: &SkyCoordinate,
            frame: ReferenceFrame,
            radius: Degree,
        ) -> Result<Vec<CatalogObject>, SkyResolveError> {
            self.calls.borrow_mut().push((*center, frame, radius));
            Ok(vec![])
        }
    }

    #[test]
    fn test_query_region_str_parses_inputs() {
        let catalog = RecordingCatalog::default();
        let result = catalog
            .query_region_str("22h47m40.224s-29d14m33.144s", ReferenceFrame::Icrs, "1d0m0s")
            .unwrap();
        assert!(result.is_empty());

        let calls = catalog.calls.borrow();
        let (center, frame, radius) = calls[0];
        assert_relative_eq!(center.ra, 341.9176, epsilon = 1e-9);
        assert_relative_eq!(center.dec, -29.24254, epsilon = 1e-9);
        assert_eq!(frame, ReferenceFrame::Icrs);
        assert_eq!(radius, 1.0);
    }

    #[test]
    fn test_query_region_str_rejects_bad_input() {
        let catalog = RecordingCatalog::default();
        assert!(catalog
            .query_region_str("nowhere", ReferenceFrame::Icrs, "1d0m0s")
            .is_err());
        assert!(catalog
            .query_region_str("0h00m00s0d00m00s", ReferenceFrame::Fk5, "-1")
            .is_err());
        assert!(catalog.calls.borrow().is_empty());
    }
}
