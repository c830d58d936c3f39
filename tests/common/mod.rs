use std::cell::RefCell;
use std::collections::HashMap;

use hifitime::Epoch;
use skyresolve::jpl_request::{Ephemeris, EphemerisRequest, EphemerisRow, EphemerisSource};
use skyresolve::time::parse_observation_time;
use skyresolve::SkyResolveError;

pub enum FakeEntry {
    Position(f64, f64),
    NotFound,
    Ambiguous,
    Broken,
    /// Not found, reported under another identifier (e.g. the provider's canonical name)
    NotFoundAs(&'static str),
}

/// In-memory ephemeris source recording every requested identifier
#[derive(Default)]
pub struct FakeEphemeris {
    entries: HashMap<String, FakeEntry>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeEphemeris {
    pub fn with(mut self, id: &str, entry: FakeEntry) -> Self {
        self.entries.insert(id.to_string(), entry);
        self
    }

    /// Positions returned by Horizons on 2021-Oct-18 09:30 UTC
    pub fn asteroids_2021_oct_18() -> Self {
        FakeEphemeris::default()
            .with("ceres", FakeEntry::Position(70.86811, 16.21255))
            .with("pallas", FakeEntry::Position(341.79788, -8.10075))
            .with("vesta", FakeEntry::Position(222.83081, -12.33644))
            .with("199", FakeEntry::Position(341.9176, -29.24254))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl EphemerisSource for FakeEphemeris {
    fn ephemerides(&self, request: &EphemerisRequest) -> Result<Ephemeris, SkyResolveError> {
        let id = request.target.clone();
        self.calls.borrow_mut().push(id.to_string());
        match self.entries.get(id.as_str()) {
            Some(FakeEntry::Position(ra, dec)) => Ok(Ephemeris {
                target_name: Some(id.to_string()),
                rows: vec![EphemerisRow {
                    date: "2021-Oct-18 09:30".into(),
                    ra: *ra,
                    dec: *dec,
                }],
            }),
            Some(FakeEntry::Ambiguous) => Err(SkyResolveError::AmbiguousTarget {
                id,
                details: "Multiple major-bodies match string".into(),
            }),
            Some(FakeEntry::Broken) => Err(SkyResolveError::MalformedEphemeris(
                "no $$SOE/$$EOE table".into(),
            )),
            Some(FakeEntry::NotFoundAs(alias)) => {
                Err(SkyResolveError::ObjectNotFound((*alias).into()))
            }
            Some(FakeEntry::NotFound) | None => Err(SkyResolveError::ObjectNotFound(id)),
        }
    }
}

pub fn observing_time() -> Epoch {
    parse_observation_time("2021-Oct-18 09:30:00", "%Y-%b-%d %H:%M:%S").unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
