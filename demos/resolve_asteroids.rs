//! Resolve the coordinates of a few asteroids and of Mercury on 2021-Oct-18 09:30 UTC,
//! then list the SIMBAD objects within one degree of Mercury.
//!
//! ```text
//! RUST_LOG=skyresolve=debug cargo run --example resolve_asteroids
//! ```
use skyresolve::catalog::simbad::SimbadClient;
use skyresolve::catalog::ReferenceFrame;
use skyresolve::env_state::ResolverEnv;
use skyresolve::jpl_request::horizons_client::HorizonsClient;
use skyresolve::jpl_request::IdType;
use skyresolve::time::parse_observation_time;
use skyresolve::{CoordinateResolver, SkyResolveError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SkyResolveError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let observing_time = parse_observation_time("2021-Oct-18 09:30:00", "%Y-%b-%d %H:%M:%S")?;

    let env = ResolverEnv::new();
    let resolver = CoordinateResolver::new(HorizonsClient::new(env.clone()));

    let report = resolver.resolve_report(&observing_time, ["ceres", "pallas", "vesta", "199"])?;
    for (key, value) in &report.coordinates {
        println!("{key}: {value}");
    }
    for failure in &report.failures {
        println!("No value found for object id: {}", failure.id);
    }

    let survey = resolver.survey_region(
        &SimbadClient::new(env),
        &observing_time,
        199u32,
        IdType::MajorBody,
        ReferenceFrame::Icrs,
        "1d0m0s",
    )?;
    println!(
        "\n{} objects within 1 deg of {} ({})",
        survey.matches.len(),
        survey.target,
        survey.coordinate_string
    );
    for object in survey.matches.iter().take(10) {
        println!(
            "{:<30} {:<8} {:>8.4} deg",
            object.main_id,
            object.object_type.as_deref().unwrap_or("-"),
            object.separation.unwrap_or(f64::NAN)
        );
    }
    Ok(())
}
