use chrono::{Datelike, NaiveDateTime, Timelike};
use hifitime::Epoch;
use itertools::Itertools;
use std::str::FromStr;

use crate::constants::JulianDate;
use crate::skyresolve_errors::SkyResolveError;

/// Parse an observation time written with an explicit strftime-style format, in UTC
///
/// Arguments
/// --------
/// * `input`: the calendar timestamp, e.g. `2021-Oct-18 09:30:00`
/// * `format`: the parse format, e.g. `%Y-%b-%d %H:%M:%S`
///
/// Return
/// ------
/// * the corresponding UTC epoch
pub fn parse_observation_time(input: &str, format: &str) -> Result<Epoch, SkyResolveError> {
    let invalid = |reason: String| SkyResolveError::InvalidObservationTime {
        input: input.into(),
        format: format.into(),
        reason,
    };

    let date = NaiveDateTime::parse_from_str(input.trim(), format)
        .map_err(|err| invalid(err.to_string()))?;

    let month = u8::try_from(date.month()).map_err(|err| invalid(err.to_string()))?;
    let day = u8::try_from(date.day()).map_err(|err| invalid(err.to_string()))?;
    let hour = u8::try_from(date.hour()).map_err(|err| invalid(err.to_string()))?;
    let minute = u8::try_from(date.minute()).map_err(|err| invalid(err.to_string()))?;
    // chrono encodes a leap second as nanosecond >= 1e9
    let second = u8::try_from(date.second()).map_err(|err| invalid(err.to_string()))?;
    let nanos = date.nanosecond().min(999_999_999);

    Ok(Epoch::from_gregorian_utc(
        date.year(),
        month,
        day,
        hour,
        minute,
        second,
        nanos,
    ))
}

/// Parse a timestamp in any format understood by hifitime (e.g. `2021-10-18T09:30:00 UTC`)
pub fn parse_iso_time(input: &str) -> Result<Epoch, SkyResolveError> {
    Epoch::from_str(input.trim()).map_err(|err| SkyResolveError::InvalidObservationTime {
        input: input.into(),
        format: "ISO 8601".into(),
        reason: err.to_string(),
    })
}

/// Julian date of an epoch on the UTC scale, as expected by the Horizons `TLIST` parameter
pub fn epoch_to_jd_utc(epoch: &Epoch) -> JulianDate {
    epoch.to_jde_utc_days()
}

/// Comma separated list of UTC julian dates
pub(crate) fn jd_tlist(epochs: &[Epoch]) -> String {
    epochs.iter().map(epoch_to_jd_utc).join(",")
}
