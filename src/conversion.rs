//! # Sexagesimal conversions
//!
//! Formatting of angles in degrees into the compact sexagesimal strings used by the
//! coordinate strings of the crate, and the inverse parsing.
//!
//! ## Formats
//!
//! - **Right ascension**: `<H>h<MM>m<SS[.s…]>s`, always positive, wrapped to `[0h, 24h)`.
//! - **Declination** and plain angles: `[-]<D>d<MM>m<SS[.s…]>s`, no sign when positive.
//!
//! Seconds are rounded to [`SECONDS_DECIMALS`] decimals, printed with the shortest decimal
//! representation of the rounded value, and zero-padded to two integer digits:
//!
//! ```text
//!  70.86811° → 4h43m28.3464s
//!  -8.10075° → -8d06m02.7s
//! ```
//!
//! A seconds field rounding to 60 carries into the minutes, and minutes into the leading unit.
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{Degree, DEG_PER_HOUR, SECONDS_DECIMALS, SEXAGESIMAL_BASE};
use crate::skyresolve_errors::SkyResolveError;

static HMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)h(\d+)m(\d+(?:\.\d*)?)s\s*$").expect("valid hms regex")
});

static DMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?)(\d+)d(\d+)m(\d+(?:\.\d*)?)s\s*$").expect("valid dms regex")
});

/// Base-60 decomposition of an angle
///
/// The leading unit is hours or degrees depending on what was fed to [`Sexagesimal::from_units`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub units: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Decompose a value expressed in units (hours or degrees) into units, minutes, seconds
    ///
    /// Arguments
    /// ---------
    /// * `value`: the angle in its leading unit, finite
    ///
    /// Return
    /// ------
    /// * the decomposition, with rounded seconds and carries applied
    pub fn from_units(value: f64) -> Self {
        debug_assert!(value.is_finite(), "cannot decompose {value}");
        let abs = value.abs();
        let mut units = abs.trunc();
        let minutes_f = (abs - units) * SEXAGESIMAL_BASE;
        let mut minutes = minutes_f.trunc();
        let mut seconds = round_seconds((minutes_f - minutes) * SEXAGESIMAL_BASE);

        if seconds >= SEXAGESIMAL_BASE {
            seconds -= SEXAGESIMAL_BASE;
            minutes += 1.0;
        }
        if minutes >= SEXAGESIMAL_BASE {
            minutes -= SEXAGESIMAL_BASE;
            units += 1.0;
        }

        // a value rounding to zero is printed without sign
        let is_zero = units == 0.0 && minutes == 0.0 && seconds == 0.0;

        Sexagesimal {
            negative: value < 0.0 && !is_zero,
            units: units as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    fn render(&self, unit_mark: char) -> String {
        let sign = if self.negative { "-" } else { "" };
        format!(
            "{sign}{}{unit_mark}{:02}m{}s",
            self.units,
            self.minutes,
            fmt_seconds(self.seconds)
        )
    }
}

fn round_seconds(seconds: f64) -> f64 {
    let scale = 10f64.powi(SECONDS_DECIMALS);
    (seconds * scale).round() / scale
}

/// Seconds with the shortest decimal representation and two integer digits (`02.7`, `45.18`)
fn fmt_seconds(seconds: f64) -> String {
    if seconds < 10.0 {
        format!("0{seconds}")
    } else {
        format!("{seconds}")
    }
}

/// Format a right ascension given in degrees as hours-minutes-seconds
///
/// Arguments
/// ---------
/// * `ra`: right ascension in degrees, wrapped to `[0, 360)`; must be finite
///
/// Return
/// ------
/// * a string like `4h43m28.3464s`
pub fn ra_deg_to_hms(ra: Degree) -> String {
    let hours = ra.rem_euclid(360.0) / DEG_PER_HOUR;
    let mut hms = Sexagesimal::from_units(hours);
    if hms.units >= 24 {
        hms.units -= 24;
    }
    hms.render('h')
}

/// Format a declination (or any angle) given in degrees as degrees-minutes-seconds
///
/// Arguments
/// ---------
/// * `dec`: declination in degrees, finite
///
/// Return
/// ------
/// * a string like `-8d06m02.7s`
pub fn dec_deg_to_dms(dec: Degree) -> String {
    Sexagesimal::from_units(dec).render('d')
}

fn parse_field<T: std::str::FromStr>(field: &str, input: &str) -> Result<T, SkyResolveError> {
    field
        .parse()
        .map_err(|_| SkyResolveError::InvalidSexagesimal(input.into()))
}

fn check_base60(minutes: f64, seconds: f64, input: &str) -> Result<(), SkyResolveError> {
    if minutes >= SEXAGESIMAL_BASE || seconds >= SEXAGESIMAL_BASE {
        return Err(SkyResolveError::InvalidSexagesimal(input.into()));
    }
    Ok(())
}

/// Parse an hours-minutes-seconds string (`4h43m28.3464s`) into degrees
pub fn parse_hms_to_deg(hms: &str) -> Result<Degree, SkyResolveError> {
    let caps = HMS_REGEX
        .captures(hms)
        .ok_or_else(|| SkyResolveError::InvalidSexagesimal(hms.into()))?;

    let h: f64 = parse_field(&caps[1], hms)?;
    let m: f64 = parse_field(&caps[2], hms)?;
    let s: f64 = parse_field(&caps[3], hms)?;
    check_base60(m, s, hms)?;

    Ok((h + m / 60.0 + s / 3600.0) * DEG_PER_HOUR)
}

/// Parse a degrees-minutes-seconds string (`-8d06m02.7s`) into degrees
pub fn parse_dms_to_deg(dms: &str) -> Result<Degree, SkyResolveError> {
    let caps = DMS_REGEX
        .captures(dms)
        .ok_or_else(|| SkyResolveError::InvalidSexagesimal(dms.into()))?;

    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let d: f64 = parse_field(&caps[2], dms)?;
    let m: f64 = parse_field(&caps[3], dms)?;
    let s: f64 = parse_field(&caps[4], dms)?;
    check_base60(m, s, dms)?;

    Ok(sign * (d + m / 60.0 + s / 3600.0))
}

/// Parse an angle written either in dms form (`1d0m0s`) or as decimal degrees (`1.5`)
pub fn parse_angle_to_deg(angle: &str) -> Result<Degree, SkyResolveError> {
    match angle.trim().parse::<f64>() {
        Ok(deg) if deg.is_finite() => Ok(deg),
        Ok(_) => Err(SkyResolveError::InvalidSexagesimal(angle.into())),
        Err(_) => parse_dms_to_deg(angle),
    }
}
