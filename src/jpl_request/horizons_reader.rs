use std::sync::LazyLock;

use csv::StringRecord;
use regex::Regex;

use super::{Ephemeris, EphemerisRow, ObjectId};
use crate::skyresolve_errors::SkyResolveError;

// header line, asterisk separator, then the table between the $$SOE / $$EOE markers
static TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([^\n]*)\n\*+\n\$\$SOE\n((?s:.*?))\$\$EOE").expect("valid table regex")
});

static TARGET_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Target body name:\s*([^{\n]+)").expect("valid target name regex")
});

const NOT_FOUND_MARKERS: [&str; 3] = ["No matches found", "Unknown target", "No such record"];
const AMBIGUOUS_MARKERS: [&str; 2] = ["Multiple major-bodies match string", "Matching small-bodies"];
const NO_EPHEMERIS_MARKER: &str = "No ephemeris for target";

/// Longest excerpt of the provider message kept in an ambiguity error
const DETAILS_MAX_CHARS: usize = 400;

/// Classify a Horizons answer carrying no ephemeris table
///
/// Return
/// ------
/// * the lookup error matching the provider message, `None` if the message is not a known
///   lookup failure
fn lookup_failure(response: &str, target: &ObjectId) -> Option<SkyResolveError> {
    if NOT_FOUND_MARKERS.iter().any(|m| response.contains(m)) {
        return Some(SkyResolveError::ObjectNotFound(target.clone()));
    }

    if let Some(pos) = AMBIGUOUS_MARKERS
        .iter()
        .find_map(|marker| response.find(marker))
    {
        let details = response[pos..]
            .chars()
            .take(DETAILS_MAX_CHARS)
            .collect::<String>()
            .trim()
            .to_string();
        return Some(SkyResolveError::AmbiguousTarget {
            id: target.clone(),
            details,
        });
    }

    if response.contains(NO_EPHEMERIS_MARKER) {
        return Some(SkyResolveError::NoEphemerisAtEpoch(target.clone()));
    }
    None
}

fn column_index(headers: &StringRecord, prefix: &str) -> Result<usize, SkyResolveError> {
    headers
        .iter()
        .position(|name| name.starts_with(prefix))
        .ok_or_else(|| {
            SkyResolveError::MalformedEphemeris(format!(
                "missing column {prefix:?} in header {:?}",
                headers.iter().collect::<Vec<_>>()
            ))
        })
}

fn parse_degree(record: &StringRecord, idx: usize, column: &str) -> Result<f64, SkyResolveError> {
    let field = record.get(idx).unwrap_or_default();
    let invalid = || SkyResolveError::MalformedEphemeris(format!("invalid {column} value {field:?}"));
    // f64::from_str also accepts "NaN" and "inf"
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    }
}

/// Parse the plain text answer of the Horizons API into an [`Ephemeris`]
///
/// The observer table must have been requested with `CSV_FORMAT='YES'` and `ANG_FORMAT='DEG'`.
/// The CSV header is the line right above the asterisk separator preceding `$$SOE`;
/// right ascension and declination are located by their `R.A.` and `DEC` column prefixes.
///
/// Arguments
/// ---------
/// * `response`: the raw answer of the API
/// * `target`: the requested identifier, used to build lookup errors
///
/// Return
/// ------
/// * The ephemeris table, a lookup error when Horizons has no record for `target`,
///   or [`SkyResolveError::MalformedEphemeris`] when the table cannot be read
pub fn read_horizons_response(
    response: &str,
    target: &ObjectId,
) -> Result<Ephemeris, SkyResolveError> {
    let response = response.replace("\r\n", "\n");

    if !response.contains("$$SOE") {
        if let Some(err) = lookup_failure(&response, target) {
            return Err(err);
        }
    }

    let caps = TABLE_REGEX.captures(&response).ok_or_else(|| {
        SkyResolveError::MalformedEphemeris(format!(
            "no $$SOE/$$EOE table in the answer for object id {target}"
        ))
    })?;

    // reconstruct a csv string with the header above the data
    let data = format!("{}\n{}", caps[1].trim(), &caps[2]);

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let ra_idx = column_index(&headers, "R.A.")?;
    let dec_idx = column_index(&headers, "DEC")?;
    let date_idx = headers.iter().position(|name| name.starts_with("Date"));

    let rows = csv_reader
        .records()
        .map(|record| -> Result<EphemerisRow, SkyResolveError> {
            let record = record?;
            Ok(EphemerisRow {
                date: date_idx
                    .and_then(|idx| record.get(idx))
                    .unwrap_or_default()
                    .to_string(),
                ra: parse_degree(&record, ra_idx, "R.A.")?,
                dec: parse_degree(&record, dec_idx, "DEC")?,
            })
        })
        .collect::<Result<Vec<EphemerisRow>, SkyResolveError>>()?;

    if rows.is_empty() {
        return Err(SkyResolveError::MalformedEphemeris(format!(
            "empty ephemeris table for object id {target}"
        )));
    }

    let target_name = TARGET_NAME_REGEX
        .captures(&response)
        .map(|caps| caps[1].trim().to_string());

    Ok(Ephemeris { target_name, rows })
}

#[cfg(test)]
mod horizons_reader_test {
    use super::*;

    const CERES_RESPONSE: &str = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
JPL/HORIZONS                      1 Ceres (A801 AA)          2021-Oct-19 10:02:11
Rec #:       1 (+COV) Soln.date: 2021-Apr-13_11:04:44   # obs: 1002 (1995-2021)
*******************************************************************************
Target body name: 1 Ceres (A801 AA)               {source: JPL#48}
Center body name: Earth (399)                     {source: DE441}
Center-site name: GEOCENTRIC
*******************************************************************************
 Date__(UT)__HR:MN, , , R.A.___(ICRF), DEC____(ICRF),
*******************************************************************************
$$SOE
 2021-Oct-18 09:30, , ,  70.86811,  16.21255,
 2021-Oct-19 09:30, , ,  70.78015,  16.20467,
$$EOE
*******************************************************************************
Column meaning:
";

    #[test]
    fn test_read_horizons_response() {
        let ephem = read_horizons_response(CERES_RESPONSE, &"ceres".into()).unwrap();
        assert_eq!(ephem.target_name.as_deref(), Some("1 Ceres (A801 AA)"));
        assert_eq!(
            ephem.rows,
            vec![
                EphemerisRow {
                    date: "2021-Oct-18 09:30".into(),
                    ra: 70.86811,
                    dec: 16.21255
                },
                EphemerisRow {
                    date: "2021-Oct-19 09:30".into(),
                    ra: 70.78015,
                    dec: 16.20467
                }
            ]
        );
    }

    #[test]
    fn test_read_crlf_response() {
        let crlf = CERES_RESPONSE.replace('\n', "\r\n");
        let ephem = read_horizons_response(&crlf, &"ceres".into()).unwrap();
        assert_eq!(ephem.first_position().unwrap(), (70.86811, 16.21255));
    }

    #[test]
    fn test_not_found() {
        let response = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
Horizons> foobarbaz
>>> Small-body Index Search Results <<<
  No matches found.
*******************************************************************************
";
        assert_eq!(
            read_horizons_response(response, &"foobarbaz".into()),
            Err(SkyResolveError::ObjectNotFound("foobarbaz".into()))
        );
    }

    #[test]
    fn test_ambiguous_target() {
        let response = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
 Multiple major-bodies match string \"MARS*\"

  ID#      Name                               Designation  IAU/aliases/other
  -------  ---------------------------------- -----------  -------------------
        4  Mars Barycenter
      499  Mars                                            Geocentric
";
        let err = read_horizons_response(response, &"mars".into()).unwrap_err();
        match err {
            SkyResolveError::AmbiguousTarget { id, details } => {
                assert_eq!(id, ObjectId::from("mars"));
                assert!(details.starts_with("Multiple major-bodies match string"));
                assert!(details.contains("499"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_no_ephemeris_at_epoch() {
        let response = "No ephemeris for target \"Halley\" prior to A.D. 1600-JAN-01";
        assert_eq!(
            read_horizons_response(response, &"1P".into()),
            Err(SkyResolveError::NoEphemerisAtEpoch("1P".into()))
        );
    }

    #[test]
    fn test_malformed_responses() {
        let no_table = "Cannot interpret date. Type \"?!\" or try YYYY-MMM-DD format.";
        assert!(matches!(
            read_horizons_response(no_table, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(_))
        ));

        let no_dec = CERES_RESPONSE.replace("DEC____(ICRF)", "Elong");
        assert!(matches!(
            read_horizons_response(&no_dec, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(msg)) if msg.contains("DEC")
        ));

        let bad_value = CERES_RESPONSE.replace("70.86811", "n.a.");
        assert_eq!(
            read_horizons_response(&bad_value, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(
                "invalid R.A. value \"n.a.\"".into()
            ))
        );

        let not_a_number = CERES_RESPONSE.replace("70.86811", "NaN");
        assert_eq!(
            read_horizons_response(&not_a_number, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(
                "invalid R.A. value \"NaN\"".into()
            ))
        );

        let infinite = CERES_RESPONSE.replace("16.21255", "inf");
        assert_eq!(
            read_horizons_response(&infinite, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(
                "invalid DEC value \"inf\"".into()
            ))
        );

        let empty = "Target body name: Ceres\n Date__(UT)__HR:MN, , , R.A.___(ICRF), DEC____(ICRF),\n****\n$$SOE\n$$EOE\n";
        assert!(matches!(
            read_horizons_response(empty, &"ceres".into()),
            Err(SkyResolveError::MalformedEphemeris(msg)) if msg.contains("empty")
        ));
    }
}
