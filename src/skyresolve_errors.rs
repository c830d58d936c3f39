use thiserror::Error;

use crate::jpl_request::ObjectId;

#[derive(Error, Debug)]
pub enum SkyResolveError {
    #[error("Unable to parse observation time {input:?} with format {format:?}: {reason}")]
    InvalidObservationTime {
        input: String,
        format: String,
        reason: String,
    },

    #[error("No value found for object id: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Ambiguous target name for object id {id}: {details}")]
    AmbiguousTarget { id: ObjectId, details: String },

    #[error("No ephemeris available for object id {0} at the requested epoch")]
    NoEphemerisAtEpoch(ObjectId),

    #[error("Malformed ephemeris response: {0}")]
    MalformedEphemeris(String),

    #[error("Malformed catalog response: {0}")]
    MalformedCatalog(String),

    #[error("Invalid sexagesimal angle: {0}")]
    InvalidSexagesimal(String),

    #[error("An ephemeris request needs at least one epoch")]
    EmptyEpochList,

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}

impl SkyResolveError {
    /// `true` for the errors meaning the provider has no usable record for the requested
    /// identifier. The batch resolver isolates these; every other error aborts the batch.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            SkyResolveError::ObjectNotFound(_)
                | SkyResolveError::AmbiguousTarget { .. }
                | SkyResolveError::NoEphemerisAtEpoch(_)
        )
    }

    /// The object identifier named by the error, if any.
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            SkyResolveError::ObjectNotFound(id)
            | SkyResolveError::AmbiguousTarget { id, .. }
            | SkyResolveError::NoEphemerisAtEpoch(id) => Some(id),
            _ => None,
        }
    }
}

impl PartialEq for SkyResolveError {
    fn eq(&self, other: &Self) -> bool {
        use SkyResolveError::*;
        match (self, other) {
            (
                InvalidObservationTime {
                    input: a,
                    format: fa,
                    ..
                },
                InvalidObservationTime {
                    input: b,
                    format: fb,
                    ..
                },
            ) => a == b && fa == fb,
            (ObjectNotFound(a), ObjectNotFound(b)) => a == b,
            (AmbiguousTarget { id: a, .. }, AmbiguousTarget { id: b, .. }) => a == b,
            (NoEphemerisAtEpoch(a), NoEphemerisAtEpoch(b)) => a == b,
            (MalformedEphemeris(a), MalformedEphemeris(b)) => a == b,
            (MalformedCatalog(a), MalformedCatalog(b)) => a == b,
            (InvalidSexagesimal(a), InvalidSexagesimal(b)) => a == b,

            // transport errors are not comparable: same variant is enough
            (UreqHttpError(_), UreqHttpError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (EmptyEpochList, EmptyEpochList) => true,

            _ => false,
        }
    }
}
