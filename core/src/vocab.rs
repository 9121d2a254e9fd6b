//! Navnerom og predikater for fitness-grafen.
//!
//! Datatypetabellen (`FitProperty::datatype`) er den faste kontrakten
//! konsumentene leser literalene etter.

use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const FIT: &str = "http://example.org/fitness#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const DC: &str = "http://purl.org/dc/terms/";

/// Prefiksene som alltid skal stå i Turtle-utdata, i utskriftsrekkefølge.
pub const PREFIXES: [(&str, &str); 5] = [
    ("rdf", RDF),
    ("fit", FIT),
    ("foaf", FOAF),
    ("xsd", XSD),
    ("dc", DC),
];

pub const FOAF_PERSON: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Person");
pub const FIT_DEVICE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://example.org/fitness#Device");
pub const FIT_TRACKPOINT: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://example.org/fitness#Trackpoint");
pub const FIT_SENSOR_DATA: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://example.org/fitness#SensorData");

pub const DC_TITLE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
pub const DC_CREATED: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");

/// Egenskaper i `fit:`-vokabularet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitProperty {
    PerformedBy,
    HasTrackpoint,
    HasSensorData,
    RecordedBy,
    Timestamp,
    Latitude,
    Longitude,
    HeartRate,
    PowerOutput,
    AverageHeartRate,
    MaxHeartRate,
    Duration,
    TotalDistance,
    TotalPowerOutput,
}

impl FitProperty {
    pub fn local_name(self) -> &'static str {
        match self {
            FitProperty::PerformedBy => "performedBy",
            FitProperty::HasTrackpoint => "hasTrackpoint",
            FitProperty::HasSensorData => "hasSensorData",
            FitProperty::RecordedBy => "recordedBy",
            FitProperty::Timestamp => "timestamp",
            FitProperty::Latitude => "latitude",
            FitProperty::Longitude => "longitude",
            FitProperty::HeartRate => "heartRate",
            FitProperty::PowerOutput => "powerOutput",
            FitProperty::AverageHeartRate => "averageHeartRate",
            FitProperty::MaxHeartRate => "maxHeartRate",
            FitProperty::Duration => "duration",
            FitProperty::TotalDistance => "totalDistance",
            FitProperty::TotalPowerOutput => "totalPowerOutput",
        }
    }

    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            FitProperty::PerformedBy => NamedNodeRef::new_unchecked("http://example.org/fitness#performedBy"),
            FitProperty::HasTrackpoint => NamedNodeRef::new_unchecked("http://example.org/fitness#hasTrackpoint"),
            FitProperty::HasSensorData => NamedNodeRef::new_unchecked("http://example.org/fitness#hasSensorData"),
            FitProperty::RecordedBy => NamedNodeRef::new_unchecked("http://example.org/fitness#recordedBy"),
            FitProperty::Timestamp => NamedNodeRef::new_unchecked("http://example.org/fitness#timestamp"),
            FitProperty::Latitude => NamedNodeRef::new_unchecked("http://example.org/fitness#latitude"),
            FitProperty::Longitude => NamedNodeRef::new_unchecked("http://example.org/fitness#longitude"),
            FitProperty::HeartRate => NamedNodeRef::new_unchecked("http://example.org/fitness#heartRate"),
            FitProperty::PowerOutput => NamedNodeRef::new_unchecked("http://example.org/fitness#powerOutput"),
            FitProperty::AverageHeartRate => NamedNodeRef::new_unchecked("http://example.org/fitness#averageHeartRate"),
            FitProperty::MaxHeartRate => NamedNodeRef::new_unchecked("http://example.org/fitness#maxHeartRate"),
            FitProperty::Duration => NamedNodeRef::new_unchecked("http://example.org/fitness#duration"),
            FitProperty::TotalDistance => NamedNodeRef::new_unchecked("http://example.org/fitness#totalDistance"),
            FitProperty::TotalPowerOutput => NamedNodeRef::new_unchecked("http://example.org/fitness#totalPowerOutput"),
        }
    }

    /// Fast predikat -> datatype-tabell. `None` for objektegenskaper.
    pub fn datatype(self) -> Option<NamedNodeRef<'static>> {
        match self {
            FitProperty::HeartRate | FitProperty::MaxHeartRate => Some(xsd::INTEGER),
            FitProperty::Latitude | FitProperty::Longitude | FitProperty::AverageHeartRate => {
                Some(xsd::DECIMAL)
            }
            FitProperty::PowerOutput | FitProperty::TotalDistance | FitProperty::TotalPowerOutput => {
                Some(xsd::FLOAT)
            }
            FitProperty::Duration => Some(xsd::DURATION),
            FitProperty::Timestamp => Some(xsd::DATE_TIME),
            FitProperty::PerformedBy
            | FitProperty::HasTrackpoint
            | FitProperty::HasSensorData
            | FitProperty::RecordedBy => None,
        }
    }
}

/// IRI i `fit:`-navnerommet, f.eks. `fit:ac1` eller `fit:Biking`.
pub fn fit_iri(local: &str) -> String {
    format!("{FIT}{local}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FitProperty; 14] = [
        FitProperty::PerformedBy,
        FitProperty::HasTrackpoint,
        FitProperty::HasSensorData,
        FitProperty::RecordedBy,
        FitProperty::Timestamp,
        FitProperty::Latitude,
        FitProperty::Longitude,
        FitProperty::HeartRate,
        FitProperty::PowerOutput,
        FitProperty::AverageHeartRate,
        FitProperty::MaxHeartRate,
        FitProperty::Duration,
        FitProperty::TotalDistance,
        FitProperty::TotalPowerOutput,
    ];

    #[test]
    fn iri_matches_local_name() {
        for p in ALL {
            assert_eq!(p.iri().as_str(), fit_iri(p.local_name()));
        }
    }

    #[test]
    fn datatype_table() {
        assert_eq!(FitProperty::HeartRate.datatype(), Some(xsd::INTEGER));
        assert_eq!(FitProperty::Latitude.datatype(), Some(xsd::DECIMAL));
        assert_eq!(FitProperty::Longitude.datatype(), Some(xsd::DECIMAL));
        assert_eq!(FitProperty::AverageHeartRate.datatype(), Some(xsd::DECIMAL));
        assert_eq!(FitProperty::MaxHeartRate.datatype(), Some(xsd::INTEGER));
        assert_eq!(FitProperty::TotalPowerOutput.datatype(), Some(xsd::FLOAT));
        assert_eq!(FitProperty::Duration.datatype(), Some(xsd::DURATION));
        assert_eq!(FitProperty::Timestamp.datatype(), Some(xsd::DATE_TIME));
        assert_eq!(FitProperty::RecordedBy.datatype(), None);
    }
}
