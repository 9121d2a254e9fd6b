// core/src/extract.rs
//
// Elementtre -> typet Workout. Strukturelle mangler (Activities, Lap, Time,
// Position) gir MalformedInput med posisjon; manglende tall blir NaN.

use log::debug;
use once_cell::sync::Lazy;

use crate::error::{ConvertError, Location, Result};
use crate::models::{Activity, Lap, Track, Trackpoint, Workout};
use crate::resolver::{parse_number, FieldResolver};
use crate::tcx::Element;

/// Kjente stavemåter for TPX-blokken og watt-feltet, i prioritert rekkefølge.
pub const TPX_SPELLINGS: [&str; 4] = ["TPX", "ns3:TPX", "ns2:TPX", "ns:TPX"];
pub const WATTS_SPELLINGS: [&str; 4] = ["Watts", "ns3:Watts", "ns2:Watts", "ns:Watts"];

pub static POWER: Lazy<FieldResolver> = Lazy::new(|| {
    FieldResolver::new("Watts")
        .or_spellings(&[&["Extensions"], &TPX_SPELLINGS, &WATTS_SPELLINGS])
        // siste utvei: hvilket som helst prefiks
        .or_local_path(&["Extensions", "TPX", "Watts"])
});

static HEART_RATE: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("HeartRateBpm", &["HeartRateBpm", "Value"]));
static LATITUDE: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("LatitudeDegrees", &["LatitudeDegrees"]));
static LONGITUDE: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("LongitudeDegrees", &["LongitudeDegrees"]));

static LAP_AVG_HR: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("AverageHeartRateBpm", &["AverageHeartRateBpm", "Value"]));
static LAP_MAX_HR: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("MaximumHeartRateBpm", &["MaximumHeartRateBpm", "Value"]));
static LAP_TIME: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("TotalTimeSeconds", &["TotalTimeSeconds"]));
static LAP_DISTANCE: Lazy<FieldResolver> =
    Lazy::new(|| FieldResolver::path("DistanceMeters", &["DistanceMeters"]));

/// Henter ut alle aktiviteter under `TrainingCenterDatabase/Activities`.
/// Kun første `Activities`-blokk leses.
pub fn extract_workout(root: &Element, default_sport: &str) -> Result<Workout> {
    if root.local_name() != "TrainingCenterDatabase" {
        return Err(ConvertError::missing("TrainingCenterDatabase", Location::document()));
    }
    let activities = root
        .child("Activities")
        .ok_or_else(|| ConvertError::missing("Activities", Location::document()))?;

    let activities = activities
        .children_named("Activity")
        .enumerate()
        .map(|(i, a)| extract_activity(a, i + 1, default_sport))
        .collect::<Result<Vec<_>>>()?;

    debug!("extracted {} activities", activities.len());
    Ok(Workout { activities })
}

fn extract_activity(el: &Element, index: usize, default_sport: &str) -> Result<Activity> {
    let at = Location::activity(index);

    let sport = el
        .attribute("Sport")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_sport)
        .to_string();

    let id = el
        .child("Id")
        .map(Element::text)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let laps = el
        .children_named("Lap")
        .enumerate()
        .map(|(i, lap)| extract_lap(lap, at.lap(i + 1)))
        .collect::<Result<Vec<_>>>()?;

    if laps.is_empty() {
        return Err(ConvertError::missing("Lap", at));
    }

    Ok(Activity { sport, id, laps })
}

fn extract_lap(el: &Element, at: Location) -> Result<Lap> {
    let mut tp_index = 0usize;
    let mut tracks = Vec::new();

    for track in el.children_named("Track") {
        let mut trackpoints = Vec::new();
        for tp in track.children_named("Trackpoint") {
            tp_index += 1;
            trackpoints.push(extract_trackpoint(tp, at.trackpoint(tp_index))?);
        }
        tracks.push(Track { trackpoints });
    }

    Ok(Lap {
        avg_hr: LAP_AVG_HR.resolve_f64(el),
        max_hr: LAP_MAX_HR.resolve_f64(el),
        total_time_s: LAP_TIME.resolve_f64(el),
        distance_m: LAP_DISTANCE.resolve_f64(el),
        tracks,
    })
}

fn extract_trackpoint(el: &Element, at: Location) -> Result<Trackpoint> {
    let time = el
        .child("Time")
        .map(Element::text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConvertError::missing("Time", at))?
        .to_string();

    let position = el
        .child("Position")
        .ok_or_else(|| ConvertError::missing("Position", at))?;
    let latitude = LATITUDE
        .resolve(position)
        .map(parse_number)
        .ok_or_else(|| ConvertError::missing("LatitudeDegrees", at))?;
    let longitude = LONGITUDE
        .resolve(position)
        .map(parse_number)
        .ok_or_else(|| ConvertError::missing("LongitudeDegrees", at))?;

    Ok(Trackpoint {
        time,
        latitude,
        longitude,
        heart_rate: HEART_RATE.resolve_f64(el),
        power: POWER.resolve_f64(el),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcx::parse_document;

    fn doc(activities: &str) -> Element {
        parse_document(&format!(
            "<TrainingCenterDatabase><Activities>{activities}</Activities></TrainingCenterDatabase>"
        ))
        .unwrap()
    }

    const TP: &str = "<Trackpoint><Time>2024-04-14T07:36:13Z</Time>\
        <Position><LatitudeDegrees>59.91</LatitudeDegrees><LongitudeDegrees>10.75</LongitudeDegrees></Position>\
        <HeartRateBpm><Value>131</Value></HeartRateBpm>\
        <Extensions><ns3:TPX><ns3:Watts>205</ns3:Watts></ns3:TPX></Extensions></Trackpoint>";

    fn lap(body: &str) -> String {
        format!(
            "<Lap><TotalTimeSeconds>600</TotalTimeSeconds><DistanceMeters>4000.5</DistanceMeters>\
             <AverageHeartRateBpm><Value>150</Value></AverageHeartRateBpm>\
             <MaximumHeartRateBpm><Value>171</Value></MaximumHeartRateBpm>{body}</Lap>"
        )
    }

    #[test]
    fn extracts_full_activity() {
        let xml = format!(
            "<Activity Sport=\"Biking\"><Id>2024-04-14T07:36:13.000Z</Id>{}</Activity>",
            lap(&format!("<Track>{TP}{TP}</Track>"))
        );
        let w = extract_workout(&doc(&xml), "Activity").unwrap();
        assert_eq!(w.activities.len(), 1);
        let a = &w.activities[0];
        assert_eq!(a.sport, "Biking");
        assert_eq!(a.id.as_deref(), Some("2024-04-14T07:36:13.000Z"));
        let l = &a.laps[0];
        assert_eq!((l.avg_hr, l.max_hr, l.total_time_s, l.distance_m), (150.0, 171.0, 600.0, 4000.5));
        let tps = a.trackpoints();
        assert_eq!(tps.len(), 2);
        assert_eq!(tps[0].latitude, 59.91);
        assert_eq!(tps[0].longitude, 10.75);
        assert_eq!(tps[0].heart_rate, 131.0);
        assert_eq!(tps[0].power, 205.0);
    }

    #[test]
    fn missing_sport_falls_back_to_default() {
        let w = extract_workout(&doc(&format!("<Activity>{}</Activity>", lap(""))), "Activity").unwrap();
        assert_eq!(w.activities[0].sport, "Activity");
        assert_eq!(w.activities[0].id, None);
    }

    #[test]
    fn empty_activities_block_is_not_an_error() {
        let w = extract_workout(&doc(""), "Activity").unwrap();
        assert!(w.activities.is_empty());
    }

    #[test]
    fn missing_activities_and_root_are_malformed() {
        let root = parse_document("<TrainingCenterDatabase/>").unwrap();
        let err = extract_workout(&root, "Activity").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput { missing: "Activities", .. }));

        let root = parse_document("<gpx/>").unwrap();
        let err = extract_workout(&root, "Activity").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput { missing: "TrainingCenterDatabase", .. }));
    }

    #[test]
    fn activity_without_laps_is_malformed() {
        let err = extract_workout(&doc("<Activity Sport=\"Running\"/>"), "Activity").unwrap_err();
        match err {
            ConvertError::MalformedInput { missing, at } => {
                assert_eq!(missing, "Lap");
                assert_eq!(at, Location::activity(1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_position_reports_trackpoint_location() {
        let bad = "<Trackpoint><Time>2024-04-14T07:36:14Z</Time></Trackpoint>";
        let xml = format!(
            "<Activity>{}</Activity><Activity>{}</Activity>",
            lap(""),
            lap(&format!("<Track>{TP}</Track><Track>{bad}</Track>"))
        );
        let err = extract_workout(&doc(&xml), "Activity").unwrap_err();
        match err {
            ConvertError::MalformedInput { missing, at } => {
                assert_eq!(missing, "Position");
                assert_eq!(at, Location::activity(2).lap(1).trackpoint(2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_numbers_become_nan() {
        let bare = "<Trackpoint><Time>t</Time><Position><LatitudeDegrees>1</LatitudeDegrees>\
                    <LongitudeDegrees>2</LongitudeDegrees></Position></Trackpoint>";
        let xml = format!("<Activity><Lap><Track>{bare}</Track></Lap></Activity>");
        let w = extract_workout(&doc(&xml), "Activity").unwrap();
        let l = &w.activities[0].laps[0];
        assert!(l.avg_hr.is_nan() && l.max_hr.is_nan());
        assert!(l.total_time_s.is_nan() && l.distance_m.is_nan());
        let tp = w.activities[0].trackpoints()[0];
        assert!(tp.heart_rate.is_nan());
        assert!(tp.power.is_nan());
    }

    #[test]
    fn power_spellings_are_all_recognised() {
        for (tpx, watts) in [("TPX", "Watts"), ("ns2:TPX", "ns2:Watts"), ("ns:TPX", "ns:Watts"), ("ax:TPX", "ax:Watts")] {
            let el = parse_document(&format!(
                "<Trackpoint><Extensions><{tpx}><{watts}>250</{watts}></{tpx}></Extensions></Trackpoint>"
            ))
            .unwrap();
            assert_eq!(POWER.resolve_f64(&el), 250.0, "{tpx}/{watts}");
        }
    }
}
