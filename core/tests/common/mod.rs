// tests/common/mod.rs
//
// Små TCX-byggere for integrasjonstestene.
#![allow(dead_code)]

use std::collections::BTreeSet;

pub struct Tp<'a> {
    pub time: &'a str,
    pub lat: f64,
    pub lon: f64,
    pub hr: Option<u32>,
    pub watts: Option<f64>,
}

pub fn tp(time: &str, hr: Option<u32>, watts: Option<f64>) -> Tp<'_> {
    Tp { time, lat: 59.91, lon: 10.75, hr, watts }
}

pub fn trackpoint_xml(p: &Tp) -> String {
    let hr = p
        .hr
        .map(|h| format!("<HeartRateBpm><Value>{h}</Value></HeartRateBpm>"))
        .unwrap_or_default();
    let watts = p
        .watts
        .map(|w| format!("<Extensions><ns3:TPX><ns3:Watts>{w}</ns3:Watts></ns3:TPX></Extensions>"))
        .unwrap_or_default();
    format!(
        "<Trackpoint><Time>{}</Time><Position><LatitudeDegrees>{}</LatitudeDegrees>\
         <LongitudeDegrees>{}</LongitudeDegrees></Position>{hr}{watts}</Trackpoint>",
        p.time, p.lat, p.lon
    )
}

pub fn lap_xml(avg_hr: f64, max_hr: f64, secs: f64, meters: f64, trackpoints: &[Tp]) -> String {
    let tps: String = trackpoints.iter().map(trackpoint_xml).collect();
    format!(
        "<Lap><TotalTimeSeconds>{secs}</TotalTimeSeconds><DistanceMeters>{meters}</DistanceMeters>\
         <AverageHeartRateBpm><Value>{avg_hr}</Value></AverageHeartRateBpm>\
         <MaximumHeartRateBpm><Value>{max_hr}</Value></MaximumHeartRateBpm>\
         <Track>{tps}</Track></Lap>"
    )
}

pub fn activity_xml(sport: &str, id: Option<&str>, laps: &[String]) -> String {
    let id = id.map(|i| format!("<Id>{i}</Id>")).unwrap_or_default();
    format!("<Activity Sport=\"{sport}\">{id}{}</Activity>", laps.concat())
}

pub fn tcx(activities: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <TrainingCenterDatabase xmlns=\"http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2\" \
         xmlns:ns3=\"http://www.garmin.com/xmlschemas/ActivityExtension/v2\">\
         <Activities>{}</Activities></TrainingCenterDatabase>",
        activities.concat()
    )
}

/// Én sykkeløkt, to lap-er, tre trackpoints med watt 100/150/200.
pub fn sample_ride() -> String {
    tcx(&[activity_xml(
        "Biking",
        Some("2024-04-14T07:36:13.000Z"),
        &[
            lap_xml(150.0, 165.0, 600.0, 4000.0, &[tp("2024-04-14T07:36:13Z", Some(148), Some(100.0))]),
            lap_xml(
                160.0,
                178.0,
                1200.0,
                8000.5,
                &[
                    tp("2024-04-14T07:46:13Z", Some(158), Some(150.0)),
                    tp("2024-04-14T07:56:13Z", Some(171), Some(200.0)),
                ],
            ),
        ],
    )])
}

/// Triplene som sortert mengde av N-Triples-linjer (grafene har ingen blanke noder).
pub fn triple_set(graph: &oxrdf::Graph) -> BTreeSet<String> {
    graph.iter().map(|t| t.to_string()).collect()
}

/// Parser Turtle med oxttl; panikk ved syntaksfeil.
pub fn parse_turtle(ttl: &str) -> oxrdf::Graph {
    let mut graph = oxrdf::Graph::new();
    for triple in oxttl::TurtleParser::new().for_slice(ttl.as_bytes()) {
        let triple = triple.unwrap_or_else(|e| panic!("invalid turtle: {e}\n{ttl}"));
        graph.insert(&triple);
    }
    graph
}

pub fn parse_ntriples(nt: &str) -> oxrdf::Graph {
    let mut graph = oxrdf::Graph::new();
    for triple in oxttl::NTriplesParser::new().for_slice(nt.as_bytes()) {
        let triple = triple.unwrap_or_else(|e| panic!("invalid n-triples: {e}\n{nt}"));
        graph.insert(&triple);
    }
    graph
}

pub fn fit(local: &str) -> String {
    format!("http://example.org/fitness#{local}")
}
