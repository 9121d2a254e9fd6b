// core/src/convert.rs
//
// Én konvertering ende-til-ende: XML -> Workout -> graf -> tekst.
// All kjøringstilstand ligger i GraphBuilder som lages her og slippes når
// kjøringen er ferdig; to samtidige kjøringer deler ingenting (utenom
// tellerne i Metrics).

use std::collections::BTreeMap;

use chrono::DateTime;
use log::{debug, info, warn};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};

use crate::aggregate::{average_heart_rate, max_heart_rate, mean_power, total_distance, total_duration};
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::extract::extract_workout;
use crate::graph::{typed_literal, EntityId, Graph, GraphBuilder};
use crate::metrics::{Metrics, METRICS};
use crate::models::{Activity, Trackpoint, Workout};
use crate::serializer::serialize;
use crate::tcx::parse_document;
use crate::vocab::{FitProperty, DC_CREATED, DC_TITLE};

/// Sammendrag av én kjøring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub activities: u32,
    pub trackpoints: u32,
    pub triples: usize,
    /// Ikke-endelige tallverdier per predikat (lokalnavn).
    pub degenerate: BTreeMap<&'static str, u64>,
    /// Tidsstempler som ikke er RFC 3339 (skrevet ut uendret).
    pub invalid_timestamps: u32,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub graph: Graph,
    pub text: String,
    pub stats: RunStats,
}

/// TCX-tekst -> Turtle med standardkonfig. Oppdaterer prosessens tellere.
pub fn convert_tcx_to_ttl(tcx: &str) -> Result<String> {
    convert_with(tcx, &ConvertConfig::default(), &METRICS).map(|c| c.text)
}

/// Full kjøring med eksplisitt konfig og tellere.
/// Feiler kjøringen, finnes ingen delvis utdata.
pub fn convert_with(tcx: &str, config: &ConvertConfig, metrics: &Metrics) -> Result<Conversion> {
    match run(tcx, config) {
        Ok(conversion) => {
            let stats = &conversion.stats;
            metrics.conversions_total.inc();
            metrics.activities_total.inc_by(u64::from(stats.activities));
            metrics.trackpoints_total.inc_by(u64::from(stats.trackpoints));
            for (predicate, n) in &stats.degenerate {
                metrics
                    .degenerate_values_total
                    .with_label_values(&[*predicate])
                    .inc_by(*n);
            }
            Ok(conversion)
        }
        Err(e) => {
            metrics.conversion_failures_total.inc();
            warn!("conversion failed: {e}");
            Err(e)
        }
    }
}

fn run(tcx: &str, config: &ConvertConfig) -> Result<Conversion> {
    debug!("parsing xml ({} bytes)", tcx.len());
    let root = parse_document(tcx)?;
    let workout = extract_workout(&root, &config.default_sport)?;

    let mut invalid_timestamps = 0u32;
    let builder = build_graph(&workout, config, &mut invalid_timestamps)?;

    let stats = RunStats {
        activities: builder.activity_count(),
        trackpoints: builder.trackpoint_count(),
        triples: builder.graph().len(),
        degenerate: builder.degenerate().clone(),
        invalid_timestamps,
    };
    let graph = builder.finish();

    debug!("serializing {} triples as {:?}", graph.len(), config.format);
    let text = serialize(&graph, config.format);

    info!(
        "converted {} activities / {} trackpoints into {} triples",
        stats.activities, stats.trackpoints, stats.triples
    );
    Ok(Conversion { graph, text, stats })
}

/// Bygger grafen for et ferdig hentet Workout i en ny kjøring.
pub fn build_graph(
    workout: &Workout,
    config: &ConvertConfig,
    invalid_timestamps: &mut u32,
) -> Result<GraphBuilder> {
    let mut builder = GraphBuilder::new(&config.athlete, &config.device, config.degenerate_numbers)?;
    for activity in &workout.activities {
        handle_activity(&mut builder, activity, invalid_timestamps)?;
    }
    Ok(builder)
}

fn handle_activity(
    builder: &mut GraphBuilder,
    activity: &Activity,
    invalid_timestamps: &mut u32,
) -> Result<()> {
    let ac = builder.new_activity(&activity.sport)?.iri();
    debug!("activity {} ({})", ac.as_str(), activity.sport);

    let person = builder.person().clone();
    builder.link(ac.clone(), FitProperty::PerformedBy, person);

    builder.add_triple(
        ac.clone(),
        DC_TITLE.into_owned(),
        Literal::new_simple_literal(activity.title()),
    );
    if let Some(id) = &activity.id {
        check_timestamp(id, invalid_timestamps);
        builder.add_triple(ac.clone(), DC_CREATED.into_owned(), typed_literal(id.as_str(), xsd::DATE_TIME));
    }

    let laps = &activity.laps;
    builder.add_measure(ac.clone(), FitProperty::AverageHeartRate, average_heart_rate(laps));
    builder.add_measure(ac.clone(), FitProperty::MaxHeartRate, max_heart_rate(laps));
    builder.add_lexical(ac.clone(), FitProperty::Duration, &total_duration(laps));
    builder.add_measure(ac.clone(), FitProperty::TotalDistance, total_distance(laps));

    let trackpoints = activity.trackpoints();
    match mean_power(&trackpoints) {
        Some(power) => {
            builder.add_measure(ac.clone(), FitProperty::TotalPowerOutput, power);
        }
        None => debug!("{}: under two trackpoints, no totalPowerOutput", ac.as_str()),
    }

    for tp in trackpoints {
        handle_trackpoint(builder, &ac, tp, invalid_timestamps);
    }
    Ok(())
}

fn handle_trackpoint(
    builder: &mut GraphBuilder,
    activity: &NamedNode,
    tp: &Trackpoint,
    invalid_timestamps: &mut u32,
) {
    let node = builder.new_trackpoint().iri();
    builder.link(activity.clone(), FitProperty::HasTrackpoint, node.clone());

    // én SensorData per trackpoint
    let sd = builder.new_sensor_data().iri();
    builder.link(node.clone(), FitProperty::HasSensorData, sd.clone());
    builder.add_measure(sd.clone(), FitProperty::Latitude, tp.latitude);
    builder.add_measure(sd.clone(), FitProperty::Longitude, tp.longitude);
    builder.add_measure(sd.clone(), FitProperty::HeartRate, tp.heart_rate);
    builder.add_measure(sd, FitProperty::PowerOutput, tp.power);

    let device = builder.device().clone();
    builder.link(node.clone(), FitProperty::RecordedBy, device);

    check_timestamp(&tp.time, invalid_timestamps);
    builder.add_lexical(node, FitProperty::Timestamp, &tp.time);
}

/// Tidsstempler skrives uendret; ugyldige logges og telles.
fn check_timestamp(value: &str, invalid: &mut u32) {
    if DateTime::parse_from_rfc3339(value).is_err() {
        *invalid += 1;
        warn!("timestamp {value:?} is not RFC 3339, emitted as-is");
    }
}
