//! TcxGraph core: Garmin TCX-treningsfiler til typet RDF (Turtle / N-Triples).
//!
//! Flyt: [`tcx::parse_document`] -> [`extract::extract_workout`] ->
//! [`graph::GraphBuilder`] -> [`serializer::serialize`]. Hele kjeden kjøres av
//! [`convert::convert_with`].

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod graph;
pub mod metrics;
pub mod models;
pub mod resolver;
pub mod serializer;
pub mod tcx;
pub mod vocab;

#[cfg(feature = "python")]
mod py;

pub use config::{load_config, save_config, ConvertConfig, NumericPolicy, OutputFormat};
pub use convert::{convert_tcx_to_ttl, convert_with, Conversion, RunStats};
pub use error::{ConvertError, Location, Result};
pub use graph::{Graph, GraphBuilder};
pub use metrics::{Metrics, METRICS};
pub use models::{Activity, Lap, Track, Trackpoint, Workout};
