//! Serialisering av fitness-grafen.
//!
//! - **Turtle** ([`turtle`]): standard, med prefiks og `a` for rdf:type
//! - **N-Triples** ([`ntriples`]): én triple per linje, absolutte IRI-er

pub mod ntriples;
pub mod turtle;

use crate::config::OutputFormat;
use crate::graph::Graph;

pub use ntriples::to_ntriples;
pub use turtle::{ensure_prefixes, to_turtle};

/// Serialiserer i valgt format. For Turtle kjøres prefiks-garantien til slutt.
pub fn serialize(graph: &Graph, format: OutputFormat) -> String {
    match format {
        OutputFormat::Turtle => ensure_prefixes(&to_turtle(graph)),
        OutputFormat::NTriples => to_ntriples(graph),
    }
}
