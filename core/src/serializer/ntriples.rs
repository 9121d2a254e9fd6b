//! N-Triples-serialisering via `oxrdf` sin termvisning.

use crate::graph::Graph;

#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 96);
    for t in graph.iter() {
        out.push_str(&format!("{} .\n", t.to_oxrdf()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericPolicy;
    use crate::graph::{EntityId, GraphBuilder};
    use crate::vocab::FitProperty;

    #[test]
    fn one_line_per_triple_with_full_iris() {
        let mut b = GraphBuilder::new("athlete1", "device1", NumericPolicy::Emit).unwrap();
        let sd = b.new_sensor_data();
        b.add_measure(sd.iri(), FitProperty::HeartRate, 140.0);
        let text = to_ntriples(&b.finish());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "<http://example.org/fitness#athlete1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://xmlns.com/foaf/0.1/Person> ."
        );
        assert_eq!(
            lines[3],
            "<http://example.org/fitness#sd1> <http://example.org/fitness#heartRate> \"140\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
        );
    }
}
