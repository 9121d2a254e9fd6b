// core/src/graph.rs
//
// Kjøringslokal graf + entitetsallokering. All tilstand (tellere og tripler)
// eies av GraphBuilder; en ny konvertering lager en ny builder.

use std::collections::BTreeMap;

use log::warn;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, NamedNode, NamedNodeRef};

use crate::config::NumericPolicy;
use crate::error::{ConvertError, Result};
use crate::vocab::{self, FitProperty};

/// Objekt i en triple: ressurs eller typet literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Node(NamedNode),
    Literal(Literal),
}

impl From<NamedNode> for Object {
    fn from(n: NamedNode) -> Self {
        Object::Node(n)
    }
}

impl From<NamedNodeRef<'_>> for Object {
    fn from(n: NamedNodeRef<'_>) -> Self {
        Object::Node(n.into_owned())
    }
}

impl From<Literal> for Object {
    fn from(l: Literal) -> Self {
        Object::Literal(l)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: NamedNode,
    pub predicate: NamedNode,
    pub object: Object,
}

impl Triple {
    pub fn to_oxrdf(&self) -> oxrdf::Triple {
        match &self.object {
            Object::Node(n) => oxrdf::Triple::new(self.subject.clone(), self.predicate.clone(), n.clone()),
            Object::Literal(l) => oxrdf::Triple::new(self.subject.clone(), self.predicate.clone(), l.clone()),
        }
    }
}

/// Tripler i innsettingsrekkefølge. Ingenting fjernes eller overskrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Alle objekter for (subjekt, predikat), i innsettingsrekkefølge.
    pub fn objects<'a>(
        &'a self,
        subject: NamedNodeRef<'a>,
        predicate: NamedNodeRef<'a>,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject.as_ref() == subject && t.predicate.as_ref() == predicate)
            .map(|t| &t.object)
    }

    /// Subjekter med gitt rdf:type, i innsettingsrekkefølge.
    pub fn subjects_of_type<'a>(&'a self, class: NamedNodeRef<'a>) -> impl Iterator<Item = &'a NamedNode> + 'a {
        self.triples
            .iter()
            .filter(move |t| {
                t.predicate.as_ref() == rdf::TYPE
                    && matches!(&t.object, Object::Node(n) if n.as_ref() == class)
            })
            .map(|t| &t.subject)
    }

    /// Mengdegraf (uten rekkefølge), for sammenligning av to kjøringer.
    pub fn to_oxrdf_graph(&self) -> oxrdf::Graph {
        let mut g = oxrdf::Graph::new();
        for t in &self.triples {
            g.insert(&t.to_oxrdf());
        }
        g
    }

    fn push(&mut self, triple: Triple) {
        self.triples.push(triple);
    }
}

/// Entitets-id med løpenummer innen én kjøring.
pub trait EntityId: Copy {
    const PREFIX: &'static str;

    fn number(self) -> u32;

    fn local_name(self) -> String {
        format!("{}{}", Self::PREFIX, self.number())
    }

    fn iri(self) -> NamedNode {
        NamedNode::new_unchecked(vocab::fit_iri(&self.local_name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackpointId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorDataId(pub u32);

impl EntityId for ActivityId {
    const PREFIX: &'static str = "ac";
    fn number(self) -> u32 {
        self.0
    }
}

impl EntityId for TrackpointId {
    const PREFIX: &'static str = "tp";
    fn number(self) -> u32 {
        self.0
    }
}

impl EntityId for SensorDataId {
    const PREFIX: &'static str = "sd";
    fn number(self) -> u32 {
        self.0
    }
}

/// Leksikalsk form for et tall med gitt datatype.
///
/// Heltall uten desimaler skrives uten ".0"; NaN/uendelig bruker XSD-formene
/// ("NaN", "INF", "-INF").
pub fn lexical_number(value: f64, datatype: NamedNodeRef<'_>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }
    if datatype == xsd::INTEGER && value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

pub fn typed_literal(lexical: impl Into<String>, datatype: NamedNodeRef<'_>) -> Literal {
    Literal::new_typed_literal(lexical, datatype.into_owned())
}

/// Bygger grafen for én konverteringskjøring.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
    next_activity: u32,
    next_trackpoint: u32,
    next_sensor_data: u32,
    person: NamedNode,
    device: NamedNode,
    policy: NumericPolicy,
    degenerate: BTreeMap<&'static str, u64>,
}

impl GraphBuilder {
    /// Ny kjøring: tellere starter på 1, person og enhet typedeklareres.
    pub fn new(person: &str, device: &str, policy: NumericPolicy) -> Result<Self> {
        let person = fit_node(person)?;
        let device = fit_node(device)?;

        let mut builder = Self {
            graph: Graph::default(),
            next_activity: 1,
            next_trackpoint: 1,
            next_sensor_data: 1,
            person,
            device,
            policy,
            degenerate: BTreeMap::new(),
        };
        let (p, d) = (builder.person.clone(), builder.device.clone());
        builder.add_triple(p, rdf::TYPE.into_owned(), vocab::FOAF_PERSON);
        builder.add_triple(d, rdf::TYPE.into_owned(), vocab::FIT_DEVICE);
        Ok(builder)
    }

    pub fn person(&self) -> &NamedNode {
        &self.person
    }

    pub fn device(&self) -> &NamedNode {
        &self.device
    }

    /// `fit:acN a fit:<kind>`.
    pub fn new_activity(&mut self, kind: &str) -> Result<ActivityId> {
        let class = fit_node(kind)?;
        let id = ActivityId(self.next_activity);
        self.next_activity += 1;
        self.add_triple(id.iri(), rdf::TYPE.into_owned(), class);
        Ok(id)
    }

    pub fn new_trackpoint(&mut self) -> TrackpointId {
        let id = TrackpointId(self.next_trackpoint);
        self.next_trackpoint += 1;
        self.add_triple(id.iri(), rdf::TYPE.into_owned(), vocab::FIT_TRACKPOINT);
        id
    }

    pub fn new_sensor_data(&mut self) -> SensorDataId {
        let id = SensorDataId(self.next_sensor_data);
        self.next_sensor_data += 1;
        self.add_triple(id.iri(), rdf::TYPE.into_owned(), vocab::FIT_SENSOR_DATA);
        id
    }

    pub fn add_triple(&mut self, subject: NamedNode, predicate: NamedNode, object: impl Into<Object>) {
        self.graph.push(Triple { subject, predicate, object: object.into() });
    }

    /// Objektegenskap mellom to ressurser.
    pub fn link(&mut self, subject: NamedNode, property: FitProperty, object: NamedNode) {
        self.add_triple(subject, property.iri().into_owned(), object);
    }

    /// Tallverdi med datatypen fra predikattabellen. Returnerer om triplen
    /// ble lagt til (NumericPolicy::Omit hopper over ikke-endelige verdier).
    pub fn add_measure(&mut self, subject: NamedNode, property: FitProperty, value: f64) -> bool {
        let datatype = property.datatype().unwrap_or(xsd::DECIMAL);
        if !value.is_finite() {
            *self.degenerate.entry(property.local_name()).or_insert(0) += 1;
            warn!("{} on {} is {}", property.local_name(), subject.as_str(), value);
            if self.policy == NumericPolicy::Omit {
                return false;
            }
        }
        let literal = typed_literal(lexical_number(value, datatype), datatype);
        self.add_triple(subject, property.iri().into_owned(), literal);
        true
    }

    /// Ferdig leksikalsk verdi (varighet, tidsstempel) med tabellens datatype.
    pub fn add_lexical(&mut self, subject: NamedNode, property: FitProperty, lexical: &str) {
        let datatype = property.datatype().unwrap_or(xsd::STRING);
        self.add_triple(subject, property.iri().into_owned(), typed_literal(lexical, datatype));
    }

    pub fn activity_count(&self) -> u32 {
        self.next_activity - 1
    }

    pub fn trackpoint_count(&self) -> u32 {
        self.next_trackpoint - 1
    }

    /// Antall ikke-endelige verdier per predikat i denne kjøringen.
    pub fn degenerate(&self) -> &BTreeMap<&'static str, u64> {
        &self.degenerate
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn finish(self) -> Graph {
        self.graph
    }
}

fn fit_node(local: &str) -> Result<NamedNode> {
    let iri = vocab::fit_iri(local);
    NamedNode::new(iri.clone()).map_err(|e| ConvertError::InvalidIri { iri, message: e.to_string() })
}
