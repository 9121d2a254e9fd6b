//! Turtle-serialisering av fitness-grafen.
//!
//! Triplene grupperes per subjekt (i rekkefølgen subjektene først dukker
//! opp), IRI-er forkortes med de faste prefiksene, og alle literaler skrives
//! med datatypen de ble bygget med. Ingen etterbehandling av teksten.

use std::collections::HashMap;

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, LiteralRef, NamedNode};

use crate::graph::{Graph, Object};
use crate::vocab::PREFIXES;

#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::with_capacity(256 + graph.len() * 64);

    for (prefix, iri) in PREFIXES {
        out.push_str(&format!("@prefix {prefix}: <{iri}> .\n"));
    }
    out.push('\n');

    // subjekt -> (predikat, objekt)-par, i innsettingsrekkefølge
    let mut order: Vec<&NamedNode> = Vec::new();
    let mut groups: HashMap<&NamedNode, Vec<(&NamedNode, &Object)>> = HashMap::new();
    for t in graph.iter() {
        groups
            .entry(&t.subject)
            .or_insert_with(|| {
                order.push(&t.subject);
                Vec::new()
            })
            .push((&t.predicate, &t.object));
    }

    for subject in order {
        let statements = &groups[subject];
        out.push_str(&compact(subject));
        for (i, (predicate, object)) in statements.iter().enumerate() {
            if i > 0 {
                out.push_str(" ;\n   ");
            }
            out.push(' ');
            out.push_str(&predicate_term(predicate));
            out.push(' ');
            out.push_str(&object_term(object));
        }
        out.push_str(" .\n\n");
    }

    out
}

/// Sørger for at alle fem prefiks-deklarasjonene finnes; manglende legges
/// foran teksten. Resultatet trimmes og avsluttes med nøyaktig én `\n`.
pub fn ensure_prefixes(ttl: &str) -> String {
    let mut text = ttl.to_string();
    for (prefix, iri) in PREFIXES {
        if !declares_prefix(&text, prefix) {
            text = format!("@prefix {prefix}: <{iri}> .\n{text}");
        }
    }
    format!("{}\n", text.trim())
}

fn declares_prefix(text: &str, prefix: &str) -> bool {
    let wanted = format!("{prefix}:");
    text.lines().any(|line| {
        line.strip_prefix("@prefix")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .is_some_and(|rest| rest.trim_start().starts_with(&wanted))
    })
}

fn predicate_term(predicate: &NamedNode) -> String {
    if predicate.as_ref() == rdf::TYPE {
        "a".to_string()
    } else {
        compact(predicate)
    }
}

fn object_term(object: &Object) -> String {
    match object {
        Object::Node(n) => compact(n),
        Object::Literal(l) => literal_term(l),
    }
}

fn literal_term(literal: &Literal) -> String {
    let quoted = LiteralRef::new_simple_literal(literal.value()).to_string();
    if let Some(lang) = literal.language() {
        return format!("{quoted}@{lang}");
    }
    let datatype = literal.datatype();
    if datatype == xsd::STRING {
        quoted
    } else {
        format!("{quoted}^^{}", compact_iri(datatype.as_str()))
    }
}

fn compact(node: &NamedNode) -> String {
    compact_iri(node.as_str())
}

/// `http://example.org/fitness#ac1` -> `fit:ac1`; ellers `<iri>`.
fn compact_iri(iri: &str) -> String {
    for (prefix, ns) in PREFIXES {
        if let Some(local) = iri.strip_prefix(ns) {
            if is_simple_local(local) {
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{iri}>")
}

/// Konservativ PN_LOCAL: bokstaver, sifre, `_` og `-`, ikke `-` først.
fn is_simple_local(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('-')
        && local.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
