// core/src/resolver.rs
//
// Feltoppslag med alternative elementnavn. TCX-eksportører skriver samme felt
// med ulike prefiks ("TPX", "ns3:TPX", "ns2:TPX", ...). En resolver er en
// ordnet liste kandidat-stier; første sti som finnes vinner.

use crate::tcx::Element;

/// Ett steg i en sti: eksakt kvalifisert navn, eller lokalt navn med hvilket
/// som helst prefiks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Exact(&'static str),
    Local(&'static str),
}

impl Step {
    fn matches(&self, el: &Element) -> bool {
        match self {
            Step::Exact(name) => el.name == *name,
            Step::Local(name) => el.local_name() == *name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldResolver {
    name: &'static str,
    candidates: Vec<Vec<Step>>,
}

impl FieldResolver {
    pub fn new(name: &'static str) -> Self {
        Self { name, candidates: Vec::new() }
    }

    /// Enkeltsti med lokale navn, f.eks. `["HeartRateBpm", "Value"]`;
    /// hvert steg treffer uansett prefiks.
    pub fn path(name: &'static str, path: &[&'static str]) -> Self {
        Self::new(name).or_local_path(path)
    }

    pub fn or_local_path(mut self, path: &[&'static str]) -> Self {
        self.candidates
            .push(path.iter().map(|s| Step::Local(*s)).collect());
        self
    }

    pub fn or_steps(mut self, steps: &[Step]) -> Self {
        self.candidates.push(steps.to_vec());
        self
    }

    /// Alle kombinasjoner av stavemåter per nivå, i prioritert rekkefølge
    /// (første nivå varierer tregest).
    pub fn or_spellings(mut self, levels: &[&[&'static str]]) -> Self {
        let mut paths: Vec<Vec<Step>> = vec![Vec::new()];
        for spellings in levels {
            let mut next = Vec::with_capacity(paths.len() * spellings.len());
            for prefix in &paths {
                for s in spellings.iter() {
                    let mut p = prefix.clone();
                    p.push(Step::Exact(*s));
                    next.push(p);
                }
            }
            paths = next;
        }
        self.candidates.extend(paths);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Tekstverdien til første treff. Tom tekst regnes som fravær.
    pub fn resolve<'a>(&self, node: &'a Element) -> Option<&'a str> {
        self.candidates.iter().find_map(|steps| {
            walk(node, steps)
                .map(Element::text)
                .filter(|t| !t.is_empty())
        })
    }

    /// Numerisk verdi; fravær eller ikke-numerisk tekst gir NaN.
    pub fn resolve_f64(&self, node: &Element) -> f64 {
        self.resolve(node).map(parse_number).unwrap_or(f64::NAN)
    }
}

fn walk<'a>(node: &'a Element, steps: &[Step]) -> Option<&'a Element> {
    let mut current = node;
    for step in steps {
        current = current.children.iter().find(|c| step.matches(c))?;
    }
    Some(current)
}

/// Tallparsing for TCX-tekst: trimmes, ugyldig -> NaN.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}
