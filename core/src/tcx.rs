// core/src/tcx.rs
//
// quick-xml basert leser som bygger et lite elementtre av TCX-dokumentet.
// Elementnavn lagres slik de står i kilden (inkl. prefiks, f.eks. "ns3:TPX"),
// slik at resolveren kan velge mellom alternative stavemåter.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Kvalifisert navn slik det står i dokumentet ("ns3:Watts").
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Navnet uten prefiks ("ns3:Watts" -> "Watts").
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Første barn med gitt lokalt navn, uansett prefiks
    /// (`child("Activities")` treffer også `<tcx:Activities>`).
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.local_name() == local)
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// Parser et helt XML-dokument og returnerer rotelementet.
pub fn parse_document(xml: &str) -> Result<Element> {
    // Garmin-eksporter starter ofte med BOM
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(reader.error_position() as u64, e))?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(e) => {
                stack.push(start_element(&e, position)?);
            }
            Event::Empty(e) => {
                let el = start_element(&e, position)?;
                attach(&mut stack, &mut root, el, position)?;
            }
            Event::End(_) => {
                let el = stack.pop().ok_or_else(|| ConvertError::Parse {
                    position,
                    message: "unexpected closing tag".into(),
                })?;
                attach(&mut stack, &mut root, el, position)?;
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| parse_error(position, e))?;
                push_text(&mut stack, &text, position)?;
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                push_text(&mut stack, &text, position)?;
            }
            Event::Eof => break,
            // Decl, kommentarer, PI, DOCTYPE ignoreres
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::Parse {
            position: reader.buffer_position() as u64,
            message: format!("unclosed element <{}>", open.name),
        });
    }

    root.ok_or_else(|| ConvertError::Parse {
        position: 0,
        message: "document has no root element".into(),
    })
}

fn parse_error(position: u64, e: impl std::fmt::Display) -> ConvertError {
    ConvertError::Parse { position, message: e.to_string() }
}

fn start_element(e: &BytesStart<'_>, position: u64) -> Result<Element> {
    let name = utf8(e.name().as_ref(), position)?.into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| parse_error(position, err))?;
        let key = utf8(attr.key.as_ref(), position)?.into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| parse_error(position, err))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element { name, attributes, ..Element::default() })
}

fn utf8(bytes: &[u8], position: u64) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| parse_error(position, e))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
    position: u64,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => {
            return Err(ConvertError::Parse {
                position,
                message: format!("second root element <{}>", el.name),
            })
        }
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ConvertError::Parse {
            position,
            message: "text outside of root element".into(),
        }),
    }
}
