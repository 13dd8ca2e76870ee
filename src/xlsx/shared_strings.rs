//! Parser für den Shared-String-Pool (`xl/sharedStrings.xml`).

use super::resolve_entity;
use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Liest alle `<si>`-Einträge in Reihenfolge.
///
/// Rich-Text-Runs (`<r><t>..</t></r>`) werden aneinandergehängt, phonetische
/// Hilfstexte (`<rPh>`) ignoriert.
pub fn parse_shared_strings(content: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(content);
    let mut buf = Vec::new();

    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => in_phonetic = true,
                b"t" if !in_phonetic => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&e.xml_content()?);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&resolve_entity(&e)?);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(text) = current.take() {
                        strings.push(text);
                    }
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen von sharedStrings.xml"),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
