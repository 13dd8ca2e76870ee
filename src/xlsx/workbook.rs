//! XLSX-Arbeitsmappe: ZIP-Container öffnen, Blattverzeichnis auflösen und
//! Blätter als `Sheet` bereitstellen.

use super::shared_strings::parse_shared_strings;
use super::worksheet::parse_worksheet;
use crate::core::{LayoutError, LayoutResult};
use crate::shared::{Sheet, TableSource};
use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Ein Blatt-Eintrag aus `workbook.xml` mit aufgelöstem Dateipfad.
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    part_path: String,
}

/// Geöffnete XLSX-Arbeitsmappe.
///
/// Die XML-Teile liegen nach dem Öffnen im Speicher; Tabellenblätter werden
/// erst bei `read_sheet` geparst.
#[derive(Debug)]
pub struct XlsxWorkbook {
    label: String,
    parts: HashMap<String, Vec<u8>>,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<String>,
}

impl XlsxWorkbook {
    /// Öffnet eine XLSX-Datei vom Dateisystem.
    pub fn open(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        Self::try_open(path).map_err(source_unavailable)
    }

    /// Öffnet eine XLSX-Datei aus einem Byte-Puffer.
    pub fn from_bytes(bytes: Vec<u8>) -> LayoutResult<Self> {
        extract_parts(Cursor::new(bytes))
            .context("Ungueltiges XLSX-Archiv")
            .and_then(|parts| Self::from_parts("<Speicher>".to_string(), parts))
            .map_err(source_unavailable)
    }

    fn try_open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("XLSX-Datei nicht gefunden: {}", path.display()))?;
        let parts = extract_parts(BufReader::new(file))
            .with_context(|| format!("Ungueltiges XLSX-Archiv: {}", path.display()))?;
        Self::from_parts(path.display().to_string(), parts)
    }

    fn from_parts(label: String, parts: HashMap<String, Vec<u8>>) -> Result<Self> {
        let workbook_xml = parts
            .get(WORKBOOK_PART)
            .context("xl/workbook.xml fehlt – ist das eine XLSX-Datei?")?;
        let declared = parse_workbook_sheets(workbook_xml)?;

        let relationships = match parts.get(WORKBOOK_RELS_PART) {
            Some(content) => parse_relationships(content)?,
            None => HashMap::new(),
        };

        let sheets = declared
            .into_iter()
            .map(|(name, relation_id)| -> Result<SheetEntry> {
                let target = relationships.get(&relation_id).with_context(|| {
                    format!("Beziehung '{}' fuer Blatt '{}' fehlt", relation_id, name)
                })?;
                Ok(SheetEntry {
                    name,
                    part_path: resolve_target(target),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let shared_strings = match parts.get(SHARED_STRINGS_PART) {
            Some(content) => parse_shared_strings(content)?,
            None => Vec::new(),
        };

        log::info!(
            "Arbeitsmappe geoeffnet: {} ({} Blaetter, {} Shared Strings)",
            label,
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            label,
            parts,
            sheets,
            shared_strings,
        })
    }
}

impl TableSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> LayoutResult<Sheet> {
        let entry = self
            .sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| LayoutError::SheetNotFound {
                sheet: name.to_string(),
                available: self.sheet_names().join(", "),
            })?;

        let content = self
            .parts
            .get(&entry.part_path)
            .with_context(|| format!("Blatt-Datei fehlt: {}", entry.part_path))
            .map_err(source_unavailable)?;

        let grid = parse_worksheet(content, &self.shared_strings)
            .with_context(|| format!("Blatt '{}' in {}", name, self.label))
            .map_err(source_unavailable)?;

        Ok(Sheet::from_grid(name, grid))
    }
}

fn source_unavailable(err: anyhow::Error) -> LayoutError {
    LayoutError::SourceUnavailable(format!("{:#}", err))
}

/// Liest alle XML-Teile des Archivs in eine HashMap (Pfad → Inhalt).
fn extract_parts<R: Read + Seek>(reader: R) -> Result<HashMap<String, Vec<u8>>> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let mut parts = HashMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if entry.is_file() && (name.ends_with(".xml") || name.ends_with(".rels")) {
            let mut buffer = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buffer)?;
            parts.insert(name, buffer);
        }
    }

    log::debug!("XLSX entpackt: {} XML-Teile", parts.len());
    Ok(parts)
}

/// Parst `workbook.xml`: Liste von (Blattname, Beziehungs-ID) in Mappen-Reihenfolge.
fn parse_workbook_sheets(content: &[u8]) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = None;
                    let mut relation_id = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.local_name().as_ref() {
                            b"name" => name = Some(attr.unescape_value()?.into_owned()),
                            b"id" => relation_id = Some(attr.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }
                    match (name, relation_id) {
                        (Some(name), Some(relation_id)) => sheets.push((name, relation_id)),
                        _ => log::warn!("Blatt-Eintrag ohne name/r:id in workbook.xml ignoriert"),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen von workbook.xml"),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parst `workbook.xml.rels`: Beziehungs-ID → Ziel-Pfad.
fn parse_relationships(content: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = None;
                    let mut target = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                            b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(target)) = (id, target) {
                        relationships.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen von workbook.xml.rels"),
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Ziel-Pfade sind relativ zu `xl/` oder absolut zum Archiv-Root.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{}", target)
    }
}
