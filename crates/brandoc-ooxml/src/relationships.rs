//! Relationships parsing and generation for OOXML packages
//!
//! OOXML uses relationship files (`_rels/*.rels`) to map IDs to targets.
//! The writer builds `word/_rels/document.xml.rels` with this type and the
//! font embedder uses it to patch `word/_rels/fontTable.xml.rels`.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::parts::escape_xml;

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    /// Main document relationship type (package root)
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Core properties relationship type (package root)
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Numbering relationship type
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    /// Font table relationship type
    pub const TYPE_FONT_TABLE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable";
    /// Settings relationship type
    pub const TYPE_SETTINGS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    /// Header relationship type
    pub const TYPE_HEADER: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    /// Footer relationship type
    pub const TYPE_FOOTER: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    /// Embedded font relationship type
    pub const TYPE_FONT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/font";
}

/// Parsed relationships from a .rels file
///
/// Maintains insertion order for deterministic XML serialization.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Ordered list of relationship IDs (maintains insertion order)
    order: Vec<String>,
    /// Map of relationship ID to target (for fast lookups)
    map: HashMap<String, RelationshipTarget>,
    /// Counter for generating unique IDs (starts at 1)
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
            next_id_counter: 1,
        }
    }
}

/// A relationship target with its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTarget {
    /// The target path
    pub target: String,
    /// The relationship type URI
    pub rel_type: String,
}

impl Relationships {
    /// Create an empty relationships map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut max_id: u32 = 0;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            if let Some(num) = extract_id_number(&id) {
                                max_id = max_id.max(num);
                            }
                            rels.order.push(id.clone());
                            rels.map.insert(
                                id,
                                RelationshipTarget {
                                    target,
                                    rel_type: rel_type.unwrap_or_default(),
                                },
                            );
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        rels.next_id_counter = max_id + 1;
        Ok(rels)
    }

    /// Add a new relationship and return the generated ID (e.g. "rId3")
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;
        self.insert(id.clone(), target.into(), rel_type.into());
        id
    }

    fn insert(&mut self, id: String, target: String, rel_type: String) {
        self.order.push(id.clone());
        self.map.insert(id, RelationshipTarget { target, rel_type });
    }

    /// Serialize relationships to OOXML format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for (id, rel) in self.iter() {
            xml.push_str(&relationship_element(id, &rel.rel_type, &rel.target));
            xml.push('\n');
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(|r| r.target.as_str())
    }

    /// Check if a relationship ID exists
    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|rel| (id.as_str(), rel)))
    }
}

/// A single `<Relationship .../>` element
pub fn relationship_element(id: &str, rel_type: &str, target: &str) -> String {
    format!(
        r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
        escape_xml(id),
        escape_xml(rel_type),
        escape_xml(target)
    )
}

/// Extract the numeric portion from a relationship ID (e.g., "rId5" -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")
        .or_else(|| id.strip_prefix("RId"))
        .or_else(|| id.strip_prefix("rid"))
        .and_then(|num_str| num_str.parse().ok())
}
