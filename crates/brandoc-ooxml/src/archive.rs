//! Archive handling for DOCX packages
//!
//! A DOCX package is a ZIP archive of XML parts and binary resources.
//! [`OoxmlArchive`] holds the parts in memory; writing is deterministic
//! (sorted part names, fixed timestamps) so the same parts always produce
//! the same bytes.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Options used for every part this crate writes
pub(crate) fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// An unpacked OOXML package
#[derive(Debug, Default)]
pub struct OoxmlArchive {
    /// All parts in the archive, keyed by path
    files: BTreeMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a package file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Create from package bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Check if a part exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all parts in the archive, sorted
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    /// Set a part's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = part_options();

        // [Content_Types].xml sorts first, as readers expect
        for (path, contents) in &self.files {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the archive to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = std::io::Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        Ok(output.into_inner())
    }
}
