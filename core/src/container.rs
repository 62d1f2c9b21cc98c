//! ZIP container handling for the package-based spreadsheet format.
//!
//! Validates that the input is a well-formed ZIP archive before any part is
//! read, and provides required/optional part accessors over it.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a ZIP container")]
    NotZipContainer,
    #[error("failed to read archive entry '{path}': {reason}")]
    ZipRead { path: String, reason: String },
}

pub(crate) trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

pub struct ZipContainer {
    archive: ZipArchive<Box<dyn ReadSeek>>,
}

impl std::fmt::Debug for ZipContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipContainer").finish_non_exhaustive()
    }
}

impl ZipContainer {
    pub fn open_from_reader<R: Read + Seek + 'static>(
        reader: R,
    ) -> Result<ZipContainer, ContainerError> {
        let reader: Box<dyn ReadSeek> = Box::new(reader);
        let archive = ZipArchive::new(reader).map_err(|err| match err {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ContainerError::NotZipContainer
            }
            ZipError::Io(e) => ContainerError::Io(e),
            other => ContainerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                other.to_string(),
            )),
        })?;

        Ok(ZipContainer { archive })
    }

    pub fn open_from_path(path: impl AsRef<Path>) -> Result<ZipContainer, ContainerError> {
        let file = File::open(path)?;
        Self::open_from_reader(file)
    }

    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>, ZipError> {
        let mut file = self.archive.by_name(name)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read a part that is allowed to be absent. Absence maps to `None`;
    /// any other failure is an error.
    pub fn read_file_optional(&mut self, name: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        match self.read_file(name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(ZipError::Io(e)) => Err(ContainerError::Io(e)),
            Err(e) => Err(ContainerError::ZipRead {
                path: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::CompressionMethod;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn archive_with(name: &str, contents: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut buf));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            writer.start_file(name, options).expect("start file");
            writer.write_all(contents).expect("write file");
            writer.finish().expect("finish zip");
        }
        buf
    }

    #[test]
    fn garbage_bytes_are_not_a_container() {
        let err = ZipContainer::open_from_reader(Cursor::new(b"plainly not a zip".to_vec()))
            .expect_err("garbage should not open");
        assert!(matches!(err, ContainerError::NotZipContainer));
    }

    #[test]
    fn present_entry_reads_back() {
        let bytes = archive_with("xl/workbook.xml", b"<workbook/>");
        let mut container =
            ZipContainer::open_from_reader(Cursor::new(bytes)).expect("archive should open");
        let part = container.read_file("xl/workbook.xml").expect("entry exists");
        assert_eq!(part, b"<workbook/>");
    }

    #[test]
    fn absent_entry_is_none_when_optional() {
        let bytes = archive_with("other.txt", b"x");
        let mut container =
            ZipContainer::open_from_reader(Cursor::new(bytes)).expect("archive should open");
        let part = container
            .read_file_optional("xl/sharedStrings.xml")
            .expect("optional read should not fail");
        assert!(part.is_none());
    }
}
