//! Single-file output: all pages concatenated into one document

use crate::output::traits::{OutputError, OutputResult, PageOutput, PageSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Separator written between consecutive page sections
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Appends every page as a section of one Markdown document
///
/// Each section is a level-1 heading with the page title, a
/// `Source: [url](url)` line and the trimmed Markdown body. Sections appear
/// in the order pages are accepted, separated by a horizontal rule.
pub struct SingleFileSink<W: Write> {
    writer: W,
    first: bool,
}

impl SingleFileSink<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes sections into it
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SingleFileSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            first: true,
        }
    }

    /// Flushes buffered output and returns the underlying writer
    pub fn finish(mut self) -> OutputResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> PageSink for SingleFileSink<W> {
    fn accept(
        &mut self,
        page: &PageOutput<'_>,
        _parent_dir: Option<&Path>,
    ) -> OutputResult<Option<PathBuf>> {
        write_section(&mut self.writer, page, self.first)?;
        self.first = false;
        tracing::info!("Appended '{}' (depth {})", page.title, page.depth);
        Ok(None)
    }
}

/// Writes one page section, preceded by a separator unless it is the first
pub fn write_section<W: Write>(
    writer: &mut W,
    page: &PageOutput<'_>,
    is_first: bool,
) -> std::io::Result<()> {
    if !is_first {
        writer.write_all(SECTION_SEPARATOR.as_bytes())?;
    }
    write!(writer, "# {}\n\n", page.title)?;
    write!(writer, "Source: [{url}]({url})\n\n", url = page.url)?;
    writer.write_all(page.markdown.trim().as_bytes())?;
    writer.write_all(b"\n")
}
