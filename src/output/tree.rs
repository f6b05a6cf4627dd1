//! Multi-file output: one directory per page

use crate::output::traits::{OutputError, OutputResult, PageOutput, PageSink};
use crate::sanitize::{sanitize, sanitize_filename};
use std::path::{Path, PathBuf};

/// File written inside every page directory
pub const INDEX_FILE: &str = "index.md";

/// Writes each page to `<dir>/<sanitized title>/index.md`
///
/// The root page's directory is created under `output_root`; every other
/// page nests under the directory of the page that discovered it. The
/// converted Markdown is written verbatim without any heading or source
/// decoration. Sibling titles that sanitize to the same name share a
/// directory and the later page overwrites `index.md`.
#[derive(Debug, Clone)]
pub struct MultiFileSink {
    output_root: PathBuf,
}

impl MultiFileSink {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

impl PageSink for MultiFileSink {
    fn accept(
        &mut self,
        page: &PageOutput<'_>,
        parent_dir: Option<&Path>,
    ) -> OutputResult<Option<PathBuf>> {
        let page_dir = parent_dir
            .unwrap_or(self.output_root.as_path())
            .join(sanitize(page.title));

        std::fs::create_dir_all(&page_dir).map_err(|source| OutputError::CreateDir {
            path: page_dir.clone(),
            source,
        })?;

        let index_path = page_dir.join(INDEX_FILE);
        write_file(&index_path, page.markdown)?;
        tracing::info!("Saved: {}", index_path.display());

        Ok(Some(page_dir))
    }
}

/// Writes one page as `<output_dir>/<sanitized title>.md`
///
/// Used when a single page is converted without any traversal.
pub fn write_page_file(output_dir: &Path, title: &str, markdown: &str) -> OutputResult<PathBuf> {
    let path = output_dir.join(sanitize_filename(title));
    write_file(&path, markdown)?;
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    std::fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
