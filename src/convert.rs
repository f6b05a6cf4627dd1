//! HTML to Markdown conversion
//!
//! Confluence storage-format bodies are run through `html2md` with two
//! overrides: headings come out in ATX form (`# Title`) and `<script>` /
//! `<style>` contents are dropped. Underscores in text are left unescaped
//! so identifiers such as `snake_case` read naturally.

use html2md::{Handle, NodeData, StructuredPrinter, TagHandler, TagHandlerFactory};
use std::collections::HashMap;

/// Renders a page body as Markdown
///
/// Implementations must be total: malformed HTML degrades into whatever text
/// can be recovered instead of failing.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

/// Default converter backed by `html2md`
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html_custom(html, &tag_overrides()).replace("\\_", "_")
    }
}

/// Handlers replacing html2md's defaults for a few tags
///
/// Built per call since the factories are neither `Send` nor `Sync`.
fn tag_overrides() -> HashMap<String, Box<dyn TagHandlerFactory>> {
    let mut handlers: HashMap<String, Box<dyn TagHandlerFactory>> = HashMap::new();
    for level in 1..=6 {
        handlers.insert(format!("h{}", level), Box::new(AtxHeading::default));
    }
    for tag in ["script", "style"] {
        handlers.insert(tag.to_string(), Box::new(Dropped::default));
    }
    handlers
}

/// Writes `<hN>` as `N` hashes followed by the heading text
#[derive(Default)]
struct AtxHeading {
    level: usize,
}

impl TagHandler for AtxHeading {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.level = match tag.data {
            NodeData::Element { ref name, .. } => name
                .local
                .to_string()
                .trim_start_matches('h')
                .parse()
                .unwrap_or(1),
            _ => 1,
        };

        printer.insert_newline();
        printer.insert_newline();
        printer.append_str(&"#".repeat(self.level));
        printer.append_str(" ");
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        printer.insert_newline();
        printer.insert_newline();
    }
}

/// Emits nothing for the element or anything inside it
#[derive(Default)]
struct Dropped;

impl TagHandler for Dropped {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}
