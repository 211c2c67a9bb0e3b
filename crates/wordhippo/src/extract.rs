//! Extraction strategies for fetched HTML
//!
//! Two interchangeable strategies share one contract (HTML text in,
//! normalized text out): a schema-aware extractor for the WordHippo
//! thesaurus layout, and a readability-based fallback for arbitrary
//! pages. The strategy is chosen at tool construction, not by content
//! inspection.

use crate::convert;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

/// Synonym cap per sense entry
const MAX_SYNONYMS: usize = 20;

/// Extraction strategy applied to HTML content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extractor {
    /// Schema-aware extraction of the WordHippo thesaurus layout
    #[default]
    Thesaurus,
    /// Readability-style distillation of arbitrary pages into Markdown
    Readability,
}

impl Extractor {
    /// Extract normalized text from an HTML document
    pub fn extract(&self, html: &str, url: &Url) -> String {
        match self {
            Extractor::Thesaurus => extract_senses(html),
            Extractor::Readability => convert::simplify_html(html, url),
        }
    }
}

/// One tagged block from the flattened document
///
/// Each 'meaning' entry in a WordHippo page looks like:
///
/// ```html
/// <div class="wordtype">Noun</div>
/// <div class="tabdesc">Meaning description...</div>
/// <div class="relatedwords">
///   <table><tr><td><a href="motorcycle.html">motorcycle</a></td></tr></table>
/// </div>
/// ```
#[derive(Debug)]
enum Block {
    /// Direct text of a `wordtype` element ("Noun", "Verb", ...)
    WordType(String),
    /// Full text of a `tabdesc` element
    Description(String),
    /// Trimmed cell texts of the first table inside a `relatedwords`
    /// element, capped at [`MAX_SYNONYMS`], in document order
    Synonyms(Vec<String>),
}

/// Extract word-type/definition/synonym entries from a thesaurus page
///
/// The document is flattened into a list of tagged blocks, then scanned
/// linearly: each word type is paired with the next description and the
/// next synonym table after it. A word type with no following
/// description is not a real sense (the page ends with a "Related Words"
/// marker) and is skipped, as is any entry with malformed or missing
/// siblings. An empty result is not an error.
pub(crate) fn extract_senses(html: &str) -> String {
    let doc = Html::parse_document(html);
    let blocks = flatten(&doc);

    let mut output: Vec<String> = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        let Block::WordType(word_type) = block else {
            continue;
        };

        let Some((desc_idx, description)) =
            blocks
                .iter()
                .enumerate()
                .skip(i + 1)
                .find_map(|(j, b)| match b {
                    Block::Description(d) => Some((j, d)),
                    _ => None,
                })
        else {
            continue;
        };

        let Some(synonyms) = blocks.iter().skip(desc_idx + 1).find_map(|b| match b {
            Block::Synonyms(s) => Some(s),
            _ => None,
        }) else {
            continue;
        };

        output.push(format!("{word_type}: {description}"));
        let list = synonyms
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n");
        output.push(format!("Synonyms:\n{list}"));
        output.push("---".to_string());
    }

    debug!(entries = output.len() / 3, "extracted thesaurus senses");
    output.join("\n\n")
}

/// Flatten the document into tagged blocks in document order
fn flatten(doc: &Html) -> Vec<Block> {
    let mut blocks = Vec::new();
    for node in doc.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if has_class(el, "wordtype") {
            blocks.push(Block::WordType(direct_text(el)));
        } else if has_class(el, "tabdesc") {
            blocks.push(Block::Description(full_text(el)));
        } else if has_class(el, "relatedwords") {
            blocks.push(Block::Synonyms(synonym_cells(el)));
        }
    }
    blocks
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value()
        .attr("class")
        .map_or(false, |attr| attr.split_whitespace().any(|c| c == class))
}

/// Text directly under the element, excluding child elements
fn direct_text(el: ElementRef) -> String {
    let mut text = String::new();
    for child in el.children() {
        if let Some(t) = child.value().as_text() {
            text.push_str(&t.text);
        }
    }
    text.trim().to_string()
}

/// Full descendant text of the element
fn full_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Cell texts of the first table inside a `relatedwords` element
fn synonym_cells(related: ElementRef) -> Vec<String> {
    let Some(table) = related
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
    else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    for el in table.descendants().filter_map(ElementRef::wrap) {
        if el.value().name() == "td" {
            cells.push(full_text(el));
            if cells.len() == MAX_SYNONYMS {
                break;
            }
        }
    }
    cells
}
