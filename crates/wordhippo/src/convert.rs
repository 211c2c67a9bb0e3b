//! Content classification and HTML-to-Markdown conversion

use tracing::debug;
use url::Url;

/// Diagnostic returned when readability extraction yields nothing
///
/// A soft failure: it is surfaced as content, never as an error.
pub const SIMPLIFY_FAILED: &str = "<error>Page failed to be simplified from HTML</error>";

/// Elements whose content never appears in the output
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg"];

/// Check whether a response payload is HTML
///
/// Classifies as HTML if the first 100 characters of the body contain
/// `<html` (case-sensitive), the content-type contains `text/html`, or
/// the content-type header is absent. Many servers omit the header for
/// HTML error pages, so no declared type defaults to HTML.
pub fn is_html(content_type: &str, body: &str) -> bool {
    if content_type.is_empty() || content_type.contains("text/html") {
        return true;
    }
    let prefix: String = body.chars().take(100).collect();
    prefix.contains("<html")
}

/// Distill a page's main content into Markdown
///
/// Runs readability main-content extraction, then converts the simplified
/// article HTML to Markdown. Extraction failure or empty output returns
/// the fixed [`SIMPLIFY_FAILED`] diagnostic instead of an error.
pub(crate) fn simplify_html(html: &str, url: &Url) -> String {
    let product = match readability::extractor::extract(&mut html.as_bytes(), url) {
        Ok(product) => product,
        Err(e) => {
            debug!(%url, error = ?e, "readability extraction failed");
            return SIMPLIFY_FAILED.to_string();
        }
    };

    let markdown = html_to_markdown(&product.content);
    if markdown.trim().is_empty() {
        SIMPLIFY_FAILED.to_string()
    } else {
        markdown
    }
}

/// Convert HTML to Markdown with ATX-style headings
pub fn html_to_markdown(html: &str) -> String {
    let mut output = String::new();
    let mut skip_stack: Vec<&'static str> = Vec::new();
    let mut list_depth: usize = 0;
    let mut in_pre = false;
    // Open link: output position where the anchor text starts, plus href
    let mut link: Option<(usize, String)> = None;

    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            if skip_stack.is_empty() {
                output.push(decode_entity(c, &mut chars));
            }
            continue;
        }

        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            chars.next();
            if next == '>' {
                break;
            }
            tag.push(next);
        }

        let tag_lower = tag.to_lowercase();
        let is_closing = tag_lower.starts_with('/');
        let name = tag_lower
            .trim_start_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("");

        if let Some(&skip) = SKIP_TAGS.iter().find(|&&t| t == name) {
            if is_closing {
                if let Some(pos) = skip_stack.iter().rposition(|&t| t == skip) {
                    skip_stack.remove(pos);
                }
            } else if !tag.ends_with('/') {
                skip_stack.push(skip);
            }
            continue;
        }
        if !skip_stack.is_empty() {
            continue;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if is_closing {
                    output.push_str("\n\n");
                } else {
                    let level = name[1..].parse::<usize>().unwrap_or(1);
                    output.push('\n');
                    output.push_str(&"#".repeat(level));
                    output.push(' ');
                }
            }
            "p" | "div" | "section" | "article" | "td" | "tr" => {
                if is_closing {
                    output.push('\n');
                }
            }
            "br" => output.push('\n'),
            "hr" => output.push_str("\n---\n"),
            "ul" | "ol" => {
                if is_closing {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        output.push('\n');
                    }
                } else {
                    list_depth += 1;
                }
            }
            "li" => {
                if !is_closing {
                    output.push('\n');
                    for _ in 0..list_depth.saturating_sub(1) {
                        output.push_str("  ");
                    }
                    output.push_str("- ");
                }
            }
            "strong" | "b" => output.push_str("**"),
            "em" | "i" => output.push('*'),
            "pre" => {
                output.push_str("\n```\n");
                in_pre = !in_pre;
            }
            "code" => {
                if !in_pre {
                    output.push('`');
                }
            }
            "a" => {
                if is_closing {
                    if let Some((mark, href)) = link.take() {
                        let text = output.split_off(mark);
                        output.push_str(&format!("[{}]({href})", text.trim()));
                    }
                } else if let Some(href) = extract_attribute(&tag, "href") {
                    link = Some((output.len(), href));
                }
            }
            _ => {}
        }
    }

    clean_whitespace(&output)
}

/// Extract an attribute value from raw tag text
///
/// Attribute names match case-insensitively. The search compares byte
/// windows in place rather than lowercasing the tag, since case folding
/// can change byte lengths and invalidate offsets into the original.
fn extract_attribute(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!("{attr}=");
    let start = find_ignore_ascii_case(tag, &pattern)?;
    let rest = tag[start + pattern.len()..].trim_start();

    for quote in ['"', '\''] {
        if let Some(rest) = rest.strip_prefix(quote) {
            return rest.find(quote).map(|end| rest[..end].to_string());
        }
    }
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Byte offset of the first ASCII-case-insensitive match of `needle`
///
/// `needle` must be ASCII; a match therefore always starts and ends on
/// a character boundary of `haystack`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Decode an HTML entity starting from an ampersand
fn decode_entity(c: char, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if c != '&' {
        return c;
    }

    let mut entity = String::new();
    while let Some(&next) = chars.peek() {
        if next == ';' {
            chars.next();
            break;
        }
        if next.is_whitespace() || entity.len() > 10 {
            return '&';
        }
        entity.push(next);
        chars.next();
    }

    match entity.as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => ' ',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        _ => {
            if let Some(num) = entity.strip_prefix('#') {
                let code = match num.strip_prefix('x') {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                if let Some(ch) = code.and_then(char::from_u32) {
                    return ch;
                }
            }
            '&'
        }
    }
}

/// Collapse whitespace runs, trim, keep at most one blank line
fn clean_whitespace(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_space = false;
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            if last_was_space && result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            last_was_space = true;
            if newline_count <= 2 {
                result.push(c);
            }
        } else if c.is_whitespace() {
            newline_count = 0;
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            newline_count = 0;
            last_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}
