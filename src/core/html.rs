// src/core/html.rs
// Tolerant, case-insensitive tag scanning. No DOM; good enough for
// pages whose shape we know.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-lowercase, leaving other chars alone (byte offsets stay valid).
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// One matched element: the opening tag (with attributes) and its inner markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Element<'a> {
    pub fn attr(&self, name: &str) -> Option<String> {
        attr(self.open_tag, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.open_tag, class)
    }

    /// Visible text: tags stripped, entities decoded, whitespace collapsed.
    pub fn text(&self) -> String {
        strip_tags(normalize_entities(self.inner))
    }
}

/// Iterates every `<name ...>...</name>` in document order.
/// The document is lowercased once; the tag name must match exactly
/// (`<a` does not match `<abbr>`). Scanning resumes right after each
/// opening tag, so nested elements of the same name are still visited.
pub struct Elements<'a> {
    doc: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> Elements<'a> {
    pub fn new(doc: &'a str, name: &str) -> Self {
        let name = to_lower(name);
        Self {
            doc,
            lc: to_lower(doc),
            open: join!("<", &name),
            close: join!("</", &name),
            pos: 0,
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Element<'a>> {
        loop {
            let start = self.lc.get(self.pos..)?.find(&self.open)? + self.pos;
            let after_name = start + self.open.len();
            let boundary = matches!(
                self.lc.as_bytes().get(after_name),
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/'
            );
            if !boundary {
                self.pos = after_name;
                continue;
            }

            let open_end = self.doc[start..].find('>')? + start + 1;
            let (inner_end, end) = match self.lc[open_end..].find(&self.close) {
                Some(rel) => (open_end + rel, open_end + rel + self.close.len()),
                None => (open_end, open_end), // unclosed or void element
            };
            self.pos = open_end;

            return Some(Element {
                open_tag: &self.doc[start..open_end],
                inner: &self.doc[open_end..inner_end],
                start,
                end,
            });
        }
    }
}

/// Value of attribute `name` in an opening tag; quoted or bare.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let needle = to_lower(name);
    let bytes = lc.as_bytes();
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let Some(rest) = open_tag[from..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let value = match rest.chars().next()? {
            q @ ('"' | '\'') => {
                let body = &rest[1..];
                &body[..body.find(q)?]
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                rest[..end].trim_end_matches('/')
            }
        };
        return Some(normalize_entities(value));
    }
    None
}

pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}
