// src/core/html.rs
//
// Slice-based, case-insensitive HTML scanning. No DOM tree; every helper
// works on byte offsets into the raw document string. ASCII-only lowering
// keeps offsets stable across the lowered copy.

use super::sanitize::{normalize_entities, normalize_ws};

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

/// Inner slice between `open_pat` (up to its closing '>') and `close_pat`.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

fn at_tag_boundary(b: Option<u8>) -> bool {
    matches!(b, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'))
}

/// Next `<tag ...>...</tag>` block at or after `from`. The tag name must end
/// at whitespace, '>' or '/' so `"a"` does not match `<abbr>`. Naive close
/// matching (first `</tag>`), fine for the non-nesting tags we scan.
pub fn next_elem_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag), ">");
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&open)? + at;
        if !at_tag_boundary(lc.as_bytes().get(start + open.len()).copied()) {
            at = start + open.len();
            continue;
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(&close)?;
        return Some((start, open_end + end_rel + close.len()));
    }
}

/// First `tag` block in `s`, as a subslice.
pub fn find_elem_ci<'a>(s: &'a str, tag: &str) -> Option<&'a str> {
    next_elem_ci(s, tag, 0).map(|(a, b)| &s[a..b])
}

/// First `tag` block whose class tokens include `class`.
pub fn find_class_elem_ci<'a>(s: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    let mut pos = 0usize;
    while let Some((a, b)) = next_elem_ci(s, tag, pos) {
        let block = &s[a..b];
        if has_class(open_tag(block), class) {
            return Some(block);
        }
        pos = b;
    }
    None
}

/// Byte offsets of every `<tag ...>` open tag carrying the class token.
/// Used to cut the document into per-card segments; blocks are not matched
/// to close tags here because the containers nest.
pub fn open_tags_with_class(doc: &str, tag: &str, class: &str) -> Vec<usize> {
    let lc = to_lower(doc);
    let open = join!("<", &to_lower(tag));
    let mut starts = Vec::new();
    let mut at = 0usize;
    while let Some(rel) = lc.get(at..).and_then(|rest| rest.find(&open)) {
        let start = at + rel;
        at = start + open.len();
        if !at_tag_boundary(lc.as_bytes().get(start + open.len()).copied()) {
            continue;
        }
        let Some(gt) = doc[start..].find('>') else { break };
        if has_class(&doc[start..start + gt + 1], class) {
            starts.push(start);
        }
    }
    starts
}

/// The `<tag ...>` prefix of a block, up to and including the first '>'.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..i + 1],
        None => block,
    }
}

/// Attribute value inside an open tag; handles `a="v"`, `a='v'` and bare `a=v`.
pub fn attr_ci(tag_open: &str, name: &str) -> Option<String> {
    let lc = to_lower(tag_open);
    let needle = join!(&to_lower(name), "=");
    let mut at = 0usize;
    let hit = loop {
        let i = lc.get(at..)?.find(&needle)? + at;
        // require a whitespace boundary so "data-href=" never matches "href="
        if i > 0 && lc.as_bytes()[i - 1].is_ascii_whitespace() {
            break i;
        }
        at = i + needle.len();
    };
    let rest = &tag_open[hit + needle.len()..];
    match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let v = &rest[1..];
            let end = v.find(q)?;
            Some(v[..end].to_string())
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(rest[..end].to_string())
        }
    }
}

/// Whitespace-token match on the class attribute:
/// `class="card mb-3"` carries `card`; `class="card-header"` does not.
pub fn has_class(tag_open: &str, class: &str) -> bool {
    match attr_ci(tag_open, "class") {
        Some(v) => v.split_ascii_whitespace().any(|t| t == class),
        None => false,
    }
}

/// Markup between a block's open tag and its final close tag.
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
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

/// Visible text of a block: entities normalized, tags stripped, ws collapsed.
pub fn text(block: &str) -> String {
    strip_tags(normalize_entities(&inner_after_open_tag(block)))
}
