// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop literal parentheses, e.g. `"(a@b.com)"` → `"a@b.com"`.
/// The learner email renders wrapped in parens; only the chars are removed,
/// anything between them is kept.
pub fn strip_parens(s: &str) -> String {
    let out: String = s.chars().filter(|&c| c != '(' && c != ')').collect();
    out.trim().to_string()
}
