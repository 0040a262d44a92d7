/// Converts a `snake_case` Rust identifier into a `camelCase` GraphQL name.
///
/// A leading `_` is dropped, so `_unused`-style bindings keep a sensible name.
///
/// Needs to be public because the argument macros use it.
#[doc(hidden)]
pub fn to_camel_case(s: &str) -> String {
    let s = s.strip_prefix('_').unwrap_or(s);
    let mut dest = String::with_capacity(s.len());
    for (i, part) in s.split('_').enumerate() {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) if i > 0 => {
                dest.extend(first.to_uppercase());
                dest.push_str(chars.as_str());
            }
            _ => dest.push_str(part),
        }
    }
    dest
}

/// Joins the lines of doc comments into a description.
#[doc(hidden)]
pub fn doc_description(lines: &[&str]) -> Option<String> {
    let description = lines
        .iter()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_owned())
}
