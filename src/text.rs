//! Text-level utilities over the raw expression grammar.
//!
//! Both functions here work on the expression string itself, before or
//! beside evaluation: extracting the dotted field names an expression
//! refers to, and splicing named prepared conditions into an expression.
//! Neither can fail.

use regex::Regex;

/// Extract every dotted field name from an expression, left to right,
/// duplicates included.
///
/// A field name is one or more letter-led alphanumeric segments joined by
/// `.`, with at least one dot required. Bare identifiers without a dot
/// are invisible to this scan; callers depend on that, so it stays.
///
/// # Examples
///
/// ```
/// use sift_lang::field_names;
///
/// assert_eq!(field_names("a.b > c.d.e"), vec!["a.b", "c.d.e"]);
/// assert_eq!(field_names("count > 3"), Vec::<String>::new());
/// ```
pub fn field_names(expression: &str) -> Vec<String> {
    let pattern = Regex::new(r"[A-Za-z][A-Za-z0-9]*(?:\.[A-Za-z][A-Za-z0-9]*)+")
        .expect("field-name pattern is a valid regex");
    pattern
        .find_iter(expression)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splice named prepared conditions into an expression.
///
/// Each `(name, replacement)` pair is applied in slice order. A name only
/// matches where it is preceded by the start of the string, whitespace,
/// `(`, or `!`, and followed by the end of the string, whitespace, or `)`
/// — an approximation of word boundaries that keeps `p1` from firing
/// inside `p10`. Because application is sequential, an earlier
/// replacement's output is visible to later names; chained conditions
/// rely on this, and a replacement whose text happens to contain a later
/// name will be rewritten again.
///
/// An empty slice returns the input unchanged.
///
/// # Examples
///
/// ```
/// use sift_lang::populate_prepared_conditions;
///
/// let out = populate_prepared_conditions("p1 == 1", &[("p1", "(2 - 1)")]);
/// assert_eq!(out, "(2 - 1) == 1");
/// ```
pub fn populate_prepared_conditions(expression: &str, prepared: &[(&str, &str)]) -> String {
    let mut result = expression.to_string();

    for (name, replacement) in prepared {
        let pattern = Regex::new(&format!(r"(^|[\s(!])({})([\s)]|$)", regex::escape(name)))
            .expect("prepared-condition pattern is a valid regex");
        result = pattern
            .replace_all(&result, |caps: &regex::Captures| {
                format!("{}{}{}", &caps[1], replacement, &caps[3])
            })
            .into_owned();
    }

    result
}
