//! URL query building and display helpers.

use serde::{Deserialize, Serialize};
use ::url::{form_urlencoded, Url};

use utilkit_domain::{Collection, EnumValues, Key, Value};

/// Percent-encoding flavour for query strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryEncoding {
    /// Form encoding: spaces become `+`
    #[default]
    Rfc1738,
    /// Raw encoding: spaces become `%20`, `~` stays literal
    Rfc3986,
}

impl EnumValues for QueryEncoding {
    type Value = &'static str;

    fn cases() -> &'static [Self] {
        &[QueryEncoding::Rfc1738, QueryEncoding::Rfc3986]
    }

    fn value(&self) -> &'static str {
        match self {
            QueryEncoding::Rfc1738 => "RFC1738",
            QueryEncoding::Rfc3986 => "RFC3986",
        }
    }
}

/// Options for [`build_query`] and [`append_url_query_params`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub encoding: QueryEncoding,
    /// Prepended to top-level integer keys
    pub numeric_prefix: String,
    /// Placed between `name=value` pairs
    pub separator: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            encoding: QueryEncoding::default(),
            numeric_prefix: String::new(),
            separator: "&".to_string(),
        }
    }
}

impl QueryOptions {
    pub fn with_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_numeric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.numeric_prefix = prefix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

fn encode(raw: &str, encoding: QueryEncoding) -> String {
    let encoded: String = form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    let encoded = encoded.replace('*', "%2A");
    match encoding {
        QueryEncoding::Rfc1738 => encoded,
        QueryEncoding::Rfc3986 => encoded.replace('+', "%20").replace("%7E", "~"),
    }
}

/// Encodes `params` as a query string.
///
/// Null values are skipped, booleans become `1`/`0`, and nested collections
/// expand to bracketed names (`filter%5Btag%5D=rust`).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit_common::url::{build_query, QueryOptions};
/// use utilkit_domain::{Collection, Value};
///
/// let params = Collection::try_from(Value::from(json!({"q": "rust lang", "page": 2}))).unwrap();
/// assert_eq!(build_query(&params, &QueryOptions::default()), "q=rust+lang&page=2");
/// ```
pub fn build_query(params: &Collection, options: &QueryOptions) -> String {
    let mut pairs = Vec::new();

    for (key, value) in params {
        let name = match key {
            Key::Int(i) => format!("{}{}", options.numeric_prefix, i),
            Key::Str(s) => s.clone(),
        };
        push_pairs(&mut pairs, &encode(&name, options.encoding), value, options.encoding);
    }

    pairs.join(&options.separator)
}

fn push_pairs(pairs: &mut Vec<String>, name: &str, value: &Value, encoding: QueryEncoding) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push(format!("{}={}", name, u8::from(*b))),
        Value::Int(i) => pairs.push(format!("{}={}", name, i)),
        Value::Float(f) => pairs.push(format!("{}={}", name, encode(&f.to_string(), encoding))),
        Value::String(s) => pairs.push(format!("{}={}", name, encode(s, encoding))),
        Value::Array(inner) => {
            for (key, child) in inner {
                let child_name = format!("{}%5B{}%5D", name, encode(&key.to_string(), encoding));
                push_pairs(pairs, &child_name, child, encoding);
            }
        }
    }
}

/// Appends `params` to `url` as a query string.
///
/// A `?` is inserted when the URL has no query yet, the separator when it
/// already has one. Nothing is inserted when the URL already ends with `?` or
/// the separator. A `#fragment` stays at the end. If `params` encode to nothing,
/// `url` is returned unchanged.
pub fn append_url_query_params(url: &str, params: &Collection, options: &QueryOptions) -> String {
    let query = build_query(params, options);
    if query.is_empty() {
        return url.to_string();
    }

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let mut out = String::with_capacity(url.len() + query.len() + 1);
    out.push_str(base);

    match base.split_once('?') {
        Some((_, existing)) if !existing.is_empty() && !base.ends_with(options.separator.as_str()) => {
            out.push_str(&options.separator);
        }
        Some(_) => {}
        None => out.push('?'),
    }

    out.push_str(&query);

    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }

    tracing::trace!(url = %out, "Appended query parameters");
    out
}

/// Shortens a URL for display: drops the `scheme://` prefix and, when the URL
/// has a path, query or fragment, a trailing `/`.
///
/// # Examples
///
/// ```
/// use utilkit_common::url::format_for_display;
///
/// assert_eq!(format_for_display("https://example.com/"), "example.com");
/// assert_eq!(format_for_display("https://example.com/docs/"), "example.com/docs");
/// ```
pub fn format_for_display(url: &str) -> String {
    let (display, has_non_domain_parts) = match Url::parse(url) {
        Ok(parsed) => {
            let prefix_len = parsed.scheme().len() + "://".len();
            let display = match url.get(..prefix_len) {
                Some(prefix) if prefix.eq_ignore_ascii_case(&format!("{}://", parsed.scheme())) => {
                    &url[prefix_len..]
                }
                _ => url,
            };
            let has_parts = !parsed.path().is_empty()
                || parsed.query().is_some_and(|q| !q.is_empty())
                || parsed.fragment().is_some_and(|f| !f.is_empty());
            (display, has_parts)
        }
        // Without a scheme everything counts as path
        Err(_) => (url, !url.is_empty()),
    };

    match display.strip_suffix('/') {
        Some(trimmed) if has_non_domain_parts => trimmed.to_string(),
        _ => display.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Collection {
        Collection::try_from(Value::from(value)).unwrap()
    }

    #[test]
    fn test_build_query_scalars() {
        let q = build_query(
            &params(json!({"t": true, "n": null, "f": false, "x": 1.5, "s": "a b"})),
            &QueryOptions::default(),
        );
        assert_eq!(q, "t=1&f=0&x=1.5&s=a+b");
    }

    #[test]
    fn test_build_query_rfc3986() {
        let options = QueryOptions::default().with_encoding(QueryEncoding::Rfc3986);
        assert_eq!(build_query(&params(json!({"s": "a b~*"})), &options), "s=a%20b~%2A");
        assert_eq!(
            build_query(&params(json!({"s": "a b~*"})), &QueryOptions::default()),
            "s=a+b%7E%2A"
        );
    }

    #[test]
    fn test_build_query_literal_plus_survives_rfc3986() {
        let options = QueryOptions::default().with_encoding(QueryEncoding::Rfc3986);
        assert_eq!(build_query(&params(json!({"s": "1+1"})), &options), "s=1%2B1");
    }

    #[test]
    fn test_build_query_nested() {
        let q = build_query(
            &params(json!({"f": {"tag": ["x", "y"]}, "empty": []})),
            &QueryOptions::default(),
        );
        assert_eq!(q, "f%5Btag%5D%5B0%5D=x&f%5Btag%5D%5B1%5D=y");
    }

    #[test]
    fn test_build_query_numeric_prefix_top_level_only() {
        let options = QueryOptions::default().with_numeric_prefix("p_");
        assert_eq!(build_query(&params(json!(["a", ["b"]])), &options), "p_0=a&p_1%5B0%5D=b");
    }

    #[test]
    fn test_build_query_custom_separator() {
        let options = QueryOptions::default().with_separator(";");
        assert_eq!(build_query(&params(json!({"a": 1, "b": 2})), &options), "a=1;b=2");
    }

    #[test]
    fn test_append_to_plain_url() {
        let p = params(json!({"q": "rust"}));
        let o = QueryOptions::default();
        assert_eq!(append_url_query_params("https://x.io/s", &p, &o), "https://x.io/s?q=rust");
        assert_eq!(append_url_query_params("https://x.io/s?", &p, &o), "https://x.io/s?q=rust");
    }

    #[test]
    fn test_append_to_existing_query() {
        let p = params(json!({"q": "rust"}));
        let o = QueryOptions::default();
        assert_eq!(
            append_url_query_params("https://x.io/s?page=2", &p, &o),
            "https://x.io/s?page=2&q=rust"
        );
        assert_eq!(
            append_url_query_params("https://x.io/s?page=2&", &p, &o),
            "https://x.io/s?page=2&q=rust"
        );
    }

    #[test]
    fn test_append_keeps_fragment_last() {
        let p = params(json!({"q": "rust"}));
        assert_eq!(
            append_url_query_params("/s?a=1#top", &p, &QueryOptions::default()),
            "/s?a=1&q=rust#top"
        );
    }

    #[test]
    fn test_append_nothing_to_add() {
        let o = QueryOptions::default();
        assert_eq!(append_url_query_params("/s", &Collection::new(), &o), "/s");
        assert_eq!(append_url_query_params("/s", &params(json!({"a": null})), &o), "/s");
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display("https://example.com"), "example.com");
        assert_eq!(format_for_display("https://example.com/"), "example.com");
        assert_eq!(format_for_display("HTTP://Example.com/a/"), "Example.com/a");
        assert_eq!(format_for_display("http://example.com/a?b=c"), "example.com/a?b=c");
        assert_eq!(format_for_display("example.com/docs/"), "example.com/docs");
        assert_eq!(format_for_display(""), "");
    }

    #[test]
    fn test_query_encoding_values() {
        assert_eq!(QueryEncoding::values(), vec!["RFC1738", "RFC3986"]);
        assert_eq!(QueryEncoding::default(), QueryEncoding::Rfc1738);
    }
}
