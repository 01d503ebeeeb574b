//! URI and query-string helpers
//!
//! Encoding follows `application/x-www-form-urlencoded` via the `url` crate.

use url::Url;
use url::form_urlencoded;

use crate::Value;

#[derive(Debug, thiserror::Error)]
pub enum UriError {
    #[error("Invalid URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("Query parameters must be an object, got {0}")]
    NotAnObject(crate::ValueKind),
}

/// Encode key/value pairs as a query string (no leading `?`)
pub fn query_string<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Encode an object `Value` as a query string.
///
/// Arrays repeat their key once per item, null/undefined entries are
/// skipped, and nested objects are flattened as `outer[inner]`.
pub fn query_from_object(params: &Value) -> Result<String, UriError> {
    let Value::Object(map) = params else {
        return Err(UriError::NotAnObject(crate::classify::kind(params)));
    };
    let mut pairs = Vec::new();
    for (key, value) in map {
        collect_pairs(key, value, &mut pairs);
    }
    Ok(query_string(pairs))
}

fn collect_pairs(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Undefined | Value::Null | Value::Function(_) => {}
        Value::Array(items) => {
            for item in items {
                collect_pairs(key, item, out);
            }
        }
        Value::Object(map) => {
            for (inner, v) in map {
                collect_pairs(&format!("{key}[{inner}]"), v, out);
            }
        }
        other => out.push((key.to_string(), other.to_string())),
    }
}

/// Decode a query string; a leading `?` is ignored
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Resolve `path` against `base` and append `params` to its query
pub fn build_url(base: &str, path: &str, params: &Value) -> Result<Url, UriError> {
    let mut url = Url::parse(base)?;
    if !path.is_empty() {
        url = url.join(path)?;
    }
    if !matches!(params, Value::Undefined | Value::Null) {
        let encoded = query_from_object(params)?;
        if !encoded.is_empty() {
            url.query_pairs_mut().extend_pairs(parse_query(&encoded));
        }
    }
    tracing::trace!("Built URL {}", url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes() {
        assert_eq!(query_string([("q", "a b"), ("x", "1&2")]), "q=a+b&x=1%262");
        assert_eq!(query_string(Vec::<(&str, &str)>::new()), "");
    }

    #[test]
    fn test_query_from_object() {
        let params = Value::object([
            ("tags", Value::from(vec!["a", "b"])),
            ("page", Value::from(2i64)),
            ("skip", Value::Null),
            ("filter", Value::object([("kind", Value::from("post"))])),
        ]);
        assert_eq!(
            query_from_object(&params).unwrap(),
            "filter%5Bkind%5D=post&page=2&tags=a&tags=b"
        );
    }

    #[test]
    fn test_query_from_non_object() {
        let err = query_from_object(&Value::from("x")).unwrap_err();
        assert!(matches!(err, UriError::NotAnObject(crate::ValueKind::String)));
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_query("?a=1&b=two+words&a=3"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_build_url() {
        let url = build_url(
            "https://example.com/api/",
            "items",
            &Value::object([("id", Value::from(7i64))]),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/items?id=7");

        let bare = build_url("https://example.com", "", &Value::Undefined).unwrap();
        assert_eq!(bare.as_str(), "https://example.com/");
    }

    #[test]
    fn test_build_url_rejects_relative_base() {
        assert!(matches!(
            build_url("/relative", "x", &Value::Null),
            Err(UriError::Parse(_))
        ));
    }
}
