// Query-string and path assembly for MTM endpoints

use reqwest::Url;

/// Ordered list of query parameters
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn push_opt(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encode the pairs (`application/x-www-form-urlencoded` rules)
    pub fn encode(&self) -> String {
        let mut url = match Url::parse("http://localhost/") {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        url.query().unwrap_or_default().to_string()
    }

    /// Append `?query` to `path` when there is anything to append
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_query_leaves_path() {
        let query = QueryParams::new();
        assert_eq!(query.append_to("/services/mtm/v1/accounts"), "/services/mtm/v1/accounts");
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let mut query = QueryParams::new();
        query.push("page", "1");
        query.push("size", "30");
        query.push_opt("q", None);
        query.push_opt("sort", Some("name-asc".to_string()));
        assert_eq!(query.encode(), "page=1&size=30&sort=name-asc");
    }

    #[test]
    fn test_query_form_encodes_values() {
        let mut query = QueryParams::new();
        query.push("email", "a.b+c@example.com");
        query.push("q", "acme corp&co");
        assert_eq!(
            query.append_to("/users"),
            "/users?email=a.b%2Bc%40example.com&q=acme+corp%26co"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(
            encode_segment("0f6a1b2c-1111-2222-3333-444455556666"),
            "0f6a1b2c-1111-2222-3333-444455556666"
        );
        assert_eq!(encode_segment("../admin"), "..%2Fadmin");
        assert_eq!(encode_segment("a b?c"), "a%20b%3Fc");
    }

    proptest! {
        #[test]
        fn prop_encoded_segment_has_no_delimiters(segment in ".*") {
            let encoded = encode_segment(&segment);
            prop_assert!(!encoded.contains('/'));
            prop_assert!(!encoded.contains('?'));
            prop_assert!(!encoded.contains('#'));
        }
    }
}
