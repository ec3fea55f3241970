//! URL query-string representation of the dashboard state
//!
//! `QueryParams` is the flat key/value multi-map the browser sees. The codec
//! maps it to and from `FilterState`; the compare set rides along in its own
//! `compare` key.

mod codec;
mod compare;

pub use codec::{decode, encode};
pub use compare::{COMPARE_KEY, CompareSet, MAX_COMPARE, MIN_COMPARE};

/// Ordered multi-map of query parameters. Lookups return the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string or a full URL.
    ///
    /// Anything before `?` and after `#` is ignored, `+` means space, and
    /// malformed percent escapes are kept verbatim. Never fails.
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or_default();
        let query = match without_fragment.find('?') {
            Some(idx) => &without_fragment[idx + 1..],
            None => without_fragment,
        };

        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = decode_component(parts.next()?);
                let value = decode_component(parts.next().unwrap_or(""));
                if key.is_empty() {
                    None
                } else {
                    Some((key, value))
                }
            })
            .collect();

        Self { pairs }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize without a leading `?`. Commas stay literal so list values
    /// remain readable.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%2C", ",")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
