/// Methods advertised on every gate response
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Request headers advertised on every gate response
pub const ALLOW_HEADERS: &str = "authorization, content-type";

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS_HEADER: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS_HEADER: &str = "Access-Control-Allow-Headers";

/// Origins permitted to call the gate from a browser
///
/// Fixed at startup. Membership is an exact string comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginAllowlist {
    origins: Vec<String>,
}

impl OriginAllowlist {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for origin in origins {
            let origin = origin.into();
            if !list.contains(&origin) {
                list.push(origin);
            }
        }
        Self { origins: list }
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// CORS header set attached to a single response
///
/// A caller outside the allowlist still gets `Access-Control-Allow-Origin`,
/// with an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    allow_origin: String,
}

impl CorsHeaders {
    /// Resolve the header set for a request's `Origin` (absent counts as `""`)
    pub fn resolve(allowlist: &OriginAllowlist, origin: Option<&str>) -> Self {
        let origin = origin.unwrap_or("");
        let allow_origin = if allowlist.contains(origin) {
            origin.to_string()
        } else {
            String::new()
        };

        Self { allow_origin }
    }

    pub fn allow_origin(&self) -> &str {
        &self.allow_origin
    }

    pub fn is_allowed(&self) -> bool {
        !self.allow_origin.is_empty()
    }

    /// Header name/value pairs in a fixed order
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (ALLOW_ORIGIN_HEADER, self.allow_origin.as_str()),
            (ALLOW_METHODS_HEADER, ALLOW_METHODS),
            (ALLOW_HEADERS_HEADER, ALLOW_HEADERS),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> OriginAllowlist {
        OriginAllowlist::new(["https://app.example.com", "http://localhost:5173"])
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        let cors = CorsHeaders::resolve(&allowlist(), Some("http://localhost:5173"));
        assert_eq!(cors.allow_origin(), "http://localhost:5173");
        assert!(cors.is_allowed());
    }

    #[test]
    fn test_unknown_origin_gets_empty_value() {
        let cors = CorsHeaders::resolve(&allowlist(), Some("https://evil.example.com"));
        assert_eq!(cors.allow_origin(), "");
        assert!(!cors.is_allowed());
    }

    #[test]
    fn test_absent_origin_gets_empty_value() {
        let cors = CorsHeaders::resolve(&allowlist(), None);
        assert_eq!(cors.allow_origin(), "");
    }

    #[test]
    fn test_match_is_exact() {
        let list = allowlist();
        assert!(!list.contains("https://app.example.com/"));
        assert!(!list.contains("HTTPS://APP.EXAMPLE.COM"));
        assert!(!list.contains("https://sub.app.example.com"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_empty_allowlist_never_allows_empty_origin() {
        let cors = CorsHeaders::resolve(&OriginAllowlist::default(), Some(""));
        assert!(!cors.is_allowed());
        assert_eq!(cors.allow_origin(), "");
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let list = OriginAllowlist::new(["b", "a", "b"]);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_pairs_shape() {
        let cors = CorsHeaders::resolve(&allowlist(), None);
        let names: Vec<_> = cors.pairs().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![ALLOW_ORIGIN_HEADER, ALLOW_METHODS_HEADER, ALLOW_HEADERS_HEADER]
        );
        assert_eq!(cors.pairs()[1].1, "POST, OPTIONS");
        assert_eq!(cors.pairs()[2].1, "authorization, content-type");
    }
}
