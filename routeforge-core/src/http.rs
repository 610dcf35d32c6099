// HTTP verbs recognized by the route table

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// HTTP methods a resource method can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    /// Order in which verb bindings are checked on a single method.
    ///
    /// When a method carries more than one binding, the first verb of this
    /// list that is present wins.
    pub const CHECK_ORDER: [HttpMethod; 5] = [
        HttpMethod::DELETE,
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
    ];

    /// Parse a method name, ignoring case
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

// Methods order by name, not by declaration, so that table iteration and the
// route tie-break agree with a plain string comparison of the verb.
impl Ord for HttpMethod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for HttpMethod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!(HttpMethod::from_str("get"), Some(HttpMethod::GET));
        assert_eq!(HttpMethod::from_str("Patch"), Some(HttpMethod::PATCH));
        assert_eq!(HttpMethod::from_str("DELETE"), Some(HttpMethod::DELETE));
        assert_eq!(HttpMethod::from_str("HEAD"), None);
        assert_eq!(HttpMethod::from_str(""), None);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut methods = vec![
            HttpMethod::PUT,
            HttpMethod::GET,
            HttpMethod::POST,
            HttpMethod::DELETE,
            HttpMethod::PATCH,
        ];
        methods.sort();
        assert_eq!(
            methods,
            vec![
                HttpMethod::DELETE,
                HttpMethod::GET,
                HttpMethod::PATCH,
                HttpMethod::POST,
                HttpMethod::PUT,
            ]
        );
    }

    #[test]
    fn test_check_order_starts_with_delete() {
        assert_eq!(HttpMethod::CHECK_ORDER[0], HttpMethod::DELETE);
        assert_eq!(HttpMethod::CHECK_ORDER[4], HttpMethod::PATCH);
    }

    #[test]
    fn test_display() {
        assert_eq!(HttpMethod::POST.to_string(), "POST");
    }
}
