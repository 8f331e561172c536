use reqwest::header::{HeaderMap, CONTENT_TYPE};

/// Accepts responses that declare a `text/html` body.
pub fn pass(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .map_or(false, |mime| {
            matches!((mime.type_(), mime.subtype()), (mime::TEXT, mime::HTML))
        })
}

pub fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_pass() {
        assert!(pass(&headers("text/html")));
        assert!(pass(&headers("text/html; charset=utf-8")));
        assert!(!pass(&headers("application/json")));
        assert!(!pass(&headers("text/plain")));
        assert!(!pass(&HeaderMap::new()));
    }
}
