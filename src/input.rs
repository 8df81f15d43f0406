//! Normalization of user input before it reaches the provider

use crate::error::{ClientError, InputError};
use url::Url;

/// Split a comma-separated keyword list, trimming each entry and dropping
/// empty ones.
pub fn parse_keyword_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject empty or whitespace-only required fields
pub fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ClientError::Validation { field })
    } else {
        Ok(trimmed)
    }
}

/// Trim and validate a user-supplied URL. Bare hosts get an `https://`
/// scheme, an upper-case scheme is lowered, and anything other than
/// http(s) is rejected. Otherwise the text is passed on as typed.
pub fn normalize_url(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    let invalid = || InputError::InvalidUrl(trimmed.to_string());

    let candidate = match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            // Url lowercases the scheme; keep the rest as typed
            format!("{}{}", url.scheme(), &trimmed[url.scheme().len()..])
        }
        // "example.com:8080" parses with "example.com" as its scheme
        Ok(_) if !trimmed.contains("://") => format!("https://{}", trimmed),
        Ok(_) => return Err(invalid()),
        Err(url::ParseError::RelativeUrlWithoutBase) => format!("https://{}", trimmed),
        Err(_) => return Err(invalid()),
    };

    let url = Url::parse(&candidate).map_err(|_| invalid())?;
    if url.host_str().map_or(true, str::is_empty) || !url.username().is_empty() {
        return Err(invalid());
    }
    Ok(candidate)
}

/// Host name for labels; falls back to the input when it does not parse
pub fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_list_drops_blank_segments() {
        assert_eq!(parse_keyword_list("pizza, , delivery"), vec!["pizza", "delivery"]);
        assert_eq!(parse_keyword_list("pizza, , delivery,  "), vec!["pizza", "delivery"]);
    }

    #[test]
    fn keyword_list_empty_input() {
        assert!(parse_keyword_list("").is_empty());
        assert!(parse_keyword_list(" , ,").is_empty());
    }

    #[test]
    fn keyword_list_keeps_inner_spaces_and_order() {
        assert_eq!(
            parse_keyword_list("  pizza delivery ,best pizza near me"),
            vec!["pizza delivery", "best pizza near me"]
        );
    }

    #[test]
    fn require_non_empty_rejects_whitespace() {
        assert!(matches!(
            require_non_empty("location", "   "),
            Err(ClientError::Validation { field: "location" })
        ));
        assert_eq!(require_non_empty("location", " Austin ").unwrap(), "Austin");
    }

    #[test]
    fn normalize_url_adds_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
        assert_eq!(
            normalize_url(" http://example.com/page ").unwrap(),
            "http://example.com/page"
        );
    }

    #[test]
    fn normalize_url_lowers_scheme_case() {
        assert_eq!(
            normalize_url("HTTPS://Example.com/page").unwrap(),
            "https://Example.com/page"
        );
        assert_eq!(normalize_url("Http://example.com").unwrap(), "http://example.com");
    }

    #[test]
    fn normalize_url_rejects_other_schemes() {
        assert_eq!(
            normalize_url("ftp://example.com"),
            Err(InputError::InvalidUrl("ftp://example.com".to_string()))
        );
        assert!(normalize_url("file:///etc/hosts").is_err());
        assert!(normalize_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn normalize_url_bare_host_with_port() {
        assert_eq!(normalize_url("localhost:3000").unwrap(), "https://localhost:3000");
        assert_eq!(
            normalize_url("example.com:8080/shop").unwrap(),
            "https://example.com:8080/shop"
        );
    }

    #[test]
    fn normalize_url_rejects_garbage() {
        assert_eq!(
            normalize_url("not a url"),
            Err(InputError::InvalidUrl("not a url".to_string()))
        );
    }

    #[test]
    fn display_host_strips_scheme_and_path() {
        assert_eq!(display_host("https://www.example.com/a/b?c=1"), "www.example.com");
        assert_eq!(display_host("not a url"), "not a url");
    }
}
