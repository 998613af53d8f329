// hbin-net/src/validation.rs
use hbin_common::error::{HbinError, Result};
use url::Url;

/// Validates a URL, ensuring it uses the HTTPS scheme. Plain HTTP is only
/// accepted when `allow_insecure` is set.
pub fn validate_url(url_str: &str, allow_insecure: bool) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| HbinError::ValidationError(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "https" => Ok(()),
        "http" if allow_insecure => {
            tracing::warn!("Using insecure http URL: {}", url_str);
            Ok(())
        }
        scheme => Err(HbinError::ValidationError(format!(
            "Invalid URL scheme for '{url_str}': Must be https, but got '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_only_unless_insecure_allowed() {
        assert!(validate_url("https://releases.example.com/tool/index.json", false).is_ok());
        assert!(validate_url("http://localhost:8080/tool/index.json", false).is_err());
        assert!(validate_url("http://localhost:8080/tool/index.json", true).is_ok());
        assert!(validate_url("ftp://example.com/tool.zip", true).is_err());
        assert!(matches!(
            validate_url("not a url", false),
            Err(HbinError::ValidationError(_))
        ));
    }
}
