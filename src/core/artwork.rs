//! core/artwork.rs
//! Artwork-override support: fetch a replacement cover from an http(s)
//! URL and validate that it actually decodes as an image before anyone
//! gets to accept it.

use thiserror::Error;

use super::types::Artwork;

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("URL must start with http:// or https://")]
    NotHttp,

    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("response is not a decodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Scheme gate, checked before any network traffic.
pub fn validate_url(url: &str) -> Result<(), ArtworkError> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ArtworkError::NotHttp)
    }
}

/// Fetch `url` and return it as accept-able artwork.
///
/// Blocking; callers run this on a worker thread. The bytes must decode
/// as an image, and the stored MIME type comes from the decoded format,
/// not from the server's headers.
pub fn fetch_image(url: &str) -> Result<Artwork, ArtworkError> {
    validate_url(url)?;

    let bytes = reqwest::blocking::get(url.trim())?
        .error_for_status()?
        .bytes()?;

    let format = image::guess_format(&bytes)?;
    // Full decode, not just the magic bytes: a truncated file must fail
    // here rather than at render time.
    image::load_from_memory(&bytes)?;

    Ok(Artwork {
        data: bytes.to_vec(),
        mime: format.to_mime_type().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_pass_validation() {
        assert!(validate_url("http://example.com/a.jpg").is_ok());
        assert!(validate_url("https://example.com/a.jpg").is_ok());
        assert!(validate_url("  https://example.com/a.jpg  ").is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        for url in [
            "ftp://example.com/a.jpg",
            "file:///tmp/a.jpg",
            "example.com/a.jpg",
            "javascript:alert(1)",
            "",
        ] {
            assert!(matches!(validate_url(url), Err(ArtworkError::NotHttp)), "{url}");
        }
    }

    #[test]
    fn fetch_refuses_bad_scheme_before_any_network_io() {
        // No server exists at this URL; the scheme check must fire first.
        assert!(matches!(
            fetch_image("file:///nope.png"),
            Err(ArtworkError::NotHttp)
        ));
    }
}
