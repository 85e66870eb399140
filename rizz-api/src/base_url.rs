use crate::error::ApiError;
use crate::request::Visibility;
use reqwest::Url;

const PUBLIC_SUFFIX: &str = "/api";
const PROTECTED_SUFFIX: &str = "/api/p";

/// The pair of API roots derived from one server URL.
///
/// The raw URL may be given with or without its `/api` or `/api/p` suffix;
/// `http://host:8099`, `http://host:8099/api` and `http://host:8099/api/p`
/// all resolve to the same pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    public: String,
    protected: String,
}

impl BaseUrls {
    pub fn from_raw(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let root = trimmed
            .strip_suffix(PROTECTED_SUFFIX)
            .or_else(|| trimmed.strip_suffix(PUBLIC_SUFFIX))
            .unwrap_or(trimmed);

        let url = Url::parse(root).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{raw}: must be an http(s) URL"
            )));
        }

        Ok(Self {
            public: format!("{root}{PUBLIC_SUFFIX}"),
            protected: format!("{root}{PROTECTED_SUFFIX}"),
        })
    }

    pub fn public(&self) -> &str {
        &self.public
    }

    pub fn protected(&self) -> &str {
        &self.protected
    }

    pub fn for_visibility(&self, visibility: Visibility) -> &str {
        match visibility {
            Visibility::Public => &self.public,
            Visibility::Protected => &self.protected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_are_normalized() {
        let expected = BaseUrls::from_raw("http://10.0.0.1:8099").unwrap();
        for raw in [
            "http://10.0.0.1:8099/",
            "http://10.0.0.1:8099/api",
            "http://10.0.0.1:8099/api/",
            "http://10.0.0.1:8099/api/p",
        ] {
            assert_eq!(BaseUrls::from_raw(raw).unwrap(), expected, "{raw}");
        }
        assert_eq!(expected.public(), "http://10.0.0.1:8099/api");
        assert_eq!(expected.protected(), "http://10.0.0.1:8099/api/p");
    }

    #[test]
    fn test_keeps_path_prefix() {
        let urls = BaseUrls::from_raw("https://example.com/rizz/api").unwrap();
        assert_eq!(urls.public(), "https://example.com/rizz/api");
        assert_eq!(urls.for_visibility(Visibility::Protected), "https://example.com/rizz/api/p");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(BaseUrls::from_raw("").is_err());
        assert!(BaseUrls::from_raw("not a url").is_err());
        assert!(BaseUrls::from_raw("ftp://example.com/api").is_err());
    }
}
