use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// A uniform completion request: prompts plus an optional photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    #[serde(default)]
    pub system_prompt: String,
    pub user_prompt: String,
    #[serde(default)]
    pub include_photo: bool,
    /// A `data:<mime>;base64,` URL or a remote image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data: Option<String>,
}

impl EnhanceRequest {
    pub fn text(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            include_photo: false,
            photo_data: None,
        }
    }

    pub fn with_photo(mut self, photo_data: impl Into<String>) -> Self {
        self.include_photo = true;
        self.photo_data = Some(photo_data.into());
        self
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.user_prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("userPrompt is required".into()));
        }
        if self.include_photo
            && self
                .photo_data
                .as_deref()
                .is_none_or(|p| p.trim().is_empty())
        {
            return Err(GatewayError::InvalidRequest(
                "includePhoto is set but photoData is missing".into(),
            ));
        }
        Ok(())
    }

    /// The photo to attach, if any.
    pub fn photo(&self) -> Option<&str> {
        if self.include_photo {
            self.photo_data.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub content: String,
}

/// The error body returned to browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub image_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_request_wire_format() {
        let req: EnhanceRequest = serde_json::from_str(
            r#"{"systemPrompt":"s","userPrompt":"u","includePhoto":true,"photoData":"data:image/png;base64,AA"}"#,
        )
        .unwrap();
        assert!(req.include_photo);
        assert_eq!(req.photo(), Some("data:image/png;base64,AA"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(EnhanceRequest::text("s", " ").validate().is_err());
        let mut req = EnhanceRequest::text("s", "u");
        req.include_photo = true;
        assert!(matches!(
            req.validate(),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(EnhanceRequest::text("s", "u").validate().is_ok());
    }

    #[test]
    fn test_photo_ignored_when_not_included() {
        let mut req = EnhanceRequest::text("s", "u");
        req.photo_data = Some("data:image/png;base64,AA".into());
        assert_eq!(req.photo(), None);
    }

    #[test]
    fn test_tag_request_optional_fields() {
        let req: TagRequest = serde_json::from_str(r#"{"imageData":"x"}"#).unwrap();
        assert_eq!(req.heading_context, None);
        assert_eq!(req.document_type, None);
    }
}
