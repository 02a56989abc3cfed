use serde::Serialize;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success with a confirmation message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }
}

/// Login payload: the account without its password, plus the token.
#[derive(Debug, Serialize)]
pub struct LoginDto {
    pub user: crate::models::user::User,
    pub token: String,
}

/// About content with the bio pre-split for rendering.
#[derive(Debug, Serialize)]
pub struct AboutDto {
    #[serde(flatten)]
    pub content: crate::models::content::AboutContent,
    pub paragraphs: Vec<String>,
}

impl From<crate::models::content::AboutContent> for AboutDto {
    fn from(content: crate::models::content::AboutContent) -> Self {
        Self {
            paragraphs: content.paragraphs(),
            content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
}
