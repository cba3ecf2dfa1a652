use serde::{Deserialize, Serialize};
use crate::models::domain::{Recommendation, Tag};

/// One survey option as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyOption {
    pub tag_id: String,
    pub label: String,
}

impl From<&Tag> for SurveyOption {
    fn from(tag: &Tag) -> Self {
        Self {
            tag_id: tag.id.clone(),
            label: tag.label.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub question_id: String,
    pub prompt: String,
    pub tag_class_id: String,
    pub options: Vec<SurveyOption>,
}

/// Response for the survey endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub questions: Vec<SurveyQuestion>,
}

/// Response for survey submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendation: Recommendation,
    pub response_id: Option<String>,
    pub audit_logged: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Survey submission rejected because questions were left unanswered
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingResponseBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub missing_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub job_id: String,
    pub name: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Created-row response for board writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}
