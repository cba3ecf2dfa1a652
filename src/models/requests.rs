use crate::models::domain::DeliveryMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Completed survey submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSurveyRequest {
    /// Question id -> selected tag ids
    #[serde(default)]
    pub responses: HashMap<String, Vec<String>>,
}

/// Education program search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSearchRequest {
    #[validate(length(min = 1))]
    pub job: String,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub mode: DeliveryMode,
    #[serde(default)]
    pub without_fee: bool,
    #[serde(default)]
    pub start_from: Option<NaiveDate>,
}

/// `GET /postings?job=...`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostingQuery {
    #[validate(length(min = 1))]
    pub job: String,
}

/// `GET /board/posts?q=...`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Create or replace a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}
