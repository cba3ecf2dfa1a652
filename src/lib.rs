//! Career Compass - survey-driven career guidance service
//!
//! The core is a tag-overlap job recommender: survey answers select tags,
//! jobs are ranked by how many of their tags were selected, and the ranking
//! is cut into display tiers. Around it sit an education-program matcher,
//! a job-posting matcher, NCS job browsing, yearly hiring trends and a
//! small bulletin board, all served as JSON.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{JobRecommender, RecommendError, RecommendResult, SurveyCatalog, SurveySession};
pub use models::{Recommendation, SubmitSurveyRequest, Tier, TierPolicy};
pub use services::{ReferenceData, ReferenceError, SqliteClient};
