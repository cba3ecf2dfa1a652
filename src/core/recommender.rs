use crate::core::tiers::{group_by_count, select_tiers};
use crate::models::{Recommendation, TierPolicy};
use crate::services::ReferenceData;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned for a single survey submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("missing responses for questions: {}", .questions.join(", "))]
    MissingResponse { questions: Vec<String> },
}

/// Result of scoring one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendResult {
    pub recommendation: Recommendation,
    /// Distinct selected tags in question order; this is what gets audited
    pub selected_tags: Vec<String>,
}

/// Tag-overlap job recommender
///
/// Counts, per job, the tag-to-job rows whose tag the user selected, then
/// ranks jobs by that count and cuts the ranking into display tiers.
/// Holds only immutable reference data.
#[derive(Debug, Clone)]
pub struct JobRecommender {
    reference: Arc<ReferenceData>,
    /// Tag ids per job, aligned with `reference.jobs`
    job_tags: Vec<Vec<String>>,
    policy: TierPolicy,
}

impl JobRecommender {
    /// Build the job -> tags index
    ///
    /// With `dedupe_tag_jobs` a repeated `(tag, job)` row counts once.
    /// Rows naming a job that is not in the catalog are ignored.
    pub fn new(reference: Arc<ReferenceData>, policy: TierPolicy, dedupe_tag_jobs: bool) -> Self {
        let job_tags = {
            let positions: HashMap<&str, usize> = reference
                .jobs
                .iter()
                .enumerate()
                .map(|(i, job)| (job.id.as_str(), i))
                .collect();

            let mut seen: HashSet<(&str, &str)> = HashSet::new();
            let mut job_tags = vec![Vec::new(); reference.jobs.len()];

            for row in &reference.tag_jobs {
                if dedupe_tag_jobs && !seen.insert((row.tag_id.as_str(), row.job_id.as_str())) {
                    continue;
                }
                if let Some(&i) = positions.get(row.job_id.as_str()) {
                    job_tags[i].push(row.tag_id.clone());
                }
            }
            job_tags
        };

        Self {
            reference,
            job_tags,
            policy,
        }
    }

    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Known questions without a non-empty selection, in catalog order
    pub fn missing_questions(&self, responses: &HashMap<String, Vec<String>>) -> Vec<String> {
        self.reference
            .questions
            .iter()
            .filter(|q| responses.get(&q.id).map_or(true, |tags| tags.is_empty()))
            .map(|q| q.id.clone())
            .collect()
    }

    /// Flatten selections into distinct tags, in question then selection order
    ///
    /// Keys for unknown questions are ignored.
    pub fn selected_tags(&self, responses: &HashMap<String, Vec<String>>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.reference
            .questions
            .iter()
            .filter_map(|q| responses.get(&q.id))
            .flatten()
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    /// Match count of every catalog job, in catalog order
    pub fn match_counts(&self, selected: &[String]) -> Vec<(String, usize)> {
        let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();

        self.reference
            .jobs
            .iter()
            .zip(&self.job_tags)
            .map(|(job, tags)| {
                let count = tags.iter().filter(|t| selected.contains(t.as_str())).count();
                (job.name.clone(), count)
            })
            .collect()
    }

    /// Score a complete response set
    pub fn recommend(
        &self,
        responses: &HashMap<String, Vec<String>>,
    ) -> Result<RecommendResult, RecommendError> {
        let missing = self.missing_questions(responses);
        if !missing.is_empty() {
            return Err(RecommendError::MissingResponse { questions: missing });
        }

        let selected_tags = self.selected_tags(responses);
        let groups = group_by_count(self.match_counts(&selected_tags));
        let tiers = select_tiers(groups, &self.policy);

        tracing::debug!(
            "Scored {} selected tags into {} tiers",
            selected_tags.len(),
            tiers.len()
        );

        let recommendation = if tiers.is_empty() {
            Recommendation::NoRecommendation
        } else {
            Recommendation::Ranked { tiers }
        };

        Ok(RecommendResult {
            recommendation,
            selected_tags,
        })
    }
}
