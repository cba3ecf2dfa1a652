use crate::models::{SurveyOption, SurveyQuestion};
use crate::services::ReferenceData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("tag {tag} is not an option of question {question}")]
    UnknownOption { question: String, tag: String },
}

/// Questions paired with their eligible tags
#[derive(Debug, Clone)]
pub struct SurveyCatalog {
    reference: Arc<ReferenceData>,
}

impl SurveyCatalog {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn questions(&self) -> Vec<SurveyQuestion> {
        self.reference
            .questions
            .iter()
            .map(|q| SurveyQuestion {
                question_id: q.id.clone(),
                prompt: q.prompt.clone(),
                tag_class_id: q.tag_class_id.clone(),
                options: self.reference.options_for(q).map(SurveyOption::from).collect(),
            })
            .collect()
    }

    pub fn is_option(&self, question_id: &str, tag_id: &str) -> Result<bool, SurveyError> {
        let question = self
            .reference
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| SurveyError::UnknownQuestion(question_id.to_string()))?;

        Ok(self.reference.options_for(question).any(|t| t.id == tag_id))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.reference.questions.iter().map(|q| q.id.as_str())
    }
}

/// Caller-held survey state, filled in one selection at a time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySession {
    answers: BTreeMap<String, Vec<String>>,
}

impl SurveySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `tag_id` for `question_id`; re-selecting is a no-op
    pub fn select(
        &mut self,
        catalog: &SurveyCatalog,
        question_id: &str,
        tag_id: &str,
    ) -> Result<(), SurveyError> {
        if !catalog.is_option(question_id, tag_id)? {
            return Err(SurveyError::UnknownOption {
                question: question_id.to_string(),
                tag: tag_id.to_string(),
            });
        }

        let selected = self.answers.entry(question_id.to_string()).or_default();
        if !selected.iter().any(|t| t == tag_id) {
            selected.push(tag_id.to_string());
        }
        Ok(())
    }

    /// Uncheck a tag; returns whether it was selected
    pub fn deselect(&mut self, question_id: &str, tag_id: &str) -> bool {
        let Some(selected) = self.answers.get_mut(question_id) else {
            return false;
        };
        let before = selected.len();
        selected.retain(|t| t != tag_id);
        let removed = selected.len() != before;
        if selected.is_empty() {
            self.answers.remove(question_id);
        }
        removed
    }

    pub fn selected(&self, question_id: &str) -> &[String] {
        self.answers.get(question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn missing(&self, catalog: &SurveyCatalog) -> Vec<String> {
        catalog
            .question_ids()
            .filter(|id| self.selected(id).is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_complete(&self, catalog: &SurveyCatalog) -> bool {
        self.missing(catalog).is_empty()
    }

    pub fn into_responses(self) -> HashMap<String, Vec<String>> {
        self.answers.into_iter().collect()
    }
}
