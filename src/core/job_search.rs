use crate::models::JobCategory;
use crate::services::ReferenceData;
use std::collections::HashSet;

/// NCS duties grouped by mid-category
///
/// A duty is listed when it appears in `job_info`, `job_tag` and `job_int`
/// alike. Each `(category, duty)` pair is listed once.
#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    categories: Vec<JobCategory>,
}

impl JobSearch {
    pub fn new(reference: &ReferenceData) -> Self {
        let tagged: HashSet<&str> = reference.job_duty_tags.iter().map(|row| row.duty.as_str()).collect();
        let introduced: HashSet<&str> = reference.job_intros.iter().map(|row| row.duty.as_str()).collect();

        let mut categories: Vec<JobCategory> = Vec::new();
        for info in &reference.job_info {
            if !tagged.contains(info.duty.as_str()) || !introduced.contains(info.duty.as_str()) {
                continue;
            }

            let index = match categories.iter().position(|c| c.name == info.category) {
                Some(index) => index,
                None => {
                    categories.push(JobCategory {
                        name: info.category.clone(),
                        jobs: Vec::new(),
                    });
                    categories.len() - 1
                }
            };

            let jobs = &mut categories[index].jobs;
            if !jobs.contains(&info.duty) {
                jobs.push(info.duty.clone());
            }
        }

        tracing::debug!("Job search: {} categories", categories.len());
        Self { categories }
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> &[JobCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&JobCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobDutyTag, JobInfo, JobIntro};

    fn info(duty: &str, category: &str) -> JobInfo {
        JobInfo { duty: duty.into(), category: category.into() }
    }

    fn reference() -> ReferenceData {
        ReferenceData {
            job_info: vec![
                info("응용SW엔지니어링", "정보기술"),
                info("유선통신구축", "통신기술"),
                info("응용SW엔지니어링", "정보기술"),
                info("DB엔지니어링", "정보기술"),
                info("방송제작기술", "방송기술"),
            ],
            job_duty_tags: ["응용SW엔지니어링", "유선통신구축", "DB엔지니어링", "방송제작기술"]
                .iter()
                .map(|d| JobDutyTag { duty: d.to_string() })
                .collect(),
            job_intros: ["응용SW엔지니어링", "유선통신구축", "DB엔지니어링"]
                .iter()
                .map(|d| JobIntro { duty: d.to_string(), ncs_code: None })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_joined_duties_by_category() {
        let search = JobSearch::new(&reference());

        let names: Vec<&str> = search.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["정보기술", "통신기술"]);
        assert_eq!(
            search.category("정보기술").unwrap().jobs,
            vec!["응용SW엔지니어링", "DB엔지니어링"]
        );
    }

    #[test]
    fn test_duty_missing_from_a_relation_is_dropped() {
        let search = JobSearch::new(&reference());
        assert!(search.category("방송기술").is_none());
        assert!(JobSearch::new(&ReferenceData::default()).categories().is_empty());
    }
}
