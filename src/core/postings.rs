use crate::models::{Posting, WorkCompany, WorkPosition};
use crate::services::ReferenceData;
use std::collections::{HashMap, HashSet};

/// Job postings joined to catalog jobs
///
/// jobs -> jobs_to_worknet (job id) -> worknet_positions (work code)
/// -> worknet_company (company id). All joins are inner joins; the result is
/// computed once.
#[derive(Debug, Clone, Default)]
pub struct PostingMatcher {
    postings: Vec<Posting>,
}

impl PostingMatcher {
    pub fn new(reference: &ReferenceData) -> Self {
        let mut positions_by_code: HashMap<i64, Vec<&WorkPosition>> = HashMap::new();
        for position in &reference.work_positions {
            positions_by_code.entry(position.work_code).or_default().push(position);
        }

        let companies: HashMap<i64, &WorkCompany> = reference
            .work_companies
            .iter()
            .map(|c| (c.id, c))
            .collect();

        let mut postings = Vec::new();
        for job in &reference.jobs {
            let codes = reference
                .job_worknet
                .iter()
                .filter(|row| row.job_id == job.id)
                .map(|row| row.work_code);

            for code in codes {
                let Some(positions) = positions_by_code.get(&code) else {
                    continue;
                };
                for position in positions {
                    let Some(company) = companies.get(&position.company_id) else {
                        continue;
                    };
                    postings.push(Posting {
                        position_id: position.id,
                        job: job.name.clone(),
                        recruit: position.recruit.clone(),
                        company: company.name.clone(),
                        description: [&position.description_1, &position.description_2]
                            .into_iter()
                            .filter(|line| !line.is_empty())
                            .cloned()
                            .collect(),
                        condition: position.condition.clone(),
                        date: position.date.clone(),
                        link: position.link.clone(),
                    });
                }
            }
        }

        tracing::debug!("Joined {} postings", postings.len());
        Self { postings }
    }

    /// Distinct job names that have postings, first-seen order
    pub fn job_titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.postings
            .iter()
            .map(|p| p.job.as_str())
            .filter(|job| seen.insert(*job))
            .collect()
    }

    pub fn postings_for_job(&self, job_name: &str) -> Vec<&Posting> {
        self.postings.iter().filter(|p| p.job == job_name).collect()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, JobWorknet};

    fn position(id: i64, company_id: i64, work_code: i64) -> WorkPosition {
        WorkPosition {
            id,
            company_id,
            work_code,
            recruit: format!("Opening {}", id),
            description_1: "Rust services".to_string(),
            description_2: String::new(),
            condition: "Full time".to_string(),
            date: "~ 05/31".to_string(),
            link: format!("https://jobs.example/{}", id),
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData {
            jobs: vec![
                Job { id: "1".into(), name: "Backend developer".into() },
                Job { id: "2".into(), name: "Designer".into() },
                Job { id: "3".into(), name: "Pilot".into() },
            ],
            job_worknet: vec![
                JobWorknet { job_id: "1".into(), work_code: 10 },
                JobWorknet { job_id: "2".into(), work_code: 20 },
                JobWorknet { job_id: "3".into(), work_code: 30 },
            ],
            work_companies: vec![WorkCompany { id: 1, name: "Acme".into() }],
            work_positions: vec![position(1, 1, 10), position(2, 1, 10), position(3, 1, 20), position(4, 7, 30)],
            ..Default::default()
        }
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let matcher = PostingMatcher::new(&reference());
        assert_eq!(matcher.len(), 3);
        assert_eq!(matcher.job_titles(), vec!["Backend developer", "Designer"]);
    }

    #[test]
    fn test_postings_for_job() {
        let matcher = PostingMatcher::new(&reference());
        let postings = matcher.postings_for_job("Backend developer");
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].company, "Acme");
        assert_eq!(postings[0].description, vec!["Rust services"]);
        assert!(matcher.postings_for_job("Pilot").is_empty());
    }
}
