use crate::core::filters::ProgramFilter;
use crate::models::{EduCompany, Job, ProgramMatch};
use crate::services::ReferenceData;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EduError {
    #[error("no education programs are related to job: {0}")]
    UnknownJob(String),
}

/// Matches jobs to education programs through their NCS codes
#[derive(Debug, Clone)]
pub struct EduMatcher {
    reference: Arc<ReferenceData>,
    /// Indices into `reference.jobs`
    related_jobs: Vec<usize>,
    regions: Vec<String>,
}

impl EduMatcher {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        let program_codes: HashSet<&str> = reference
            .edu_programs
            .iter()
            .map(|p| p.ncs_code.as_str())
            .collect();

        let related_ids: HashSet<&str> = reference
            .ncs_jobs
            .iter()
            .filter(|row| program_codes.contains(row.ncs_code.as_str()))
            .map(|row| row.job_id.as_str())
            .collect();

        let related_jobs: Vec<usize> = reference
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| related_ids.contains(job.id.as_str()))
            .map(|(i, _)| i)
            .collect();

        let regions: Vec<String> = reference
            .edu_companies
            .iter()
            .filter_map(EduCompany::region)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        tracing::debug!(
            "Education matcher: {} related jobs, {} regions",
            related_jobs.len(),
            regions.len()
        );

        Self {
            reference,
            related_jobs,
            regions,
        }
    }

    /// Jobs with at least one matching program, in catalog order
    pub fn related_jobs(&self) -> Vec<&Job> {
        self.related_jobs.iter().map(|&i| &self.reference.jobs[i]).collect()
    }

    /// Sorted distinct company regions
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Programs teaching `job_name`'s NCS codes that pass `filter`
    pub fn programs_for_job(
        &self,
        job_name: &str,
        filter: &ProgramFilter,
    ) -> Result<Vec<ProgramMatch>, EduError> {
        let job = self
            .related_jobs()
            .into_iter()
            .find(|job| job.name == job_name)
            .ok_or_else(|| EduError::UnknownJob(job_name.to_string()))?;

        let codes: HashSet<&str> = self
            .reference
            .ncs_jobs
            .iter()
            .filter(|row| row.job_id == job.id)
            .map(|row| row.ncs_code.as_str())
            .collect();

        let companies: HashMap<i64, &EduCompany> = self
            .reference
            .edu_companies
            .iter()
            .map(|c| (c.id, c))
            .collect();

        let programs: Vec<ProgramMatch> = self
            .reference
            .edu_programs
            .iter()
            .filter(|p| codes.contains(p.ncs_code.as_str()))
            .filter_map(|p| {
                let company = companies.get(&p.company_id).copied();
                let region = company.and_then(EduCompany::region);
                filter.accepts(p, region).then(|| ProgramMatch {
                    program_id: p.id,
                    name: p.name.clone(),
                    company: company.map(|c| c.name.clone()),
                    region: region.map(str::to_string),
                    start_date: p.start_date(),
                    end_date: p.end_date(),
                    cost: p.cost,
                    out_of_pocket: p.oopc,
                    online_status: p.online_status.clone(),
                    employment_status: p.employment_status.clone(),
                    link: p.link.clone(),
                })
            })
            .collect();

        tracing::debug!("Found {} programs for job {}", programs.len(), job_name);
        Ok(programs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::{OFFLINE_STATUS, ONLINE_STATUS};
    use crate::models::{DeliveryMode, EduProgram, NcsJob};

    fn program(id: i64, company_id: i64, code: &str, status: &str, oopc: i64) -> EduProgram {
        EduProgram {
            id,
            company_id,
            name: format!("Program {}", id),
            date_start: Some(20240101 + id),
            date_end: Some(20240601),
            cost: 500_000,
            oopc,
            link: format!("https://edu.example/{}", id),
            online_status: status.to_string(),
            employment_status: "재직자".to_string(),
            ncs_code: code.to_string(),
        }
    }

    fn matcher() -> EduMatcher {
        EduMatcher::new(Arc::new(ReferenceData {
            jobs: vec![
                Job { id: "1".into(), name: "Backend developer".into() },
                Job { id: "2".into(), name: "Network engineer".into() },
                Job { id: "3".into(), name: "Broadcaster".into() },
            ],
            ncs_jobs: vec![
                NcsJob { job_id: "1".into(), ncs_code: "A".into() },
                NcsJob { job_id: "2".into(), ncs_code: "B".into() },
                NcsJob { job_id: "3".into(), ncs_code: "Z".into() },
            ],
            edu_companies: vec![
                EduCompany { id: 1, name: "Seoul Academy".into(), address: Some("서울 강남구".into()) },
                EduCompany { id: 2, name: "Busan Academy".into(), address: Some("부산 해운대구".into()) },
                EduCompany { id: 3, name: "Remote".into(), address: None },
            ],
            edu_programs: vec![
                program(1, 1, "A", ONLINE_STATUS, 0),
                program(2, 2, "A", OFFLINE_STATUS, 10_000),
                program(3, 9, "A", ONLINE_STATUS, 0),
                program(4, 1, "B", OFFLINE_STATUS, 0),
            ],
            ..Default::default()
        }))
    }

    #[test]
    fn test_related_jobs_and_regions() {
        let matcher = matcher();
        let names: Vec<&str> = matcher.related_jobs().iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["Backend developer", "Network engineer"]);
        assert_eq!(matcher.regions(), ["부산".to_string(), "서울".to_string()]);
    }

    #[test]
    fn test_programs_left_join_companies() {
        let programs = matcher()
            .programs_for_job("Backend developer", &ProgramFilter::default())
            .unwrap();
        assert_eq!(programs.len(), 3);
        assert_eq!(programs[0].company.as_deref(), Some("Seoul Academy"));
        assert_eq!(programs[2].company, None);
    }

    #[test]
    fn test_filters_narrow_programs() {
        let matcher = matcher();
        let online = ProgramFilter { mode: DeliveryMode::OnlineOnly, ..Default::default() };
        let ids: Vec<i64> = matcher
            .programs_for_job("Backend developer", &online)
            .unwrap()
            .iter()
            .map(|p| p.program_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let busan = ProgramFilter { regions: vec!["부산".into()], ..Default::default() };
        let programs = matcher.programs_for_job("Backend developer", &busan).unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].program_id, 2);

        let free = ProgramFilter { without_fee: true, regions: vec!["부산".into()], ..Default::default() };
        assert!(matcher.programs_for_job("Backend developer", &free).unwrap().is_empty());
    }

    #[test]
    fn test_unrelated_job_rejected() {
        let err = matcher()
            .programs_for_job("Broadcaster", &ProgramFilter::default())
            .unwrap_err();
        assert_eq!(err, EduError::UnknownJob("Broadcaster".into()));
    }
}
