use crate::models::{
    EduCompany, EduProgram, HiringCount, Job, JobDutyTag, JobInfo, JobIntro, JobWorknet, NcsJob,
    Question, Tag, TagClass, TagJob, WorkCompany, WorkPosition,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading reference data
///
/// Every variant means the service cannot recommend anything; callers treat
/// them as fatal at startup.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference data unavailable: {relation} not found at {}", .path.display())]
    Missing { relation: Relation, path: PathBuf },

    #[error("reference data unavailable: failed to read {relation}: {source}")]
    Csv {
        relation: Relation,
        #[source]
        source: csv::Error,
    },

    #[error("reference data unavailable: failed to query {relation}: {source}")]
    Database {
        relation: Relation,
        #[source]
        source: sqlx::Error,
    },

    #[error("reference data unavailable: {relation} line {line}: {message}")]
    Malformed {
        relation: Relation,
        line: u64,
        message: String,
    },

    #[error("reference data unavailable: {0} is empty")]
    Empty(Relation),
}

/// Tabular relations known to the service, by table / CSV file stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Question,
    TagClass,
    Tag,
    TagToJobs,
    Jobs,
    NcsToJobs,
    EduCompany,
    EduProgram,
    JobsToWorknet,
    WorknetCompany,
    WorknetPositions,
    JobInfo,
    JobTag,
    JobIntro,
    HiringTrends,
}

impl Relation {
    pub const ALL: [Relation; 15] = [
        Relation::Question,
        Relation::TagClass,
        Relation::Tag,
        Relation::TagToJobs,
        Relation::Jobs,
        Relation::NcsToJobs,
        Relation::EduCompany,
        Relation::EduProgram,
        Relation::JobsToWorknet,
        Relation::WorknetCompany,
        Relation::WorknetPositions,
        Relation::JobInfo,
        Relation::JobTag,
        Relation::JobIntro,
        Relation::HiringTrends,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Relation::Question => "question",
            Relation::TagClass => "tag_class",
            Relation::Tag => "tag",
            Relation::TagToJobs => "tag_to_jobs",
            Relation::Jobs => "jobs",
            Relation::NcsToJobs => "ncs_to_jobs",
            Relation::EduCompany => "edu_company",
            Relation::EduProgram => "edu_program",
            Relation::JobsToWorknet => "jobs_to_worknet",
            Relation::WorknetCompany => "worknet_company",
            Relation::WorknetPositions => "worknet_positions",
            Relation::JobInfo => "job_info",
            Relation::JobTag => "job_tag",
            Relation::JobIntro => "job_int",
            Relation::HiringTrends => "hiring_trends",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.table())
    }

    /// The recommender cannot run without these
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Relation::Question | Relation::Tag | Relation::TagToJobs | Relation::Jobs
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Immutable reference data, loaded once and shared by every request
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub questions: Vec<Question>,
    pub tag_classes: Vec<TagClass>,
    pub tags: Vec<Tag>,
    pub tag_jobs: Vec<TagJob>,
    pub jobs: Vec<Job>,
    pub ncs_jobs: Vec<NcsJob>,
    pub edu_companies: Vec<EduCompany>,
    pub edu_programs: Vec<EduProgram>,
    pub job_worknet: Vec<JobWorknet>,
    pub work_companies: Vec<WorkCompany>,
    pub work_positions: Vec<WorkPosition>,
    pub job_info: Vec<JobInfo>,
    pub job_duty_tags: Vec<JobDutyTag>,
    pub job_intros: Vec<JobIntro>,
    pub hiring_trends: Vec<HiringCount>,
}

impl ReferenceData {
    /// Load every relation from `<dir>/<table>.csv`
    ///
    /// Optional relations that have no file load as empty.
    pub fn from_csv_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        tracing::info!("Loading reference data from {}", dir.display());

        let data = Self {
            questions: load(dir, Relation::Question)?,
            tag_classes: load(dir, Relation::TagClass)?,
            tags: load(dir, Relation::Tag)?,
            tag_jobs: load(dir, Relation::TagToJobs)?,
            jobs: load(dir, Relation::Jobs)?,
            ncs_jobs: load(dir, Relation::NcsToJobs)?,
            edu_companies: load(dir, Relation::EduCompany)?,
            edu_programs: load(dir, Relation::EduProgram)?,
            job_worknet: load(dir, Relation::JobsToWorknet)?,
            work_companies: load(dir, Relation::WorknetCompany)?,
            work_positions: load(dir, Relation::WorknetPositions)?,
            job_info: load(dir, Relation::JobInfo)?,
            job_duty_tags: load(dir, Relation::JobTag)?,
            job_intros: load(dir, Relation::JobIntro)?,
            hiring_trends: match read_hiring_trends(dir)? {
                Some(rows) => rows,
                None => {
                    tracing::warn!("{} not found in {}, loading it empty", Relation::HiringTrends.file_name(), dir.display());
                    Vec::new()
                }
            },
        };

        data.validate()?;
        Ok(data)
    }

    /// Reject empty required relations and report tag-prefix violations
    pub fn validate(&self) -> Result<(), ReferenceError> {
        if self.questions.is_empty() {
            return Err(ReferenceError::Empty(Relation::Question));
        }
        if self.tags.is_empty() {
            return Err(ReferenceError::Empty(Relation::Tag));
        }
        if self.jobs.is_empty() {
            return Err(ReferenceError::Empty(Relation::Jobs));
        }
        if self.tag_jobs.is_empty() {
            return Err(ReferenceError::Empty(Relation::TagToJobs));
        }

        for tag in self.tag_prefix_violations() {
            tracing::warn!(
                "Tag {} does not start with its tag class id {}",
                tag.id,
                tag.tag_class_id
            );
        }

        tracing::info!(
            "Reference data ready: {} questions, {} tags, {} tag/job rows, {} jobs",
            self.questions.len(),
            self.tags.len(),
            self.tag_jobs.len(),
            self.jobs.len()
        );

        Ok(())
    }

    pub fn tag_prefix_violations(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|tag| !tag.has_class_prefix())
    }

    /// Tags eligible as answers to `question`, in tag catalog order
    pub fn options_for<'a>(&'a self, question: &'a Question) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags
            .iter()
            .filter(move |tag| tag.tag_class_id == question.tag_class_id)
    }

    pub fn job_by_name(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.name == name)
    }
}

/// Read `<dir>/<relation>.csv`, or `None` when the file does not exist
pub fn read_relation<T: DeserializeOwned>(
    dir: &Path,
    relation: Relation,
) -> Result<Option<Vec<T>>, ReferenceError> {
    let path = dir.join(relation.file_name());
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|source| ReferenceError::Csv { relation, source })?;

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| ReferenceError::Csv { relation, source })?;

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(Some(rows))
}

/// Read the wide hiring table: one row per occupation, one column per year
///
/// The first column names the occupation; the other headers are years
/// (`2019` or `2019년`). Counts may carry thousands separators. Blank cells
/// are skipped.
pub fn read_hiring_trends(dir: &Path) -> Result<Option<Vec<HiringCount>>, ReferenceError> {
    let relation = Relation::HiringTrends;
    let path = dir.join(relation.file_name());
    if !path.exists() {
        return Ok(None);
    }

    let csv_error = |source: csv::Error| ReferenceError::Csv { relation, source };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(csv_error)?;

    let years = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .skip(1)
        .map(|header| {
            let digits: String = header.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<i32>().map_err(|_| ReferenceError::Malformed {
                relation,
                line: 1,
                message: format!("header {:?} is not a year", header),
            })
        })
        .collect::<Result<Vec<i32>, _>>()?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());
        let Some(occupation) = record.get(0).filter(|o| !o.is_empty()) else {
            continue;
        };

        for (cell, &year) in record.iter().skip(1).zip(&years) {
            if cell.is_empty() {
                continue;
            }
            let openings = cell.replace(',', "").parse::<i64>().map_err(|_| ReferenceError::Malformed {
                relation,
                line,
                message: format!("{:?} is not a count", cell),
            })?;
            rows.push(HiringCount {
                occupation: occupation.to_string(),
                year,
                openings,
            });
        }
    }

    tracing::debug!("Read {} hiring counts from {}", rows.len(), path.display());
    Ok(Some(rows))
}

fn load<T: DeserializeOwned>(dir: &Path, relation: Relation) -> Result<Vec<T>, ReferenceError> {
    match read_relation(dir, relation)? {
        Some(rows) => Ok(rows),
        None if relation.is_required() => Err(ReferenceError::Missing {
            relation,
            path: dir.join(relation.file_name()),
        }),
        None => {
            tracing::warn!("{} not found in {}, loading it empty", relation.file_name(), dir.display());
            Ok(Vec::new())
        }
    }
}
