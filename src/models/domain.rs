use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Survey question; its valid answers are the tags of `tag_class_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "id_question")]
    pub id: String,
    #[serde(rename = "id_tag_class")]
    pub tag_class_id: String,
    #[serde(rename = "name_question")]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagClass {
    #[serde(rename = "id_tag_class")]
    pub id: String,
    #[serde(rename = "name_tag_class")]
    pub name: String,
}

/// Selectable survey answer
///
/// By convention `id` starts with `tag_class_id`; this is checked at load
/// time but never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "id_tag_class")]
    pub tag_class_id: String,
    #[serde(rename = "id_tag")]
    pub id: String,
    #[serde(rename = "name_tag", alias = "answer_tag")]
    pub label: String,
}

impl Tag {
    pub fn has_class_prefix(&self) -> bool {
        self.id.starts_with(&self.tag_class_id)
    }
}

/// One row of the tag-to-job relation; each row contributes 1 to the job's match count
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagJob {
    #[serde(rename = "id_tag")]
    pub tag_id: String,
    #[serde(rename = "id_jobs")]
    pub job_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "id_jobs")]
    pub id: String,
    #[serde(rename = "name_jobs")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NcsJob {
    #[serde(rename = "id_jobs")]
    pub job_id: String,
    pub ncs_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EduCompany {
    #[serde(rename = "id_edu_company")]
    pub id: i64,
    #[serde(rename = "name_edu_company")]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl EduCompany {
    /// First whitespace-separated token of the address (the province/city)
    pub fn region(&self) -> Option<&str> {
        self.address
            .as_deref()
            .and_then(|address| address.split_whitespace().next())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EduProgram {
    #[serde(rename = "id_edu_program")]
    pub id: i64,
    #[serde(rename = "id_edu_company")]
    pub company_id: i64,
    #[serde(rename = "name_edu_program")]
    pub name: String,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
    pub cost: i64,
    /// Out-of-pocket cost
    pub oopc: i64,
    pub link: String,
    pub online_status: String,
    pub employment_status: String,
    pub ncs_code: String,
}

impl EduProgram {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_start.and_then(parse_yyyymmdd)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date_end.and_then(parse_yyyymmdd)
    }
}

/// Dates are stored as integers such as `20240315`
pub fn parse_yyyymmdd(value: i64) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&value.to_string(), "%Y%m%d").ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWorknet {
    #[serde(rename = "id_jobs")]
    pub job_id: String,
    pub work_code: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCompany {
    #[serde(rename = "id_work_company")]
    pub id: i64,
    #[serde(rename = "work_company")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPosition {
    #[serde(rename = "id_work_positions")]
    pub id: i64,
    #[serde(rename = "id_work_company")]
    pub company_id: i64,
    pub work_code: i64,
    pub recruit: String,
    #[serde(rename = "job_describ_1", default)]
    pub description_1: String,
    #[serde(rename = "job_describ_2", default)]
    pub description_2: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
}

/// `job_info.csv`: NCS duty and its mid-category (정보기술, 통신기술, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    #[serde(rename = "직무")]
    pub duty: String,
    #[serde(rename = "중분류_1")]
    pub category: String,
}

/// `job_tag.csv`: duties that carry survey tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDutyTag {
    #[serde(rename = "직무")]
    pub duty: String,
}

/// `job_int.csv`: duty introductions keyed by the NCS standard name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobIntro {
    #[serde(rename = "NCS 기준")]
    pub duty: String,
    #[serde(rename = "NCS 직무분류코드", default)]
    pub ncs_code: Option<String>,
}

/// New job openings for one occupation in one year
///
/// Stored long; the CSV holds one row per occupation and one column per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringCount {
    pub occupation: String,
    pub year: i32,
    pub openings: i64,
}

/// Rank group of jobs sharing the same match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub rank: usize,
    pub match_count: usize,
    pub jobs: Vec<String>,
}

/// Result of scoring one complete survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Ranked { tiers: Vec<Tier> },
    NoRecommendation,
}

impl Recommendation {
    pub fn tiers(&self) -> &[Tier] {
        match self {
            Recommendation::Ranked { tiers } => tiers,
            Recommendation::NoRecommendation => &[],
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Recommendation::Ranked { .. })
    }
}

/// Delivery mode filter for education programs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    Any,
    OnlineOnly,
    OfflineOnly,
}

/// Education program joined with its (optional) company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMatch {
    pub program_id: i64,
    pub name: String,
    pub company: Option<String>,
    pub region: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cost: i64,
    pub out_of_pocket: i64,
    pub online_status: String,
    pub employment_status: String,
    pub link: String,
}

/// Job posting joined with its job and company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub position_id: i64,
    pub job: String,
    pub recruit: String,
    pub company: String,
    pub description: Vec<String>,
    pub condition: String,
    pub date: String,
    pub link: String,
}

/// Duties browsable under one NCS mid-category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub name: String,
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub openings: i64,
}

/// Yearly new job openings of one occupation, oldest year first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringSeries {
    pub occupation: String,
    pub series: Vec<YearCount>,
}

/// Bulletin board post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub likes: i64,
}

/// Post listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub likes: i64,
}

/// Tier display policy settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    /// A tier is only followed by the next one while it holds fewer jobs than this
    pub threshold: usize,
    pub max_tiers: usize,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            max_tiers: 3,
        }
    }
}
