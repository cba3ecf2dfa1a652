// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Comment, DeliveryMode, EduCompany, EduProgram, HiringCount, HiringSeries, Job, JobCategory,
    JobDutyTag, JobInfo, JobIntro, JobWorknet, NcsJob, Post, PostSummary, Posting, ProgramMatch,
    Question, Recommendation, Tag, TagClass, TagJob, Tier, TierPolicy, WorkCompany, WorkPosition,
    YearCount,
};
pub use requests::{CommentRequest, PostRequest, PostSearchQuery, PostingQuery, ProgramSearchRequest, SubmitSurveyRequest};
pub use responses::{
    CreatedResponse, ErrorResponse, HealthResponse, JobView, MissingResponseBody,
    RecommendationResponse, SurveyOption, SurveyQuestion, SurveyResponse,
};
