// Core algorithm exports
pub mod education;
pub mod filters;
pub mod insight;
pub mod job_search;
pub mod postings;
pub mod recommender;
pub mod survey;
pub mod tiers;

pub use education::{EduError, EduMatcher};
pub use filters::{ProgramFilter, matches_delivery_mode, matches_fee, matches_regions, matches_start_date};
pub use insight::HiringTrends;
pub use job_search::JobSearch;
pub use postings::PostingMatcher;
pub use recommender::{JobRecommender, RecommendError, RecommendResult};
pub use survey::{SurveyCatalog, SurveyError, SurveySession};
pub use tiers::{group_by_count, select_tiers};
