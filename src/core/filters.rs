use crate::models::{DeliveryMode, EduProgram};
use chrono::NaiveDate;

/// `online_status` value of online programs
pub const ONLINE_STATUS: &str = "온라인";
/// `online_status` value of classroom programs
pub const OFFLINE_STATUS: &str = "오프라인";
/// Region selection meaning "anywhere"
pub const ALL_REGIONS: &str = "All";

/// Program filters chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramFilter {
    pub regions: Vec<String>,
    pub mode: DeliveryMode,
    pub without_fee: bool,
    pub start_from: Option<NaiveDate>,
}

impl ProgramFilter {
    /// Apply every filter to one program and its company's region
    pub fn accepts(&self, program: &EduProgram, region: Option<&str>) -> bool {
        matches_delivery_mode(program, self.mode)
            && matches_regions(region, &self.regions)
            && matches_fee(program, self.without_fee)
            && matches_start_date(program, self.start_from)
    }
}

#[inline]
pub fn matches_delivery_mode(program: &EduProgram, mode: DeliveryMode) -> bool {
    match mode {
        DeliveryMode::Any => true,
        DeliveryMode::OnlineOnly => program.online_status == ONLINE_STATUS,
        DeliveryMode::OfflineOnly => program.online_status == OFFLINE_STATUS,
    }
}

/// No selection, or a selection containing "All", accepts any region
/// (including programs whose company has no address)
#[inline]
pub fn matches_regions(region: Option<&str>, regions: &[String]) -> bool {
    if regions.is_empty() || regions.iter().any(|r| r == ALL_REGIONS) {
        return true;
    }
    region.is_some_and(|region| regions.iter().any(|r| r == region))
}

#[inline]
pub fn matches_fee(program: &EduProgram, without_fee: bool) -> bool {
    !without_fee || program.oopc == 0
}

/// Programs without a parseable start date fail once a date is requested
#[inline]
pub fn matches_start_date(program: &EduProgram, start_from: Option<NaiveDate>) -> bool {
    match start_from {
        None => true,
        Some(date) => program.start_date().is_some_and(|start| start >= date),
    }
}
