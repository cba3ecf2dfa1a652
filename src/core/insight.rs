use crate::models::{HiringSeries, YearCount};
use crate::services::ReferenceData;

/// Yearly new job openings per occupation
#[derive(Debug, Clone, Default)]
pub struct HiringTrends {
    series: Vec<HiringSeries>,
}

impl HiringTrends {
    /// Occupations keep their first-seen order; years are sorted ascending
    pub fn new(reference: &ReferenceData) -> Self {
        let mut series: Vec<HiringSeries> = Vec::new();

        for row in &reference.hiring_trends {
            let point = YearCount {
                year: row.year,
                openings: row.openings,
            };
            match series.iter_mut().find(|s| s.occupation == row.occupation) {
                Some(existing) => existing.series.push(point),
                None => series.push(HiringSeries {
                    occupation: row.occupation.clone(),
                    series: vec![point],
                }),
            }
        }

        for s in &mut series {
            s.series.sort_by_key(|point| point.year);
        }

        Self { series }
    }

    pub fn occupations(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.occupation.as_str()).collect()
    }

    pub fn series(&self, occupation: &str) -> Option<&HiringSeries> {
        self.series.iter().find(|s| s.occupation == occupation)
    }
}
