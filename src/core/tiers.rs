use crate::models::{Tier, TierPolicy};
use std::collections::BTreeMap;

/// Group job names by positive match count, highest count first
///
/// Jobs keep their input order inside a group. Zero counts are dropped.
pub fn group_by_count<I>(counts: I) -> Vec<(usize, Vec<String>)>
where
    I: IntoIterator<Item = (String, usize)>,
{
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (job, count) in counts {
        if count > 0 {
            groups.entry(count).or_default().push(job);
        }
    }
    groups.into_iter().rev().collect()
}

/// Apply the tier display policy to descending count groups
///
/// Tier 1 is always shown. Each following tier is shown only while the tier
/// before it was shown and holds fewer than `policy.threshold` jobs.
pub fn select_tiers(groups: Vec<(usize, Vec<String>)>, policy: &TierPolicy) -> Vec<Tier> {
    let mut tiers: Vec<Tier> = Vec::new();

    for (index, (match_count, jobs)) in groups
        .into_iter()
        .take(policy.max_tiers.max(1))
        .enumerate()
    {
        if let Some(previous) = tiers.last() {
            if previous.jobs.len() >= policy.threshold {
                break;
            }
        }
        tiers.push(Tier {
            rank: index + 1,
            match_count,
            jobs,
        });
    }

    tiers
}
