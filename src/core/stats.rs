// src/core/stats.rs
use crate::core::types::{OriginLabel, OriginStat, ProcessedWord};

/// Origin distribution over a batch, most frequent first. Compound words
/// count once per part.
pub fn calculate_origin_stats(results: &[ProcessedWord]) -> Vec<OriginStat> {
    // First-seen order is kept for ties.
    let mut counts: Vec<(OriginLabel, usize)> = Vec::new();
    for origin in results.iter().flat_map(|word| word.origins()) {
        match counts.iter_mut().find(|(seen, _)| *seen == origin) {
            Some((_, count)) => *count += 1,
            None => counts.push((origin, 1)),
        }
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut stats: Vec<OriginStat> = counts
        .into_iter()
        .map(|(origin, count)| OriginStat {
            origin,
            count,
            percentage: one_decimal(count as f64 * 100.0 / total as f64),
            angle: count as f64 * 360.0 / total as f64,
        })
        .collect();
    stats.sort_by_key(|stat| std::cmp::Reverse(stat.count));
    stats
}

// Halves round away from zero, so 6.25 reads as "6.3".
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Every distinct origin in the batch, compound parts included, sorted by name.
pub fn get_active_languages(results: &[ProcessedWord]) -> Vec<OriginLabel> {
    let mut languages: Vec<OriginLabel> = results.iter().flat_map(|word| word.origins()).collect();
    languages.sort_by_key(|origin| origin.as_str());
    languages.dedup();
    languages
}
