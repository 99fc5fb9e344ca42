use super::similarity::sequence_ratio;
use crate::config::MatchingConfig;

/// Score one normalised candidate name against a normalised wallpaper name.
pub(super) fn name_score(wallpaper: &str, candidate: &str, rules: &MatchingConfig) -> f64 {
    let mut score = sequence_ratio(wallpaper, candidate);
    if candidate.contains(wallpaper) || wallpaper.contains(candidate) {
        score += rules.substring_bonus;
    }
    score
}

/// Index of the best thumbnail candidate for a wallpaper, if any clears the threshold.
///
/// A candidate sharing the wallpaper's leading `prefix_len` characters wins
/// outright. Otherwise the highest score at or above `threshold` is taken,
/// with ties going to the earlier candidate.
pub(super) fn best_match(
    wallpaper: &str,
    candidates: &[String],
    rules: &MatchingConfig,
) -> Option<usize> {
    let prefix: String = wallpaper.chars().take(rules.prefix_len).collect();
    let mut best: Option<(usize, f64)> = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        if !prefix.is_empty() && candidate.starts_with(&prefix) {
            return Some(idx);
        }

        let score = name_score(wallpaper, candidate, rules);
        if score < rules.threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best.map(|(idx, _)| idx)
}
