use std::collections::HashMap;

/// Ratcliff/Obershelp similarity of two strings in `[0, 1]`.
///
/// Twice the number of characters in the recursively found longest common
/// blocks, divided by the combined length. Two empty strings are identical.
///
/// No character is ever treated as junk, including in strings of 200 or
/// more characters, where a popularity-based junk heuristic would start
/// discarding frequent characters. Long stems therefore keep their full
/// ratio.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        positions.entry(ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, &positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common block inside `a[alo..ahi]` / `b[blo..bhi]`.
/// Ties resolve to the earliest start in `a`, then in `b`.
fn longest_block(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run length of the block ending at each b index, for the previous row of a
    let mut run_ending: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run = HashMap::new();
        if let Some(js) = positions.get(ch) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = j
                    .checked_sub(1)
                    .and_then(|prev| run_ending.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_ending = next_run;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_and_empty() {
        assert!(close(sequence_ratio("forest", "forest"), 1.0));
        assert!(close(sequence_ratio("", ""), 1.0));
        assert!(close(sequence_ratio("forest", ""), 0.0));
    }

    #[test]
    fn test_overlapping_block() {
        assert!(close(sequence_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_recurses_around_longest_block() {
        // "sunset_" + "ocean" = 12 of 35 characters on each side
        assert!(close(
            sequence_ratio("sunset_over_ocean", "sunset_ocean_thumb"),
            24.0 / 35.0
        ));
        assert!(close(
            sequence_ratio("mountain_lake", "mountain_lake_small"),
            26.0 / 32.0
        ));
    }

    #[test]
    fn test_unrelated_names_score_low() {
        assert!(sequence_ratio("sunset_over_ocean", "mountain_thumb") < 0.3);
        assert!(sequence_ratio("red_car", "blue_sky") < 0.3);
    }

    #[test]
    fn test_long_strings_keep_frequent_characters() {
        let long = format!("{}_wallpaper", "a".repeat(250));
        assert!((sequence_ratio(&long, &long) - 1.0).abs() < 1e-12);

        let shorter = "a".repeat(200);
        let expected = 2.0 * 200.0 / (long.chars().count() + 200) as f64;
        assert!((sequence_ratio(&long, &shorter) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_handles_multibyte_characters() {
        assert!(close(sequence_ratio("café", "cafe"), 0.75));
    }
}
