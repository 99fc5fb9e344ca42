use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_TITLE: &str = "Untitled Wallpaper";

/// Checked in order; only the first match is stripped
const SUFFIXES: &[&str] = &[
    "_wallpaper",
    "_wall",
    "_background",
    "_bg",
    "_desktop",
    "_5k",
    "_4k",
    "_2k",
    "_hd",
    "_fullhd",
    "_uhd",
    "wallpaper",
    "background",
    "desktop",
    "mobile",
];

const ACRONYMS: &[&str] = &["BMW", "SUV", "GT", "GTR", "HD", "4K", "5K"];

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid year pattern"));

static ROMAN_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(I{1,3}|IV|V|VI{1,3}|IX|X)$").expect("valid roman numeral pattern")
});

/// Derive a display title from an image filename.
///
/// `2023_Ford_Mustang_GT_wallpaper.jpg` becomes `2023 Ford Mustang GT`.
pub fn title_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let stem = strip_suffix(stem);
    let mut title = stem.replace(['_', ','], " ");

    let year = YEAR.find(&title).map(|m| m.as_str().to_string());
    if let Some(year) = &year {
        title = title.replace(year.as_str(), "");
    }

    let words: Vec<String> = title.split_whitespace().map(format_word).collect();
    let mut title = words.join(" ");
    if let Some(year) = year {
        title = format!("{} {}", year, title).trim().to_string();
    }

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

fn strip_suffix(stem: &str) -> &str {
    for suffix in SUFFIXES {
        let Some(cut) = stem.len().checked_sub(suffix.len()) else {
            continue;
        };
        if stem.is_char_boundary(cut) && stem[cut..].eq_ignore_ascii_case(suffix) {
            return &stem[..cut];
        }
    }
    stem
}

fn format_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if ACRONYMS.contains(&upper.as_str()) || ROMAN_NUMERAL.is_match(&upper) {
        return upper;
    }
    capitalize(word)
}

/// First character upper-case, the rest lower-case
pub(super) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_moves_to_front_and_acronyms_upper() {
        let title = title_from_filename("2023_Ford_Mustang_GT_wallpaper.jpg");
        assert_eq!(title, "2023 Ford Mustang GT");
    }

    #[test]
    fn test_year_in_middle_relocated() {
        assert_eq!(
            title_from_filename("bmw_m4_2021_4k.png"),
            "2021 BMW M4"
        );
    }

    #[test]
    fn test_only_first_suffix_stripped() {
        assert_eq!(title_from_filename("city_lights_hd.jpg"), "City Lights");
        assert_eq!(
            title_from_filename("neon_city_desktop_wallpaper.jpg"),
            "Neon City Desktop"
        );
        assert_eq!(title_from_filename("ocean_Mobile.webp"), "Ocean");
    }

    #[test]
    fn test_roman_numerals_upper() {
        assert_eq!(
            title_from_filename("final_fantasy_vii_remake.jpg"),
            "Final Fantasy VII Remake"
        );
        assert_eq!(title_from_filename("rocky_iv.jpg"), "Rocky IV");
    }

    #[test]
    fn test_commas_and_repeated_separators_collapse() {
        assert_eq!(
            title_from_filename("red,,sunset__over___hills.jpg"),
            "Red Sunset Over Hills"
        );
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(title_from_filename("_wallpaper.jpg"), DEFAULT_TITLE);
        assert_eq!(title_from_filename("___.png"), DEFAULT_TITLE);
    }

    #[test]
    fn test_year_only() {
        assert_eq!(title_from_filename("1999.jpg"), "1999");
    }

    #[test]
    fn test_out_of_range_year_stays_in_place() {
        assert_eq!(title_from_filename("blade_runner_2185.jpg"), "Blade Runner 2185");
    }

    #[test]
    fn test_title_is_deterministic() {
        let name = "Lamborghini_Aventador_SVJ_2019_5k.jpg";
        assert_eq!(title_from_filename(name), title_from_filename(name));
        assert_eq!(title_from_filename(name), "2019 Lamborghini Aventador Svj");
    }
}
