use image::imageops::FilterType;
use image::DynamicImage;
use palette::Srgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SAMPLE_SIZE: u32 = 50;
const SECONDARY_SCALE: f64 = 0.8;
const ACCENT_SCALE: f64 = 1.2;

const FALLBACK_PALETTES: [[&str; 3]; 4] = [
    ["#1a237e", "#3949ab", "#7986cb"],
    ["#311b92", "#5e35b1", "#9575cd"],
    ["#004d40", "#00695c", "#26a69a"],
    ["#bf360c", "#e64a19", "#ff8a65"],
];

/// Three-colour palette stored with every wallpaper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl ColorPalette {
    fn from_average(avg: [u8; 3]) -> Self {
        let scaled = |factor: f64| avg.map(|c| (c as f64 * factor).min(255.0) as u8);
        Self {
            primary: hex(avg),
            secondary: hex(scaled(SECONDARY_SCALE)),
            accent: hex(scaled(ACCENT_SCALE)),
        }
    }

    /// One of the fixed fallback palettes, chosen at random
    pub fn fallback<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let [primary, secondary, accent] =
            FALLBACK_PALETTES[rng.gen_range(0..FALLBACK_PALETTES.len())];
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
        }
    }
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:x}", Srgb::new(r, g, b))
}

/// Average the colours of a downsampled copy of `img`.
///
/// Returns `None` for images with no pixels.
pub fn extract_palette(img: &DynamicImage) -> Option<ColorPalette> {
    if img.width() == 0 || img.height() == 0 {
        return None;
    }

    let sample = img
        .resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::CatmullRom)
        .to_rgb8();
    let count = sample.pixels().len() as u64;
    if count == 0 {
        return None;
    }

    let mut sums = [0u64; 3];
    for pixel in sample.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += channel as u64;
        }
    }

    Some(ColorPalette::from_average(sums.map(|s| (s / count) as u8)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_image_palette() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(120, 80, |_, _| {
            image::Rgb([100, 250, 50])
        }));
        let palette = extract_palette(&img).unwrap();
        assert_eq!(palette.primary, "#64fa32");
        // 80%: 80, 200, 40
        assert_eq!(palette.secondary, "#50c828");
        // 120% clamps: 120, 255, 60
        assert_eq!(palette.accent, "#78ff3c");
    }

    #[test]
    fn test_black_image_palette() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(10, 10));
        let palette = extract_palette(&img).unwrap();
        assert_eq!(palette.primary, "#000000");
        assert_eq!(palette.accent, "#000000");
    }

    #[test]
    fn test_empty_image_has_no_palette() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(0, 0));
        assert!(extract_palette(&img).is_none());
    }

    #[test]
    fn test_fallback_is_one_of_fixed_set_and_seeded() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = ColorPalette::fallback(&mut a);
        assert_eq!(first, ColorPalette::fallback(&mut b));
        assert!(FALLBACK_PALETTES
            .iter()
            .any(|p| p[0] == first.primary && p[1] == first.secondary && p[2] == first.accent));
    }

    #[test]
    fn test_palette_json_shape() {
        let palette = ColorPalette::from_average([16, 32, 48]);
        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json["primary"], "#102030");
        assert_eq!(json["secondary"], "#0c1926");
        assert_eq!(json["accent"], "#132639");
    }
}
