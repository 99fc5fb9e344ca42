use serde::{Deserialize, Serialize};

/// Which catalog table a wallpaper belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Desktop,
    Mobile,
}

impl Orientation {
    /// Desktop when at least as wide as tall
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height == 0 || width as f64 / height as f64 >= 1.0 {
            Orientation::Desktop
        } else {
            Orientation::Mobile
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Desktop => "desktop",
            Orientation::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "Full HD")]
    FullHd,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
    Phone,
    Tablet,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Hd => "HD",
            QualityLabel::FullHd => "Full HD",
            QualityLabel::TwoK => "2K",
            QualityLabel::FourK => "4K",
            QualityLabel::Phone => "Phone",
            QualityLabel::Tablet => "Tablet",
        }
    }
}

/// (min width, min height, label), highest tier first; either bound qualifies
type QualityTier = (u32, u32, QualityLabel);

const DESKTOP_TIERS: &[QualityTier] = &[
    (3840, 2160, QualityLabel::FourK),
    (2560, 1440, QualityLabel::TwoK),
    (1920, 1080, QualityLabel::FullHd),
];

const MOBILE_TIERS: &[QualityTier] = &[
    (1440, 2560, QualityLabel::Hd),
    (1080, 1920, QualityLabel::Phone),
];

pub fn quality_label(width: u32, height: u32, orientation: Orientation) -> QualityLabel {
    let (tiers, fallback) = match orientation {
        Orientation::Desktop => (DESKTOP_TIERS, QualityLabel::Hd),
        Orientation::Mobile => (MOBILE_TIERS, QualityLabel::Tablet),
    };
    tiers
        .iter()
        .find(|(min_w, min_h, _)| width >= *min_w || height >= *min_h)
        .map(|(_, _, label)| *label)
        .unwrap_or(fallback)
}

/// Mobile device class stored alongside mobile wallpapers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Phone,
    Tablet,
}

impl DeviceType {
    pub fn from_width(width: u32) -> Self {
        if width < 1200 {
            DeviceType::Phone
        } else {
            DeviceType::Tablet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Phone => "phone",
            DeviceType::Tablet => "tablet",
        }
    }
}

/// Canonical ratios, checked in order
const COMMON_RATIOS: &[(u32, u32)] = &[
    (16, 9),
    (4, 3),
    (1, 1),
    (21, 9),
    (9, 16),
    (3, 4),
    (3, 2),
    (2, 3),
];

const RATIO_TOLERANCE: f64 = 0.1;

/// Aspect ratio label, snapped to a common ratio when within tolerance.
pub fn aspect_ratio(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "0:0".to_string();
    }

    let divisor = gcd(width, height);
    let (w, h) = (width / divisor, height / divisor);
    let ratio = w as f64 / h as f64;

    COMMON_RATIOS
        .iter()
        .find(|(cw, ch)| (ratio - *cw as f64 / *ch as f64).abs() < RATIO_TOLERANCE)
        .map(|(cw, ch)| format!("{}:{}", cw, ch))
        .unwrap_or_else(|| format!("{}:{}", w, h))
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
