/// Intensity above which an alert is drawn as high severity.
pub const HIGH_THRESHOLD: f64 = 7.0;

/// Intensity above which an alert is drawn as medium severity.
pub const MEDIUM_THRESHOLD: f64 = 4.0;

/// Visual severity of a deforestation alert. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// CSS color name used for both stroke and fill of the alert circle.
    pub fn color(self) -> &'static str {
        match self {
            SeverityTier::High => "darkred",
            SeverityTier::Medium => "red",
            SeverityTier::Low => "orange",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityTier::Low => write!(f, "Low"),
            SeverityTier::Medium => write!(f, "Medium"),
            SeverityTier::High => write!(f, "High"),
        }
    }
}

/// Classify an intensity value. Boundary values fall into the lower tier.
pub fn classify(intensity: f64) -> SeverityTier {
    if intensity > HIGH_THRESHOLD {
        SeverityTier::High
    } else if intensity > MEDIUM_THRESHOLD {
        SeverityTier::Medium
    } else {
        SeverityTier::Low
    }
}
