//! Label text and font sizing.
//!
//! Label size grows with the share of flow it describes: roughly one point
//! per five percentage points for large shares and one point per two and a
//! half for medium shares, pinned to [`MIN_FONT_SIZE`] for small ones. The
//! tiers meet with at most one point of jump.

/// Smallest label font size in points.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Largest label font size in points.
pub const MAX_FONT_SIZE: f32 = 12.0;

const LARGE_THRESHOLD: f32 = 0.1;
const MEDIUM_THRESHOLD: f32 = 0.05;

/// What kind of flow a label describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Input,
    Loss,
    Output,
}

impl LabelRole {
    /// Font size at one percent for the large tier.
    fn large_intercept(self) -> f32 {
        match self {
            Self::Input | Self::Output => 10.0,
            Self::Loss => 9.5,
        }
    }
}

/// Size class of a flow share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTier {
    /// More than 10% of total input.
    Large,
    /// More than 5%, up to 10%.
    Medium,
    Small,
}

impl LabelTier {
    pub fn for_fraction(fraction: f32) -> Self {
        if fraction > LARGE_THRESHOLD {
            Self::Large
        } else if fraction > MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Small
        }
    }
}

/// Tier, size and template choice for one label.
///
/// # Examples
///
/// ```
/// # use outflow::{LabelRole, LabelStyle, LabelTier};
/// let style = LabelStyle::for_fraction(0.3, LabelRole::Input);
/// assert_eq!(style.tier(), LabelTier::Large);
/// assert_eq!(style.font_size(), 12.0);
///
/// let lines = style.lines("Fuel", 30.0, "MW", 0.3);
/// assert_eq!(lines, vec!["Fuel".to_string(), "30 MW (30%)".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    role: LabelRole,
    tier: LabelTier,
    font_size: f32,
}

impl LabelStyle {
    pub fn for_fraction(fraction: f32, role: LabelRole) -> Self {
        let tier = LabelTier::for_fraction(fraction);
        let percent = fraction * 100.0;
        let size = match tier {
            LabelTier::Large => role.large_intercept() + (percent - 1.0) / 5.0,
            LabelTier::Medium => MIN_FONT_SIZE + (percent - 5.0) / 2.5,
            LabelTier::Small => MIN_FONT_SIZE,
        };
        Self {
            role,
            tier,
            font_size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        }
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn tier(&self) -> LabelTier {
        self.tier
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns `true` if the label uses the two-line template.
    ///
    /// Output labels always do.
    pub fn is_two_line(&self) -> bool {
        self.role == LabelRole::Output || self.tier != LabelTier::Small
    }

    /// Renders the label text, one entry per line.
    pub fn lines(&self, name: &str, value: f32, unit: &str, fraction: f32) -> Vec<String> {
        let value = format_number(value);
        let percent = format_number(fraction * 100.0);
        if self.is_two_line() {
            let unit = if unit.is_empty() {
                String::new()
            } else {
                format!(" {unit}")
            };
            vec![name.to_string(), format!("{value}{unit} ({percent}%)")]
        } else {
            vec![format!("{name}: {value} ({percent}%)")]
        }
    }
}

/// Formats with at most one decimal, dropping a trailing `.0`.
fn format_number(value: f32) -> String {
    let formatted = format!("{value:.1}");
    match formatted.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LabelTier::for_fraction(0.5), LabelTier::Large);
        assert_eq!(LabelTier::for_fraction(0.1), LabelTier::Medium);
        assert_eq!(LabelTier::for_fraction(0.07), LabelTier::Medium);
        assert_eq!(LabelTier::for_fraction(0.05), LabelTier::Small);
        assert_eq!(LabelTier::for_fraction(0.0), LabelTier::Small);
    }

    #[test]
    fn test_large_size_by_role() {
        let input = LabelStyle::for_fraction(0.11, LabelRole::Input);
        let loss = LabelStyle::for_fraction(0.11, LabelRole::Loss);
        assert_approx_eq!(f32, input.font_size(), 12.0, epsilon = 1e-5);
        assert_approx_eq!(f32, loss.font_size(), 11.5, epsilon = 1e-5);
    }

    #[test]
    fn test_medium_size_grows_with_share() {
        let style = LabelStyle::for_fraction(0.075, LabelRole::Loss);
        assert_eq!(style.tier(), LabelTier::Medium);
        assert_approx_eq!(f32, style.font_size(), 11.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sizes_are_clamped() {
        assert_approx_eq!(f32, LabelStyle::for_fraction(0.9, LabelRole::Input).font_size(), 12.0);
        assert_approx_eq!(f32, LabelStyle::for_fraction(0.01, LabelRole::Loss).font_size(), 10.0);
    }

    #[test]
    fn test_tier_boundaries_jump_at_most_one_point() {
        for role in [LabelRole::Input, LabelRole::Loss, LabelRole::Output] {
            for boundary in [LARGE_THRESHOLD, MEDIUM_THRESHOLD] {
                let below = LabelStyle::for_fraction(boundary, role).font_size();
                let above = LabelStyle::for_fraction(boundary + 1e-4, role).font_size();
                assert!((above - below).abs() <= 1.0, "{role:?} at {boundary}");
            }
        }
    }

    #[test]
    fn test_small_template_is_single_line() {
        let style = LabelStyle::for_fraction(0.026, LabelRole::Loss);
        assert_eq!(
            style.lines("Stack", 2.8, "MW", 0.026),
            vec!["Stack: 2.8 (2.6%)".to_string()]
        );
    }

    #[test]
    fn test_output_is_always_two_line() {
        let style = LabelStyle::for_fraction(0.02, LabelRole::Output);
        assert_eq!(style.tier(), LabelTier::Small);
        assert_eq!(
            style.lines("Power", 2.0, "kW", 0.02),
            vec!["Power".to_string(), "2 kW (2%)".to_string()]
        );
    }

    #[test]
    fn test_two_line_without_unit() {
        let style = LabelStyle::for_fraction(0.5, LabelRole::Input);
        assert_eq!(
            style.lines("Feed", 12.24, "", 0.5),
            vec!["Feed".to_string(), "12.2 (50%)".to_string()]
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(89.2), "89.2");
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(9.96), "10");
        assert_eq!(format_number(-0.01), "0");
    }
}
