// src/android/rule_information_provider.rs
use std::collections::BTreeMap;
use super::rule_information::{RuleInformation, UnifiedFormattableResolution, UnifiedRichResolution};
use super::scan_results::{RuleResultsData, RuleStatus};

pub const COLOR_CONTRAST: &str = "ColorContrast";
pub const TOUCH_SIZE_WCAG: &str = "TouchSizeWcag";
pub const ACTIVE_VIEW_NAME: &str = "ActiveViewName";
pub const IMAGE_VIEW_NAME: &str = "ImageViewName";
pub const EDIT_TEXT_VALUE: &str = "EditTextValue";

const MIN_CONTRAST_RATIO: f64 = 4.5;
const MIN_TARGET_SIZE_DP: f64 = 48.0;
const BASELINE_DPI: f64 = 160.0;

#[derive(Debug)]
pub struct RuleInformationProvider {
    rules: BTreeMap<String, RuleInformation>,
}

impl Default for RuleInformationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleInformationProvider {
    pub fn new() -> Self {
        let rules = [
            RuleInformation::new(
                COLOR_CONTRAST,
                "Text elements must have sufficient contrast against the background.",
                color_contrast_resolution,
                include_color_contrast_result,
            ),
            RuleInformation::new(
                TOUCH_SIZE_WCAG,
                "Touch inputs must have a sufficient target size.",
                touch_size_resolution,
                include_all_results,
            ),
            RuleInformation::new(
                ACTIVE_VIEW_NAME,
                "Active views must have a name that is available to assistive technologies.",
                |_: &RuleResultsData| plain_resolution(
                    "The view is active but has no name available to assistive technologies. \
                     Provide a name for the view using its contentDescription, hint, labelFor, or text attribute (depending on the view type).",
                ),
                include_all_results,
            ),
            RuleInformation::new(
                IMAGE_VIEW_NAME,
                "Meaningful images must have alternate text.",
                |_: &RuleResultsData| plain_resolution(
                    "The image has no alternate text and is not identified as decorative. \
                     If the image conveys meaningful content, provide alternate text using the contentDescription attribute. \
                     If the image is decorative, give it an empty contentDescription, or set its isImportantForAccessibility attribute to false.",
                ),
                include_all_results,
            ),
            RuleInformation::new(
                EDIT_TEXT_VALUE,
                "EditText elements must expose their entered text value to assistive technologies.",
                |_: &RuleResultsData| plain_resolution(
                    "The element's contentDescription overrides the text value required by assistive technologies. \
                     Remove the element's contentDescription attribute.",
                ),
                include_all_results,
            ),
        ];

        Self {
            rules: rules.into_iter().map(|r| (r.rule_id.clone(), r)).collect(),
        }
    }

    pub fn get_rule_information(&self, rule_id: &str) -> Option<&RuleInformation> {
        self.rules.get(rule_id)
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleInformation> {
        self.rules.values()
    }
}

fn plain_resolution(summary: &str) -> UnifiedFormattableResolution {
    UnifiedFormattableResolution {
        how_to_fix_summary: summary.to_string(),
        rich_resolution: None,
    }
}

fn include_all_results(_: &RuleResultsData) -> bool {
    true
}

// Failures that already meet the regular-text minimum are scanner noise.
fn include_color_contrast_result(data: &RuleResultsData) -> bool {
    if data.status != RuleStatus::Fail {
        return true;
    }
    match data.numeric_prop("Color Contrast Ratio") {
        Some(ratio) => ratio < MIN_CONTRAST_RATIO,
        None => true,
    }
}

fn color_contrast_resolution(data: &RuleResultsData) -> UnifiedFormattableResolution {
    let ratio = data.prop("Color Contrast Ratio").unwrap_or("unknown");
    let foreground = data.prop("Foreground Color").unwrap_or("unknown");
    let background = data.prop("Background Color").unwrap_or("unknown");

    let mut variables = BTreeMap::new();
    variables.insert("ratio".to_string(), ratio.to_string());
    variables.insert("foregroundColor".to_string(), foreground.to_string());
    variables.insert("backgroundColor".to_string(), background.to_string());

    UnifiedFormattableResolution {
        how_to_fix_summary: format!(
            "The text element has insufficient contrast of {}. Foreground color: {}, background color: {}. \
             Modify the text and/or background colors to provide a contrast ratio of at least 4.5:1 for regular text, or 3:1 for large text.",
            ratio, foreground, background
        ),
        rich_resolution: Some(UnifiedRichResolution {
            content_id: format!("android/{}", COLOR_CONTRAST),
            content_variables: variables,
        }),
    }
}

fn pixels_to_dp(pixels: f64, dpi: f64) -> f64 {
    (pixels * BASELINE_DPI / dpi).round()
}

fn touch_size_resolution(data: &RuleResultsData) -> UnifiedFormattableResolution {
    let dpi = data.numeric_prop("Screen Dots Per Inch").filter(|d| *d > 0.0).unwrap_or(BASELINE_DPI);
    let width = data.numeric_prop("width").map(|w| pixels_to_dp(w, dpi));
    let height = data.numeric_prop("height").map(|h| pixels_to_dp(h, dpi));

    let dimensions = match (width, height) {
        (Some(w), Some(h)) => format!(" (width: {}dp, height: {}dp)", w, h),
        _ => String::new(),
    };

    plain_resolution(&format!(
        "The element has an insufficient target size{}. Set the element's minWidth and minHeight attributes to at least {}dp.",
        dimensions, MIN_TARGET_SIZE_DP
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(rule_id: &str, status: RuleStatus, props: &[(&str, &str)]) -> RuleResultsData {
        RuleResultsData {
            axe_view_id: 1,
            rule_id: rule_id.to_string(),
            status,
            props: props.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn provides_every_builtin_rule() {
        let provider = RuleInformationProvider::new();
        for id in [COLOR_CONTRAST, TOUCH_SIZE_WCAG, ACTIVE_VIEW_NAME, IMAGE_VIEW_NAME, EDIT_TEXT_VALUE] {
            let info = provider.get_rule_information(id).expect("rule missing");
            assert_eq!(info.rule_id, id);
        }
        assert!(provider.get_rule_information("NotARule").is_none());
        assert_eq!(provider.rules().count(), 5);
    }

    #[test]
    fn color_contrast_failures_meeting_minimum_are_excluded() {
        let provider = RuleInformationProvider::new();
        let rule = provider.get_rule_information(COLOR_CONTRAST).unwrap();

        assert!(rule.include_this_result(&data(COLOR_CONTRAST, RuleStatus::Fail, &[("Color Contrast Ratio", "2.9")])));
        assert!(!rule.include_this_result(&data(COLOR_CONTRAST, RuleStatus::Fail, &[("Color Contrast Ratio", "4.5")])));
        assert!(rule.include_this_result(&data(COLOR_CONTRAST, RuleStatus::Fail, &[])));
        assert!(rule.include_this_result(&data(COLOR_CONTRAST, RuleStatus::Pass, &[("Color Contrast Ratio", "9.1")])));
    }

    #[test]
    fn color_contrast_resolution_mentions_colors() {
        let provider = RuleInformationProvider::new();
        let rule = provider.get_rule_information(COLOR_CONTRAST).unwrap();
        let resolution = rule.get_unified_formattable_resolution(&data(
            COLOR_CONTRAST,
            RuleStatus::Fail,
            &[("Color Contrast Ratio", "3.1"), ("Foreground Color", "#777777"), ("Background Color", "#FFFFFF")],
        ));

        assert!(resolution.how_to_fix_summary.contains("insufficient contrast of 3.1"));
        assert!(resolution.how_to_fix_summary.contains("#777777"));
        let rich = resolution.rich_resolution.expect("rich resolution");
        assert_eq!(rich.content_id, "android/ColorContrast");
        assert_eq!(rich.content_variables.get("backgroundColor").map(String::as_str), Some("#FFFFFF"));
    }

    #[test]
    fn touch_size_converts_pixels_to_dp() {
        let provider = RuleInformationProvider::new();
        let rule = provider.get_rule_information(TOUCH_SIZE_WCAG).unwrap();
        let resolution = rule.get_unified_formattable_resolution(&data(
            TOUCH_SIZE_WCAG,
            RuleStatus::Fail,
            &[("Screen Dots Per Inch", "320"), ("width", "60"), ("height", "80")],
        ));
        assert!(resolution.how_to_fix_summary.contains("(width: 30dp, height: 40dp)"));
        assert!(resolution.how_to_fix_summary.contains("at least 48dp"));
    }
}
