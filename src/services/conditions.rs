//! Free-text weather description classification.
//!
//! Category, icon and cloud cover come from three separate keyword scans,
//! each with its own priority order. They can disagree: "partly cloudy" is
//! category `Clouds`, icon `02` and 40% cloud, while "partly sunny" is
//! category `Clear` with the same icon and cloud cover.
//!
//! In the icon and cloud scans "partly" is checked ahead of "cloud". This
//! departs on purpose from the plain "cloud"-first keyword order, which would
//! give "partly cloudy" icon `03` and 70% cloud; keep it so that "partly
//! cloudy" stays at `02` and 40%.

/// Description reported when the upstream sends none.
pub const DEFAULT_DESCRIPTION: &str = "Clear sky";

/// Canonical weather condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Windy,
}

impl ConditionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "Clear",
            ConditionCategory::Clouds => "Clouds",
            ConditionCategory::Rain => "Rain",
            ConditionCategory::Thunderstorm => "Thunderstorm",
            ConditionCategory::Snow => "Snow",
            ConditionCategory::Mist => "Mist",
            ConditionCategory::Windy => "Windy",
        }
    }
}

/// Result of classifying one description.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: ConditionCategory,
    /// OpenWeatherMap-style icon code, e.g. `10d`
    pub icon_code: String,
    pub cloud_pct: u8,
}

fn any_of(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Category scan. Order matters: "rain" beats "cloud" beats "clear" beats "storm".
pub fn category(description: &str) -> ConditionCategory {
    let desc = description.to_lowercase();
    if any_of(&desc, &["rain", "shower"]) {
        ConditionCategory::Rain
    } else if desc.contains("cloud") {
        ConditionCategory::Clouds
    } else if desc.contains("clear") {
        ConditionCategory::Clear
    } else if any_of(&desc, &["storm", "thunder"]) {
        ConditionCategory::Thunderstorm
    } else if desc.contains("snow") {
        ConditionCategory::Snow
    } else if any_of(&desc, &["mist", "fog"]) {
        ConditionCategory::Mist
    } else if any_of(&desc, &["wind", "gale"]) {
        ConditionCategory::Windy
    } else {
        ConditionCategory::Clear
    }
}

/// Icon scan, suffixed `d` or `n`.
pub fn icon_code(description: &str, is_day: bool) -> String {
    let desc = description.to_lowercase();
    let code = if any_of(&desc, &["thunder", "storm"]) {
        "11"
    } else if desc.contains("drizzle") {
        "09"
    } else if desc.contains("rain") {
        "10"
    } else if desc.contains("snow") {
        "13"
    } else if any_of(&desc, &["mist", "fog"]) {
        "50"
    } else if desc.contains("overcast") {
        "04"
    } else if desc.contains("partly") {
        "02"
    } else if desc.contains("cloud") {
        "03"
    } else {
        "01"
    };
    format!("{}{}", code, if is_day { 'd' } else { 'n' })
}

/// Cloud cover scan, in percent.
pub fn cloud_pct(description: &str) -> u8 {
    let desc = description.to_lowercase();
    if any_of(&desc, &["overcast", "dark"]) {
        95
    } else if desc.contains("partly") {
        40
    } else if desc.contains("cloud") {
        70
    } else {
        0
    }
}

/// Run all three scans. An absent description is the empty string.
pub fn classify(description: Option<&str>, is_day: bool) -> Classification {
    let desc = description.unwrap_or_default();
    Classification {
        category: category(desc),
        icon_code: icon_code(desc, is_day),
        cloud_pct: cloud_pct(desc),
    }
}
