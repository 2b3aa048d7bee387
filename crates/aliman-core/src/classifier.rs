//! Rule-based keyword classifier.
//!
//! Labels a free-text exit reason by case-folded substring containment against
//! two fixed lexicons. The distraction lexicon is tested first, so a reason that
//! hits both lexicons is always a distraction.
//!
//! Matching is plain `str::contains`, not word-boundary aware: "osh" also hits
//! "boshqa". That is the established behavior and callers rely on it.

use serde::{Deserialize, Serialize};

/// Self-inflicted reasons for leaving a focus session.
pub const DISTRACTION_KEYWORDS: &[&str] = &[
    "zerik", "bezdim", "zavq", "instagram", "youtube", "tiktok", "telegram", "o'yin", "game",
    "film", "video", "kino", "shunchaki", "ko'ngil", "keraksiz", "boshqa", "dam", "uxla",
];

/// Reasons that justify leaving a focus session.
pub const VALID_KEYWORDS: &[&str] = &[
    "hojat", "tualet", "suv", "ovqat", "osh", "qo'ng'iroq", "favqulodda", "shoshilinch",
    "zarur", "muhim", "ota", "ona", "bosh og'riq", "xasta", "kasal", "dori", "tez yordam",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Distraction,
    Valid,
    Unknown,
}

/// Outcome of one classification call. Keeps the original text for templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub matched_reason: String,
}

/// True when the already lowercased `text` contains any keyword.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Classify `text` against a distraction set and a valid set.
///
/// Keywords must be lowercase; the text is lowercased here.
pub fn classify(text: &str, distraction: &[&str], valid: &[&str]) -> Category {
    let lowered = text.to_lowercase();
    if contains_any(&lowered, distraction) {
        Category::Distraction
    } else if contains_any(&lowered, valid) {
        Category::Valid
    } else {
        Category::Unknown
    }
}

/// Classify an exit reason with the built-in lexicons.
pub fn classify_reason(reason: &str) -> ClassificationResult {
    ClassificationResult {
        category: classify(reason, DISTRACTION_KEYWORDS, VALID_KEYWORDS),
        matched_reason: reason.to_string(),
    }
}
