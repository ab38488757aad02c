//! Message catalogue for the three supported UI languages.

use crate::storage::{PrefKey, PrefValue, PreferenceStore};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Kannada,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Kannada];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Kannada => "kn",
        }
    }

    /// Accepts `hi`, `hi-IN`, `kn_IN` and so on.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == primary)
    }

    /// Name of the language in its own script, as shown on the language picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Kannada => "ಕನ್ನಡ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    AppTitle,
    ChooseAnimal,
    CrossbredCow,
    CrossbredCowDescription,
    Buffalo,
    BuffaloDescription,
    GrowingHeifer,
    GrowingHeiferDescription,
    MilkYieldLitDay,
    BodyWeightKg,
    GreenFodderAvailability,
    FeedRecommendationPerDay,
    ExpectedDailyGainGmDay,
    HusbandrySystem,
    Concentrate,
    GreenFodder,
    DryRoughage,
    High,
    Moderate,
    Low,
    IntensiveSystem,
    SemiIntensiveSystem,
    Intensive,
    SemiIntensive,
    ShowValues,
    HideValues,
    NoData,
    Grams,
    LanguageLabel,
}

/// Localised strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    language: Language,
}

impl Strings {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        match self.language {
            Language::English => english(key),
            Language::Hindi => hindi(key),
            Language::Kannada => kannada(key),
        }
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        AppTitle => "Feed Recommendation",
        ChooseAnimal => "Choose an animal",
        CrossbredCow => "Crossbred Cow",
        CrossbredCowDescription => "Daily ration by milk yield",
        Buffalo => "Buffalo",
        BuffaloDescription => "Daily ration by milk yield",
        GrowingHeifer => "Growing Heifer",
        GrowingHeiferDescription => "Daily ration and weight gain by body weight",
        MilkYieldLitDay => "Milk yield (lit/day)",
        BodyWeightKg => "Body weight (kg)",
        GreenFodderAvailability => "Green fodder availability",
        FeedRecommendationPerDay => "Feed recommendation (per day)",
        ExpectedDailyGainGmDay => "Expected daily gain (gm/day)",
        HusbandrySystem => "System",
        Concentrate => "Concentrate",
        GreenFodder => "Green Fodder",
        DryRoughage => "Dry Roughage",
        High => "High",
        Moderate => "Moderate",
        Low => "Low",
        IntensiveSystem => "Intensive system",
        SemiIntensiveSystem => "Semi-intensive system",
        Intensive => "Intensive",
        SemiIntensive => "Semi-intensive",
        ShowValues => "Show values",
        HideValues => "Hide values",
        NoData => "No recommendation for this selection",
        Grams => "gm",
        LanguageLabel => "Language",
    }
}

fn hindi(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        AppTitle => "आहार सिफारिश",
        ChooseAnimal => "पशु चुनें",
        CrossbredCow => "संकर गाय",
        CrossbredCowDescription => "दूध उत्पादन के अनुसार दैनिक आहार",
        Buffalo => "भैंस",
        BuffaloDescription => "दूध उत्पादन के अनुसार दैनिक आहार",
        GrowingHeifer => "बढ़ती बछिया",
        GrowingHeiferDescription => "शरीर के वजन के अनुसार आहार और वृद्धि",
        MilkYieldLitDay => "दूध उत्पादन (लीटर/दिन)",
        BodyWeightKg => "शरीर का वजन (किग्रा)",
        GreenFodderAvailability => "हरे चारे की उपलब्धता",
        FeedRecommendationPerDay => "आहार सिफारिश (प्रति दिन)",
        ExpectedDailyGainGmDay => "अपेक्षित दैनिक वृद्धि (ग्राम/दिन)",
        HusbandrySystem => "प्रणाली",
        Concentrate => "दाना मिश्रण",
        GreenFodder => "हरा चारा",
        DryRoughage => "सूखा चारा",
        High => "अधिक",
        Moderate => "मध्यम",
        Low => "कम",
        IntensiveSystem => "सघन प्रणाली",
        SemiIntensiveSystem => "अर्ध-सघन प्रणाली",
        Intensive => "सघन",
        SemiIntensive => "अर्ध-सघन",
        ShowValues => "मात्रा दिखाएँ",
        HideValues => "मात्रा छिपाएँ",
        NoData => "इस चयन के लिए कोई सिफारिश नहीं",
        Grams => "ग्राम",
        LanguageLabel => "भाषा",
    }
}

fn kannada(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        AppTitle => "ಆಹಾರ ಶಿಫಾರಸು",
        ChooseAnimal => "ಪ್ರಾಣಿಯನ್ನು ಆಯ್ಕೆಮಾಡಿ",
        CrossbredCow => "ಮಿಶ್ರತಳಿ ಹಸು",
        CrossbredCowDescription => "ಹಾಲಿನ ಇಳುವರಿಗೆ ಅನುಗುಣವಾಗಿ ದೈನಂದಿನ ಆಹಾರ",
        Buffalo => "ಎಮ್ಮೆ",
        BuffaloDescription => "ಹಾಲಿನ ಇಳುವರಿಗೆ ಅನುಗುಣವಾಗಿ ದೈನಂದಿನ ಆಹಾರ",
        GrowingHeifer => "ಬೆಳೆಯುವ ಕಡಸು",
        GrowingHeiferDescription => "ದೇಹದ ತೂಕಕ್ಕೆ ಅನುಗುಣವಾಗಿ ಆಹಾರ ಮತ್ತು ತೂಕ ಹೆಚ್ಚಳ",
        MilkYieldLitDay => "ಹಾಲಿನ ಇಳುವರಿ (ಲೀ/ದಿನ)",
        BodyWeightKg => "ದೇಹದ ತೂಕ (ಕೆಜಿ)",
        GreenFodderAvailability => "ಹಸಿರು ಮೇವಿನ ಲಭ್ಯತೆ",
        FeedRecommendationPerDay => "ಆಹಾರ ಶಿಫಾರಸು (ದಿನಕ್ಕೆ)",
        ExpectedDailyGainGmDay => "ನಿರೀಕ್ಷಿತ ದೈನಂದಿನ ತೂಕ ಹೆಚ್ಚಳ (ಗ್ರಾಂ/ದಿನ)",
        HusbandrySystem => "ಪದ್ಧತಿ",
        Concentrate => "ಸಾಂದ್ರ ಆಹಾರ",
        GreenFodder => "ಹಸಿರು ಮೇವು",
        DryRoughage => "ಒಣ ಮೇವು",
        High => "ಹೆಚ್ಚು",
        Moderate => "ಮಧ್ಯಮ",
        Low => "ಕಡಿಮೆ",
        IntensiveSystem => "ತೀವ್ರ ಪದ್ಧತಿ",
        SemiIntensiveSystem => "ಅರೆ-ತೀವ್ರ ಪದ್ಧತಿ",
        Intensive => "ತೀವ್ರ",
        SemiIntensive => "ಅರೆ-ತೀವ್ರ",
        ShowValues => "ಪ್ರಮಾಣ ತೋರಿಸಿ",
        HideValues => "ಪ್ರಮಾಣ ಮರೆಮಾಡಿ",
        NoData => "ಈ ಆಯ್ಕೆಗೆ ಶಿಫಾರಸು ಇಲ್ಲ",
        Grams => "ಗ್ರಾಂ",
        LanguageLabel => "ಭಾಷೆ",
    }
}

/// Persisted language, else `fallback`. Unknown stored codes read as English.
pub fn load_language(store: &dyn PreferenceStore, fallback: Language) -> Language {
    match store.get(&PrefKey::Language) {
        Some(PrefValue::Text(code)) => Language::from_code(&code).unwrap_or_else(|| {
            tracing::warn!(%code, "unknown persisted language; using English");
            Language::English
        }),
        _ => fallback,
    }
}

pub fn save_language(store: &mut dyn PreferenceStore, language: Language) {
    store.set(PrefKey::Language, PrefValue::Text(language.code().to_string()));
    tracing::info!(language = %language, "language changed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn codes_parse_with_region_suffixes() {
        assert_eq!(Language::from_code("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_code("kn_IN"), Some(Language::Kannada));
        assert_eq!(Language::from_code("EN-us"), Some(Language::English));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn every_language_translates_the_feed_components() {
        for language in Language::ALL {
            let strings = Strings::new(language);
            for key in [MessageKey::Concentrate, MessageKey::GreenFodder, MessageKey::DryRoughage] {
                assert!(!strings.get(key).is_empty());
            }
        }
        assert_eq!(Strings::new(Language::Hindi).get(MessageKey::GreenFodder), "हरा चारा");
    }

    #[test]
    fn language_persists_and_unknown_codes_fall_back_to_english() {
        let mut store = MemoryStore::new();
        assert_eq!(load_language(&store, Language::Kannada), Language::Kannada);

        save_language(&mut store, Language::Hindi);
        assert_eq!(load_language(&store, Language::English), Language::Hindi);

        store.set(PrefKey::Language, PrefValue::Text("xx".into()));
        assert_eq!(load_language(&store, Language::Kannada), Language::English);
    }
}
