use std::collections::HashMap;

use once_cell::sync::Lazy;

static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en_US", "English (US)"),
        ("en_GB", "English (UK)"),
        ("en_AU", "English (AU)"),
        ("en_CA", "English (CA)"),
        ("es_ES", "Spanish (Spain)"),
        ("es_MX", "Spanish (Mexico)"),
        ("fr_FR", "French (France)"),
        ("fr_CA", "French (Canada)"),
        ("de_DE", "German"),
        ("it_IT", "Italian"),
        ("pt_BR", "Portuguese (Brazil)"),
        ("pt_PT", "Portuguese (Portugal)"),
        ("ru_RU", "Russian"),
        ("ja_JP", "Japanese"),
        ("ko_KR", "Korean"),
        ("zh_CN", "Chinese (Simplified)"),
        ("zh_TW", "Chinese (Traditional)"),
        ("ar_SA", "Arabic"),
        ("hi_IN", "Hindi"),
        ("th_TH", "Thai"),
        ("sv_SE", "Swedish"),
        ("no_NO", "Norwegian"),
        ("da_DK", "Danish"),
        ("fi_FI", "Finnish"),
        ("pl_PL", "Polish"),
        ("nl_NL", "Dutch"),
        ("tr_TR", "Turkish"),
    ])
});

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Display label for the first locale tag of a voice.
pub fn primary_language<S: AsRef<str>>(tags: &[S]) -> String {
    match tags.first() {
        Some(tag) => language_label(tag.as_ref()),
        None => UNKNOWN_LANGUAGE.to_string(),
    }
}

/// `en_US` → `English (US)`; unmapped `xx_YY` → `XX (YY)`; anything else as is.
pub fn language_label(tag: &str) -> String {
    if let Some(name) = LANGUAGE_NAMES.get(tag) {
        return (*name).to_string();
    }
    match tag.split_once('_') {
        Some((language, country)) => {
            format!("{} ({})", language.to_uppercase(), country.to_uppercase())
        }
        None => tag.to_string(),
    }
}
