//! Display names for the languages complaints are commonly filed in.

static LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("bn", "Bengali"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("ur", "Urdu"),
    ("or", "Odia"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("ar", "Arabic"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("pt", "Portuguese"),
];

/// Display name for an ISO-639-1 `code`; unknown codes are returned as-is.
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Every code with a known display name.
pub fn known_codes() -> impl Iterator<Item = &'static str> {
    LANGUAGE_NAMES.iter().map(|(code, _)| *code)
}
