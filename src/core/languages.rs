//! Language display names, defaults and voice-name formatting.

use phf::phf_map;

use crate::core::tts::Voice;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_VOICE: &str = "en-US-Chirp3-HD-Charon";

/// Display names for the languages offered in the language picker.
pub static LANGUAGE_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "ar-XA" => "Arabic, multi-region",
    "id-ID" => "Bahasa Indonesia (Indonesia)",
    "de-DE" => "Deutsch (Deutschland)",
    "en-AU" => "English (Australia)",
    "en-GB" => "English (Great Britain)",
    "en-IN" => "English (India)",
    "en-US" => "English (United States)",
    "es-ES" => "Español (España)",
    "es-US" => "Español (Estados Unidos)",
    "fr-CA" => "Français (Canada)",
    "fr-FR" => "Français (France)",
    "it-IT" => "Italiano (Italia)",
    "nl-NL" => "Nederlands (Nederland)",
    "pl-PL" => "Polski (Polska)",
    "pt-BR" => "Português (Brasil)",
    "sw-KE" => "Swahili (Kenya)",
    "vi-VN" => "Tiếng Việt (Việt Nam)",
    "tr-TR" => "Türkçe (Türkiye)",
    "ru-RU" => "Русский (Россия)",
    "uk-UA" => "Українська (Україна)",
    "ur-IN" => "اردو (بھارت)",
    "mr-IN" => "मराठी (भारत)",
    "hi-IN" => "हिन्दी (भारत)",
    "bn-IN" => "বাংলা (ভারত)",
    "gu-IN" => "ગુજરાતી (ભારત)",
    "ta-IN" => "தமிழ் (இந்தியா)",
    "te-IN" => "తెలుగు (భారతదేశం)",
    "kn-IN" => "ಕನ್ನಡ (ಭಾರತ)",
    "ml-IN" => "മലയാളം (ഇന്ത്യ)",
    "th-TH" => "ไทย (ประเทศไทย)",
    "ja-JP" => "日本語（日本)",
    "cmn-CN" => "普通话 (中国大陆)",
    "ko-KR" => "한국어 (대한민국)",
};

/// Display name for `code`, or the code itself when unknown.
pub fn language_display_name(code: &str) -> &str {
    LANGUAGE_NAMES.get(code).copied().unwrap_or(code)
}

/// Components of a voice name such as `en-US-Chirp3-HD-Charon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceNameParts<'a> {
    pub language: &'a str,
    pub country: &'a str,
    pub audio_type: &'a str,
    pub name: &'a str,
}

/// Split a voice name into language, country, audio type and the remainder.
///
/// Names with fewer than four dash-separated parts are not parsed.
pub fn parse_voice_name(voice_name: &str) -> Option<VoiceNameParts<'_>> {
    let mut parts = voice_name.splitn(4, '-');
    let language = parts.next()?;
    let country = parts.next()?;
    let audio_type = parts.next()?;
    let name = parts.next()?;
    Some(VoiceNameParts {
        language,
        country,
        audio_type,
        name,
    })
}

/// Label shown for a voice name; unparseable names are shown as-is.
pub fn format_voice_name(voice_name: &str) -> String {
    match parse_voice_name(voice_name) {
        Some(p) => format!("{}-{}-{}-{}", p.language, p.country, p.audio_type, p.name),
        None => voice_name.to_string(),
    }
}

pub fn format_voice_display(voice: &Voice) -> String {
    format_voice_name(&voice.name)
}

/// Distinct language codes offered by `voices`, sorted.
pub fn available_languages(voices: &[Voice]) -> Vec<&str> {
    let mut codes: Vec<&str> = voices.iter().map(|v| v.language_code.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

/// Voices for `language_code`, in catalog order.
pub fn voices_for_language<'a>(voices: &'a [Voice], language_code: &str) -> Vec<&'a Voice> {
    voices
        .iter()
        .filter(|v| v.language_code == language_code)
        .collect()
}

/// Index of the first voice whose label contains the default voice, else 0.
pub fn default_voice_index(voices: &[&Voice]) -> usize {
    voices
        .iter()
        .position(|v| format_voice_display(v).contains(DEFAULT_VOICE))
        .unwrap_or(0)
}
