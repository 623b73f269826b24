use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Output filename for a document code: diacritics removed, spaces to `_`,
/// slashes to `-`, `.pdf` appended.
pub fn filename(code: &str) -> String {
    let cleaned = remove_diacritics(code).replace(' ', "_").replace('/', "-");
    format!("{cleaned}.pdf")
}

/// Drops every combining mark after decomposition, spacing marks included,
/// not only the non-spacing accents found in Latin scripts.
fn remove_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}
