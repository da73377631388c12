//! Search term folding

/// Fold text for case- and diacritic-insensitive comparison.
///
/// Characters are transliterated to ASCII (`é` becomes `e`, `ş` becomes `s`)
/// and then lowercased.
pub fn asciify(text: &str) -> String {
    deunicode::deunicode(text).to_ascii_lowercase()
}
