use unicode_normalization::UnicodeNormalization;

use super::types::TaskRecord;

/// Folds text for case- and diacritic-insensitive comparison.
///
/// Decomposes with NFD, drops combining marks, then lowercases.
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// True when the record's title or description contains the folded needle.
pub fn matches(record: &TaskRecord, folded_needle: &str) -> bool {
    [record.title.as_deref(), record.description.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| fold(field).contains(folded_needle))
}
