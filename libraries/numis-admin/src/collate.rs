//! Locale-aware name comparison
//!
//! Primary comparison ignores case and the accents used in Spanish and
//! Portuguese names; equal keys fall back to the raw string so the order is
//! total.

use std::cmp::Ordering;

/// Fold a character to its unaccented lowercase base
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        other => other.to_lowercase().next().unwrap_or(other),
    }
}

/// Case and accent insensitive key
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Compare two names for display ordering
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(fold_char)
        .cmp(b.chars().map(fold_char))
        .then_with(|| a.cmp(b))
}

/// Whether `haystack` contains `needle`, ignoring case
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
