//! Textual form of the excluded zip-code list.
//!
//! The list is stored as a single configuration value: codes joined with a
//! comma. Reading is lenient (whitespace around codes and empty pieces are
//! ignored) so hand-edited values still parse.

const SEPARATOR: char = ',';

/// Serialize a list of zip codes to its stored form.
///
/// # Example
/// ```
/// use pickup_postage::domain::zip_codes::{reverse_transform, transform};
///
/// let codes = vec!["75001".to_string(), "20000".to_string()];
/// let stored = transform(&codes);
/// assert_eq!(stored, "75001,20000");
/// assert_eq!(reverse_transform(&stored), codes);
/// ```
pub fn transform<S: AsRef<str>>(codes: &[S]) -> String {
    codes
        .iter()
        .map(|code| code.as_ref().trim())
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Parse the stored form back into a list of zip codes.
pub fn reverse_transform(stored: &str) -> Vec<String> {
    stored
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `code` can round-trip through the stored form unchanged.
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && !code.contains(SEPARATOR) && code.trim() == code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(transform(&empty), "");
        assert!(reverse_transform("").is_empty());
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(
            reverse_transform(" 75001 ,, 2A004 ,"),
            vec!["75001".to_string(), "2A004".to_string()]
        );
    }

    #[test]
    fn test_transform_skips_blank_codes() {
        assert_eq!(transform(&["13001", " ", "13002 "]), "13001,13002");
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("SW1A 1AA"));
        assert!(is_well_formed("2A004"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed(" 75001"));
        assert!(!is_well_formed("75001,75002"));
    }
}
