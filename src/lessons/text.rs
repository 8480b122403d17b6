//! String formatting report: case variants, reversal and counts.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

use super::LessonError;

/// A word starts at an ASCII word character and runs to the next whitespace
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReport {
    pub original: String,
    pub uppercase: String,
    pub lowercase: String,
    pub title_case: String,
    pub reversed: String,
    pub word_count: usize,
    pub char_count: usize,
}

pub fn format_text(input: &str) -> Result<TextReport, LessonError> {
    if input.trim().is_empty() {
        return Err(LessonError::EmptyText);
    }

    Ok(TextReport {
        original: input.to_string(),
        uppercase: input.to_uppercase(),
        lowercase: input.to_lowercase(),
        title_case: title_case(input),
        reversed: input.chars().rev().collect(),
        word_count: input.split_whitespace().count(),
        char_count: input.chars().count(),
    })
}

/// Uppercase the first character of every word and lowercase the rest
pub fn title_case(input: &str) -> String {
    WORD.replace_all(input, |caps: &Captures<'_>| capitalize(&caps[0]))
        .into_owned()
}

/// `"banana"` -> `"Banana"`, `"bANANA"` -> `"Banana"`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl fmt::Display for TextReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📝 String Formatting Results:")?;
        writeln!(f, "Original: \"{}\"", self.original)?;
        writeln!(f, "UPPERCASE: \"{}\"", self.uppercase)?;
        writeln!(f, "lowercase: \"{}\"", self.lowercase)?;
        writeln!(f, "Title Case: \"{}\"", self.title_case)?;
        writeln!(f, "Reversed: \"{}\"", self.reversed)?;
        write!(
            f,
            "Stats: {} words, {} characters",
            self.word_count, self.char_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_rejected() {
        assert_eq!(format_text(""), Err(LessonError::EmptyText));
        assert_eq!(format_text("   \t"), Err(LessonError::EmptyText));
    }

    #[test]
    fn test_report_fields() {
        let report = format_text("hello wORLD").unwrap();
        assert_eq!(report.uppercase, "HELLO WORLD");
        assert_eq!(report.lowercase, "hello world");
        assert_eq!(report.title_case, "Hello World");
        assert_eq!(report.reversed, "DLROw olleh");
        assert_eq!(report.word_count, 2);
        assert_eq!(report.char_count, 11);
    }

    #[test]
    fn test_word_count_ignores_surrounding_whitespace() {
        let report = format_text("  one   two three ").unwrap();
        assert_eq!(report.word_count, 3);
        assert_eq!(report.char_count, 18);
    }

    #[test]
    fn test_title_case_skips_leading_punctuation() {
        assert_eq!(title_case("(rust) is fUN"), "(Rust) Is Fun");
        assert_eq!(title_case("it's"), "It's");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bANANA"), "Banana");
        assert_eq!(capitalize(""), "");
    }
}
