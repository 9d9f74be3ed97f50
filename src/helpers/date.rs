//! Date and reading-time helpers

use chrono::{DateTime, TimeZone};

/// Average reading speed used for time-to-read estimates
const WORDS_PER_MINUTE: usize = 265;

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date for Atom feeds
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc3339()
}

/// Count words in plain text. Each CJK character or Hangul syllable block
/// separated by whitespace counts as a word, same as Latin words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .count()
}

/// Estimated minutes to read, never below one for non-empty text
pub fn time_to_read(text: &str) -> Option<u32> {
    let words = count_words(text);
    if words == 0 {
        return None;
    }
    let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round() as u32;
    Some(minutes.max(1))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each category
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "DD.MM.YYYY"), "15.01.2024");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "January 15, 2024");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }

    #[test]
    fn test_time_to_read() {
        assert_eq!(time_to_read(""), None);
        assert_eq!(time_to_read("a few words"), Some(1));
        let long = "word ".repeat(265 * 4);
        assert_eq!(time_to_read(&long), Some(4));
    }

    #[test]
    fn test_count_words_ignores_punctuation() {
        assert_eq!(count_words("안녕하세요 세계 - hello !"), 3);
    }
}
