//! Heuristic resume field parser.
//!
//! A single pass over trimmed lines with first-match-wins assignment. The
//! checks per line are independent and run in a fixed order (email, phone,
//! name), so one line may satisfy more than one category. Experience,
//! education, skills and projects are never populated here; those fields are
//! filled manually through the edit form.

use crate::models::resume::ResumeData;

/// Parses raw extracted text into a best-effort `ResumeData`.
/// Categories with no matching line stay empty — there is no fallback.
pub fn parse_resume_text(text: &str) -> ResumeData {
    let mut data = ResumeData::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let has_digit = line.chars().any(|c| c.is_ascii_digit());
        let char_len = line.chars().count();

        if line.contains('@') && data.email.is_empty() {
            data.email = line.to_string();
        }

        if has_digit && (10..=15).contains(&char_len) && data.phone.is_empty() {
            data.phone = line.to_string();
        }

        if data.name.is_empty() && !line.contains('@') && !has_digit {
            data.name = line.to_string();
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_name_email_phone() {
        let text = "Jane Doe\njane@example.com\n+1 555 123 44\n";
        let data = parse_resume_text(text);
        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.email, "jane@example.com");
        assert_eq!(data.phone, "+1 555 123 44");
    }

    #[test]
    fn test_first_match_wins() {
        let text = "first@example.com\nsecond@example.com\n";
        let data = parse_resume_text(text);
        assert_eq!(data.email, "first@example.com");
    }

    #[test]
    fn test_no_phone_candidate_leaves_phone_empty() {
        // Digit lines outside the 10-15 char window must not match.
        let text = "Jane Doe\njane@example.com\n12345\n123456789012345678\n";
        let data = parse_resume_text(text);
        assert_eq!(data.phone, "");
    }

    #[test]
    fn test_name_skips_digit_and_email_lines() {
        let text = "jane@example.com\n555-123-4567\nJane Doe\n";
        let data = parse_resume_text(text);
        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.phone, "555-123-4567");
    }

    #[test]
    fn test_no_match_leaves_fields_empty() {
        let data = parse_resume_text("\n   \n");
        assert_eq!(data, ResumeData::default());
    }

    #[test]
    fn test_lists_never_populated() {
        let text = "Jane Doe\nExperience\nAcme Corp, Senior Engineer\nEducation\nMIT\n";
        let data = parse_resume_text(text);
        assert!(data.experience.is_empty());
        assert!(data.education.is_empty());
        assert!(data.skills.is_empty());
        assert!(data.projects.is_empty());
    }

    #[test]
    fn test_phone_window_is_char_based() {
        // 10 chars exactly, contains digits.
        let data = parse_resume_text("5551234567");
        assert_eq!(data.phone, "5551234567");
    }

    #[test]
    fn test_email_line_with_digits_can_also_be_phone() {
        // Order-dependent quirk preserved from the original scan: a short
        // digit-bearing email line satisfies both categories.
        let data = parse_resume_text("a1@exam.com\n");
        assert_eq!(data.email, "a1@exam.com");
        assert_eq!(data.phone, "a1@exam.com");
        assert_eq!(data.name, "");
    }
}
