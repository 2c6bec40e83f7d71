/// Renders a count together with the correctly declined noun.
pub trait Pluralizer {
    fn pluralize(&self, count: usize) -> String;
}

/// Russian agreement for "отзыв": 1 → singular, 2–4 → paucal, everything
/// else → plural, with 11–14 always taking the plural form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewCountDeclension;

impl Pluralizer for ReviewCountDeclension {
    fn pluralize(&self, count: usize) -> String {
        let last_digit = count % 10;
        let last_two_digits = count % 100;

        let noun = if last_digit == 1 && last_two_digits != 11 {
            "отзыв"
        } else if (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two_digits) {
            "отзыва"
        } else {
            "отзывов"
        };

        format!("{count} {noun}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declension_samples() {
        let p = ReviewCountDeclension;
        assert_eq!(p.pluralize(1), "1 отзыв");
        assert_eq!(p.pluralize(2), "2 отзыва");
        assert_eq!(p.pluralize(11), "11 отзывов");
        assert_eq!(p.pluralize(21), "21 отзыв");
    }

    #[test]
    fn test_declension_teens_and_large_counts() {
        let p = ReviewCountDeclension;
        assert_eq!(p.pluralize(0), "0 отзывов");
        assert_eq!(p.pluralize(5), "5 отзывов");
        assert_eq!(p.pluralize(12), "12 отзывов");
        assert_eq!(p.pluralize(14), "14 отзывов");
        assert_eq!(p.pluralize(22), "22 отзыва");
        assert_eq!(p.pluralize(25), "25 отзывов");
        assert_eq!(p.pluralize(111), "111 отзывов");
        assert_eq!(p.pluralize(113), "113 отзывов");
        assert_eq!(p.pluralize(1001), "1001 отзыв");
        assert_eq!(p.pluralize(1004), "1004 отзыва");
    }
}
