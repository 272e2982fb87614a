//! Structured content for one keyword and the page fields derived from it.

use serde::{Deserialize, Serialize};

/// Structured content returned by the content synthesizer for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub prompt: String,
    pub page_description: String,
    pub img_title: String,
    pub alt: String,
    pub caption: String,
}

/// Lower-case the keyword and collapse runs of non-alphanumerics into single
/// hyphens, trimming leading and trailing hyphens.
pub fn slugify(keyword: &str) -> String {
    let mut slug = String::with_capacity(keyword.len());
    let mut pending_hyphen = false;
    for ch in keyword.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Page slug for one generated asset: the keyword slug plus a random 5-digit
/// disambiguator, so repeated keywords (or a crash-and-resume rerun of the
/// same keyword) never collide on slug.
pub fn page_slug(keyword: &str) -> String {
    format!(
        "{}-free-images-{}",
        slugify(keyword),
        fastrand::u32(10_000..100_000)
    )
}

/// Fixed page title template.
pub fn page_title(keyword: &str) -> String {
    format!("{keyword} Free Images - Realistic AI Generated Images")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Sunset Beach"), "sunset-beach");
        assert_eq!(slugify("Food & Drink"), "food-drink");
        assert_eq!(slugify("  CITY   skyline!!"), "city-skyline");
    }

    #[test]
    fn slugify_trims_edge_hyphens() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("!?"), "");
    }

    #[test]
    fn page_slug_has_keyword_prefix_and_five_digit_suffix() {
        let slug = page_slug("Sunset Beach");
        let suffix = slug.rsplit('-').next().unwrap();

        assert!(slug.starts_with("sunset-beach-free-images-"));
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn page_slug_disambiguates_repeated_keywords() {
        let slugs: std::collections::HashSet<String> =
            (0..20).map(|_| page_slug("sunset beach")).collect();
        // 20 draws from 90k values colliding down to 1 is as good as never
        assert!(slugs.len() > 1);
    }

    #[test]
    fn page_title_uses_the_fixed_template() {
        assert_eq!(
            page_title("sunset beach"),
            "sunset beach Free Images - Realistic AI Generated Images"
        );
    }
}
