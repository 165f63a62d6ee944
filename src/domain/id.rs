//! Domain ID generation
//!
//! All IDs use the format: `{6-char-hex}-{type}-{slug}`
//! Example: `019430-goal-visit-iceland`

/// Generate a domain ID from type and title
pub fn generate_id(domain_type: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_prefix, domain_type, slug)
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        // Strip apostrophes entirely, replace other non-alphanumeric with hyphens
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .take(6)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = generate_id("goal", "Visit Iceland");
        assert!(id.len() > 10);
        assert!(id.contains("-goal-"));
        assert!(id.ends_with("visit-iceland"));
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id("task", "Same Title");
        let b = generate_id("task", "Same Title");
        assert_ne!(a, b);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Run a 5K!"), "run-a-5k");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        // Apostrophes should be stripped, not converted to hyphens
        assert_eq!(slugify("don't stop"), "dont-stop");
    }

    #[test]
    fn test_slugify_caps_word_count() {
        let slug = slugify("one two three four five six seven eight");
        assert_eq!(slug, "one-two-three-four-five-six");
    }
}
