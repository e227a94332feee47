use crate::extract::Article;

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Serialize an article body as minimal html: `<html><p>..</p>..</html>`.
pub fn render(article: &Article) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("<html>");
    for p in &article.paragraphs {
        out.push_str("<p>");
        // Text goes out exactly as extracted; entities are not re-escaped.
        out.push_str(p);
        out.push_str("</p>");
    }
    out.push_str("</html>");
    out.into_bytes()
}

/// Build `<sanitized-title>.html`, or `None` when nothing usable remains.
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`; surrounding whitespace and dots are trimmed.
pub fn file_name(title: &str) -> Option<String> {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("{}.html", cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use pretty_assertions::assert_eq;

    fn article(paragraphs: &[&str]) -> Article {
        Article {
            title: Some("T".to_string()),
            paragraphs: paragraphs.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_renders_paragraphs_in_order() {
        let out = render(&article(&["One", "Two"]));
        assert_eq!(out, b"<html><p>One</p><p>Two</p></html>".to_vec());
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = article(&["alpha", "", "beta"]);
        assert_eq!(render(&a), render(&a));
    }

    #[test]
    fn test_rendered_output_reextracts_to_the_same_paragraphs() {
        // The title does not survive the trip; the body must.
        let a = article(&["One", "", "Two words here"]);
        let rendered = render(&a);
        let back = extract(&rendered).unwrap();
        assert_eq!(back.title, None);
        assert_eq!(back.paragraphs, a.paragraphs);
    }

    #[test]
    fn test_file_name_keeps_plain_titles() {
        assert_eq!(file_name("Hello"), Some("Hello.html".to_string()));
        assert_eq!(
            file_name("Saving Investing and Bitcoin"),
            Some("Saving Investing and Bitcoin.html".to_string())
        );
    }

    #[test]
    fn test_file_name_replaces_reserved_characters() {
        assert_eq!(
            file_name("Budgeting: a how-to?"),
            Some("Budgeting_ a how-to_.html".to_string())
        );
        assert_eq!(file_name("a/b\\c"), Some("a_b_c.html".to_string()));
    }

    #[test]
    fn test_file_name_neutralizes_traversal_shaped_titles() {
        let name = file_name("../../etc/passwd").unwrap();
        assert!(!name.contains('/'));
        assert!(!name.starts_with('.'));
    }

    #[test]
    fn test_file_name_rejects_unusable_titles() {
        assert_eq!(file_name(""), None);
        assert_eq!(file_name("   "), None);
        assert_eq!(file_name("..."), None);
    }
}
