use crate::error::ScrapeError;
use lazy_static::lazy_static;
use scraper::{Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref H1: Selector = Selector::parse("h1").expect(E);
    static ref P: Selector = Selector::parse("p").expect(E);
}

/// Title and body paragraphs pulled out of one page.
#[derive(Debug, PartialEq, Eq)]
pub struct Article {
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

/// Parse raw page bytes and collect the first `<h1>` text as title and every
/// `<p>` text as a paragraph, in document order.
pub fn extract(raw: &[u8]) -> Result<Article, ScrapeError> {
    let html = std::str::from_utf8(raw)?;
    let doc = Html::parse_document(html);

    let title = doc
        .select(&H1)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string());

    // Text content only, tags stripped. Empty paragraphs stay in.
    let paragraphs = doc
        .select(&P)
        .map(|p| p.text().collect::<String>())
        .collect();

    Ok(Article { title, paragraphs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_extracts_title_and_paragraphs_in_document_order() {
        let html = fs::read_to_string("tests/htmls/article.html").expect("Invalid file path");
        let article = extract(html.as_bytes()).unwrap();

        let expected = Article {
            title: Some("Budgeting Basics".to_string()),
            paragraphs: vec![
                "By J. Porter".to_string(),
                "A budget is a plan for every dollar you earn, not a record of where the money went.".to_string(),
                "Start with fixed costs: rent, utilities, and any debt payments due each month.".to_string(),
                String::new(),
                "Whatever remains splits between savings & spending money.".to_string(),
                "Sign up for the weekly letter.".to_string(),
            ],
        };
        assert_eq!(article, expected);
    }

    #[test]
    fn test_no_h1_means_no_title() {
        let html = fs::read_to_string("tests/htmls/untitled.html").expect("Invalid file path");
        let article = extract(html.as_bytes()).unwrap();

        assert_eq!(article.title, None);
        assert_eq!(
            article.paragraphs,
            vec![
                "First body paragraph.".to_string(),
                "Second body paragraph.".to_string(),
            ]
        );
    }

    #[test]
    fn test_title_is_the_first_h1() {
        let html = b"<html><h1>First</h1><p>x</p><h1>Second</h1></html>";
        let article = extract(html).unwrap();
        assert_eq!(article.title, Some("First".to_string()));
    }

    #[test]
    fn test_title_text_is_trimmed_and_tags_are_stripped() {
        let html = b"<html><h1>\n  An <em>odd</em> headline \n</h1></html>";
        let article = extract(html).unwrap();
        assert_eq!(article.title, Some("An odd headline".to_string()));
    }

    #[test]
    fn test_empty_paragraphs_are_kept() {
        let html = b"<html><h1>T</h1><p>one</p><p></p><p>three</p></html>";
        let article = extract(html).unwrap();
        assert_eq!(
            article.paragraphs,
            vec!["one".to_string(), String::new(), "three".to_string()]
        );
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let raw = [b'<', b'p', b'>', 0xff, 0xfe, b'<', b'/', b'p', b'>'];
        let err = extract(&raw).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }
}
