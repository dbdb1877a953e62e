//! Article Formatter — splits generated free text into headline, subheading and
//! body paragraphs, and renders the result as HTML.
//!
//! The split is a best-effort heuristic. Model output has no guaranteed shape,
//! so a long standfirst is read as body text and a short first paragraph is
//! read as a subheading.
//!
//! This is the library surface for front-end callers: the relay endpoint only
//! returns the raw article text, and callers format it here. `ParsedArticle`
//! serializes so such a caller can pass it on as JSON.

use serde::{Deserialize, Serialize};

/// A second line shorter than this many characters is taken as the subheading.
/// Tunable, not a contract.
pub const MAX_SUBHEADING_CHARS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArticle {
    pub headline: String,
    /// Empty when the second line was too long or absent.
    pub subheading: String,
    pub body: Vec<String>,
}

impl ParsedArticle {
    pub fn is_empty(&self) -> bool {
        self.headline.is_empty() && self.subheading.is_empty() && self.body.is_empty()
    }
}

/// Parses article text into its display parts. Pure and deterministic.
pub fn parse(article_text: &str) -> ParsedArticle {
    let mut lines = article_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string);

    let Some(headline) = lines.next() else {
        return ParsedArticle::default();
    };

    let mut article = ParsedArticle {
        headline,
        ..ParsedArticle::default()
    };

    if let Some(second) = lines.next() {
        if second.chars().count() < MAX_SUBHEADING_CHARS {
            article.subheading = second;
        } else {
            article.body.push(second);
        }
    }
    article.body.extend(lines);

    article
}

/// Renders a parsed article as an HTML fragment with all text escaped.
pub fn render_html(article: &ParsedArticle) -> String {
    let mut html = String::new();

    if !article.headline.is_empty() {
        html.push_str(&format!("<h2>{}</h2>", escape_html(&article.headline)));
    }
    if !article.subheading.is_empty() {
        html.push_str(&format!("<h3>{}</h3>", escape_html(&article.subheading)));
    }
    for paragraph in &article.body {
        html.push_str(&format!("<p>{}</p>", escape_html(paragraph)));
    }

    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
