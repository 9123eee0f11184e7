use std::sync::LazyLock;

use scraper::{Html, Selector};

static H1_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

const ASCII_PARENS: (char, char) = ('(', ')');
const FULLWIDTH_PARENS: (char, char) = ('（', '）');

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Title {
    pub company_name: Option<String>,
    pub stock_code: Option<String>,
}

/// Company heading is the second `<h1>`, shaped like `Name(1234)`.
pub fn extract(doc: &Html) -> Title {
    let Some(h1) = doc.select(&H1_SEL).nth(1) else {
        return Title::default();
    };
    let text: String = h1.text().collect();
    split_title(&text)
}

/// Split on ASCII parens; full-width ones only when there is no ASCII `(`,
/// since names like `（株）ABC` carry full-width parens themselves.
pub fn split_title(text: &str) -> Title {
    let (open_paren, close_paren) = if text.contains(ASCII_PARENS.0) {
        ASCII_PARENS
    } else {
        FULLWIDTH_PARENS
    };
    let Some((before, after)) = text.split_once(open_paren) else {
        return Title::default();
    };
    let name = non_empty(before);
    let code = after
        .split_once(close_paren)
        .and_then(|(inner, _)| non_empty(inner));

    Title {
        company_name: name,
        stock_code: code,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ── Tests ──
