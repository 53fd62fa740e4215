//! Code panel with regex-based highlighting

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::{CODE_PLACEHOLDER, HIGHLIGHT_KEYWORDS, SOLUTION_LANGUAGE};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?P<comment>//[^\n]*)|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`)|(?P<keyword>\b(?:{})\b)|(?P<number>\b\d+\b)"#,
        HIGHLIGHT_KEYWORDS.join("|")
    );
    Regex::new(&pattern).expect("highlight pattern is valid")
});

/// Syntax class of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Number,
    Comment,
}

impl TokenKind {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Keyword => "text-syntax-keyword font-semibold",
            Self::String => "text-syntax-string",
            Self::Number => "text-syntax-number",
            Self::Comment => "text-syntax-comment italic",
        }
    }
}

/// A highlighted span of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// Split source into highlighted spans; concatenating the spans yields the input
pub fn highlight(code: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in TOKEN_PATTERN.captures_iter(code) {
        let (kind, m) = if let Some(m) = caps.name("comment") {
            (TokenKind::Comment, m)
        } else if let Some(m) = caps.name("string") {
            (TokenKind::String, m)
        } else if let Some(m) = caps.name("keyword") {
            (TokenKind::Keyword, m)
        } else if let Some(m) = caps.name("number") {
            (TokenKind::Number, m)
        } else {
            continue;
        };

        if m.start() > cursor {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: code[cursor..m.start()].to_string(),
            });
        }
        tokens.push(Token {
            kind,
            text: m.as_str().to_string(),
        });
        cursor = m.end();
    }

    if cursor < code.len() {
        tokens.push(Token {
            kind: TokenKind::Plain,
            text: code[cursor..].to_string(),
        });
    }

    tokens
}

/// Code panel contents
#[derive(Debug, Serialize)]
pub struct CodePanelView {
    pub title: &'static str,
    pub editable: bool,
    /// Raw text for the editable variant
    pub code: String,
    pub placeholder: &'static str,
    /// Highlighted spans for the read-only variant
    pub tokens: Vec<Token>,
    pub line_count: usize,
}

pub fn panel(code: &str, editable: bool) -> CodePanelView {
    let shown = if code.is_empty() { CODE_PLACEHOLDER } else { code };

    CodePanelView {
        title: SOLUTION_LANGUAGE,
        editable,
        code: code.to_string(),
        placeholder: CODE_PLACEHOLDER,
        tokens: highlight(shown),
        line_count: shown.lines().count(),
    }
}
