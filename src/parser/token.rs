//! Токены для SQL лексера ddlparser
//!
//! Определяет закрытый набор токенов, которые может распознать лексический
//! анализатор: знаки пунктуации и операторы, ключевые слова, идентификаторы,
//! литералы и маркер конца ввода. Равенство токенов определяется вариантом
//! и значением; позиции хранятся отдельно в [`TokenStream`].

use crate::parser::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Позиция токена в исходном тексте
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Идентификатор в том виде, в котором он записан во входном тексте
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// Текст идентификатора (для идентификатора в кавычках без кавычек)
    pub value: String,
    /// Был ли идентификатор заключен в двойные кавычки
    pub quoted: bool,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.value.replace('"', "\"\""))
        } else {
            f.write_str(&self.value)
        }
    }
}

/// Токен SQL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // === Разделители ===
    Comma,      // ,
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;
    Period,     // .
    Minus,      // -

    // === Операторы сравнения ===
    Equal,              // =
    /// `<>` или `!=`, сохраняется исходное написание
    NotEqual(String),
    LessThan,           // <
    GreaterThan,        // >
    LessThanOrEqual,    // <=
    GreaterThanOrEqual, // >=

    /// Ключевое слово
    Keyword(Keyword),
    /// Идентификатор (имя таблицы, колонки, типа и т.д.)
    Word(Word),
    /// Числовой литерал в исходном написании
    Number(String),
    /// Строковый литерал без кавычек, с раскрытыми `''`
    String(String),

    /// Конец ввода
    Eof,
}

impl Token {
    /// Создает идентификатор без кавычек
    pub fn word(value: impl Into<String>) -> Self {
        Token::Word(Word::new(value))
    }

    /// Является ли токен указанным ключевым словом
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(k) if *k == keyword)
    }

    /// Является ли токен идентификатором
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}

impl From<Keyword> for Token {
    fn from(keyword: Keyword) -> Self {
        Token::Keyword(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Comma => f.write_str(","),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Semicolon => f.write_str(";"),
            Token::Period => f.write_str("."),
            Token::Minus => f.write_str("-"),
            Token::Equal => f.write_str("="),
            Token::NotEqual(spelling) => f.write_str(spelling),
            Token::LessThan => f.write_str("<"),
            Token::GreaterThan => f.write_str(">"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::Keyword(keyword) => keyword.fmt(f),
            Token::Word(word) => word.fmt(f),
            Token::Number(number) => f.write_str(number),
            Token::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Token::Eof => f.write_str("EOF"),
        }
    }
}

/// Сопоставляет символ (или пару символов) знаку пунктуации или оператору.
///
/// Возвращает токен и количество поглощенных символов; более длинное
/// совпадение имеет приоритет.
pub fn classify_symbol(current: char, next: Option<char>) -> Option<(Token, usize)> {
    let classified = match (current, next) {
        ('<', Some('=')) => (Token::LessThanOrEqual, 2),
        ('<', Some('>')) => (Token::NotEqual("<>".to_string()), 2),
        ('>', Some('=')) => (Token::GreaterThanOrEqual, 2),
        ('!', Some('=')) => (Token::NotEqual("!=".to_string()), 2),
        ('<', _) => (Token::LessThan, 1),
        ('>', _) => (Token::GreaterThan, 1),
        ('=', _) => (Token::Equal, 1),
        ('(', _) => (Token::LeftParen, 1),
        (')', _) => (Token::RightParen, 1),
        (',', _) => (Token::Comma, 1),
        (';', _) => (Token::Semicolon, 1),
        ('.', _) => (Token::Period, 1),
        ('-', _) => (Token::Minus, 1),
        _ => return None,
    };
    Some(classified)
}

/// Последовательность токенов с позициями, завершающаяся [`Token::Eof`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    positions: Vec<Position>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token, position: Position) {
        self.tokens.push(token);
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Позиция токена; для индекса за концом возвращается позиция последнего токена
    pub fn position(&self, index: usize) -> Position {
        self.positions
            .get(index)
            .or_else(|| self.positions.last())
            .copied()
            .unwrap_or_else(Position::start)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
