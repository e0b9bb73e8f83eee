//! Курсор парсера по потоку токенов
//!
//! Позиция хранится как обычный индекс в непрерывном векторе токенов,
//! поэтому откат на один токен сводится к уменьшению индекса.

use crate::common::{Error, Result};
use crate::parser::keywords::Keyword;
use crate::parser::token::{Position, Token, TokenStream};

/// Курсор чтения токенов
#[derive(Debug, Clone)]
pub struct TokenCursor {
    stream: TokenStream,
    /// Индекс текущего токена; не превышает длину потока
    index: usize,
    /// Разрешен ли откат: сбрасывается после каждого `rewind`
    rewindable: bool,
}

impl TokenCursor {
    /// Создает курсор; поток без завершающего EOF дополняется им
    pub fn new(mut stream: TokenStream) -> Self {
        if !matches!(stream.tokens().last(), Some(Token::Eof)) {
            let position = stream.position(stream.len());
            stream.push(Token::Eof, position);
        }

        Self {
            stream,
            index: 0,
            rewindable: false,
        }
    }

    /// Текущий индекс чтения
    pub fn index(&self) -> usize {
        self.index
    }

    /// Возвращает текущий токен без продвижения
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Возвращает токен на `n` позиций вперед; за концом потока EOF
    pub fn peek_nth(&self, n: usize) -> &Token {
        self.stream.get(self.index + n).unwrap_or(&Token::Eof)
    }

    /// Позиция текущего токена во входном тексте
    pub fn position(&self) -> Position {
        self.stream.position(self.index)
    }

    /// Возвращает текущий токен и переходит к следующему
    pub fn next_token(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.stream.len() {
            self.index += 1;
        }
        self.rewindable = true;
        token
    }

    /// Возвращает курсор на один токен назад.
    ///
    /// Допускается только один откат после каждого `next_token`.
    pub fn rewind(&mut self) {
        debug_assert!(self.rewindable, "rewind called twice without advancing");
        if self.rewindable && self.index > 0 {
            self.index -= 1;
        }
        self.rewindable = false;
    }

    /// Поглощает токен, если он равен ожидаемому
    pub fn consume_token(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Требует наличие ожидаемого токена
    pub fn expect_token(&mut self, expected: &Token) -> Result<()> {
        if self.consume_token(expected) {
            Ok(())
        } else {
            Err(self.expected(expected, self.peek()))
        }
    }

    /// Поглощает ключевое слово, если оно следующее
    pub fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek().is_keyword(keyword) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Поглощает последовательность ключевых слов целиком или не поглощает ничего
    pub fn consume_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let saved_index = self.index;
        let saved_rewindable = self.rewindable;

        for keyword in keywords {
            if !self.consume_keyword(*keyword) {
                self.index = saved_index;
                self.rewindable = saved_rewindable;
                return false;
            }
        }

        true
    }

    /// Требует наличие ключевого слова
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.expected(keyword, self.peek()))
        }
    }

    /// Строит ошибку вида "expected <context> found <found>" в текущей позиции
    pub fn expected(&self, context: impl std::fmt::Display, found: &Token) -> Error {
        Error::expected(context, found, self.position())
    }

    /// Позиция токена, прочитанного последним
    pub fn previous_position(&self) -> Position {
        self.stream.position(self.index.saturating_sub(1))
    }
}
