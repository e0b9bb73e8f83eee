//! Лексический анализатор SQL для ddlparser
//!
//! Преобразует входной SQL текст в последовательность токенов для дальнейшего
//! парсинга. Сканирование выполняется за один линейный проход и полностью
//! завершается до начала синтаксического анализа.

use crate::common::{Error, Result};
use crate::parser::keywords::Keyword;
use crate::parser::token::{classify_symbol, Position, Token, TokenStream, Word};

/// Лексический анализатор SQL
pub struct Lexer {
    /// Исходный текст
    input: Vec<char>,
    /// Текущая позиция в тексте
    position: usize,
    /// Текущая позиция для отображения ошибок
    current_position: Position,
}

impl Lexer {
    /// Создает новый лексический анализатор
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            current_position: Position::start(),
        }
    }

    /// Сканирует весь входной текст.
    ///
    /// Поток всегда завершается единственным [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<TokenStream> {
        let mut stream = TokenStream::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let start_position = self.current_position;
            let Some(current_char) = self.peek() else {
                stream.push(Token::Eof, start_position);
                break;
            };

            // Определяем тип токена по первому символу
            let token = match current_char {
                '\'' => self.read_string_literal()?,
                '"' => self.read_quoted_identifier()?,
                '0'..='9' => self.read_number(),
                c if c.is_alphabetic() || c == '_' => self.read_identifier_or_keyword(),
                _ => self.read_symbol()?,
            };
            stream.push(token, start_position);
        }

        log::debug!("tokenized {} characters into {} tokens", self.input.len(), stream.len());
        Ok(stream)
    }

    // === Вспомогательные методы ===

    /// Возвращает текущий символ и продвигает позицию
    pub(crate) fn advance(&mut self) -> char {
        if self.position >= self.input.len() {
            return '\0';
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.current_position.line += 1;
            self.current_position.column = 1;
        } else {
            self.current_position.column += 1;
        }
        self.current_position.offset += 1;

        ch
    }

    /// Возвращает текущий символ без продвижения позиции
    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_ahead(0)
    }

    /// Возвращает символ на определенном расстоянии от текущей позиции
    pub(crate) fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Пропускает пробельные символы и комментарии
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_ahead(1)) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.advance();
                }
                (Some('-'), Some('-')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }
}

// Подключаем методы чтения токенов из отдельного файла
include!("lexer_readers.rs");
