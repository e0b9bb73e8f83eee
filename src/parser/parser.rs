//! Парсер SQL для ddlparser
//!
//! Рекурсивный спуск по заранее полученному потоку токенов. Здесь находятся
//! разбор верхнего уровня (CREATE / DROP) и вспомогательные подграмматики:
//! идентификаторы, имена объектов, типы данных и выражения DEFAULT.
//! Грамматика колонок и ограничений находится в модуле `columns`.

use crate::common::{Error, ParserSettings, Result};
use crate::parser::ast::*;
use crate::parser::cursor::TokenCursor;
use crate::parser::keywords::Keyword;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenStream};

/// Рекурсивный парсер SQL с ограниченным (на один токен) откатом
pub struct SqlParser {
    pub(super) cursor: TokenCursor,
    /// Настройки парсера
    pub(super) settings: ParserSettings,
    /// Текущая вложенность разбираемого выражения
    expression_depth: usize,
}

impl SqlParser {
    /// Создает новый парсер SQL с настройками по умолчанию
    pub fn new(input: &str) -> Result<Self> {
        Self::with_settings(input, ParserSettings::default())
    }

    /// Создает парсер с настройками; входной текст сканируется целиком
    pub fn with_settings(input: &str, settings: ParserSettings) -> Result<Self> {
        let length = input.chars().count();
        if length > settings.max_input_length {
            return Err(Error::InputTooLarge {
                length,
                limit: settings.max_input_length,
            });
        }

        let stream = Lexer::new(input).tokenize()?;
        Ok(Self::from_tokens(stream, settings))
    }

    /// Создает парсер поверх уже полученного потока токенов
    pub fn from_tokens(stream: TokenStream, settings: ParserSettings) -> Self {
        Self {
            cursor: TokenCursor::new(stream),
            settings,
            expression_depth: 0,
        }
    }

    /// Парсит одно SQL выражение; после него допускается только `;` и конец ввода
    pub fn parse(&mut self) -> Result<Statement> {
        let statement = self.parse_statement()?;
        self.expect_end_of_statement()?;
        Ok(statement)
    }

    /// Получает настройки парсера
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let token = self.cursor.next_token();
        match token {
            Token::Keyword(Keyword::Create) => self.parse_create(),
            Token::Keyword(Keyword::Drop) => self.parse_drop(),
            other => Err(Error::expected(
                "a statement",
                &other,
                self.cursor.previous_position(),
            )),
        }
    }

    fn expect_end_of_statement(&mut self) -> Result<()> {
        self.cursor.consume_token(&Token::Semicolon);
        if self.cursor.peek().is_eof() {
            Ok(())
        } else {
            Err(self.cursor.expected("end of statement", self.cursor.peek()))
        }
    }

    fn parse_create(&mut self) -> Result<Statement> {
        let token = self.cursor.next_token();
        match token {
            Token::Keyword(Keyword::Table) => self.parse_create_table(),
            Token::Keyword(Keyword::Schema) => self.parse_create_schema(),
            Token::Keyword(Keyword::View) => Err(Error::unsupported("CREATE VIEW")),
            Token::Keyword(Keyword::Index) => Err(Error::unsupported("CREATE INDEX")),
            other => Err(Error::expected(
                "TABLE, VIEW, INDEX or SCHEMA after CREATE",
                &other,
                self.cursor.previous_position(),
            )),
        }
    }

    fn parse_create_table(&mut self) -> Result<Statement> {
        let if_not_exists = self
            .cursor
            .consume_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists]);
        let name = self.parse_object_name()?;
        let (columns, constraints) = self.parse_columns()?;

        log::debug!(
            "parsed CREATE TABLE {} with {} columns and {} constraints",
            name,
            columns.len(),
            constraints.len()
        );

        Ok(Statement::CreateTable(CreateTableStatement {
            name,
            if_not_exists,
            columns,
            constraints,
        }))
    }

    fn parse_create_schema(&mut self) -> Result<Statement> {
        let if_not_exists = self
            .cursor
            .consume_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists]);
        let name = self.parse_object_name()?;

        log::debug!("parsed CREATE SCHEMA {}", name);
        Ok(Statement::CreateSchema(CreateSchemaStatement {
            name,
            if_not_exists,
        }))
    }

    fn parse_drop(&mut self) -> Result<Statement> {
        if !self.cursor.consume_keyword(Keyword::Table) {
            return Err(self.cursor.expected("TABLE after DROP", self.cursor.peek()));
        }

        let if_exists = self.cursor.consume_keywords(&[Keyword::If, Keyword::Exists]);
        let name = self.parse_object_name()?;
        let cascade = if self.cursor.consume_keyword(Keyword::Cascade) {
            true
        } else {
            self.cursor.consume_keyword(Keyword::Restrict);
            false
        };

        log::debug!("parsed DROP TABLE {}", name);
        Ok(Statement::DropTable(DropTableStatement {
            name,
            if_exists,
            cascade,
        }))
    }
}

// === Подграмматики идентификаторов, типов и выражений ===

impl SqlParser {
    /// Парсит идентификатор
    pub(super) fn parse_identifier(&mut self) -> Result<String> {
        self.parse_identifier_as("identifier")
    }

    /// Парсит идентификатор, описывая ожидание как `context` в сообщении об ошибке
    pub(super) fn parse_identifier_as(&mut self, context: &str) -> Result<String> {
        match self.cursor.peek() {
            Token::Word(word) if !word.value.is_empty() => {
                let value = if self.settings.fold_identifiers && !word.quoted {
                    word.value.to_lowercase()
                } else {
                    word.value.clone()
                };
                self.cursor.next_token();
                Ok(value)
            }
            other => Err(self.cursor.expected(context, other)),
        }
    }

    /// Парсит составное имя объекта `a.b.c`
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName> {
        let mut parts = vec![self.parse_identifier()?];
        while self.cursor.consume_token(&Token::Period) {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    /// Парсит тип данных колонки
    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        let type_name = match self.cursor.peek() {
            Token::Word(word) if !word.quoted => word.value.to_uppercase(),
            Token::Word(_) => return Ok(DataType::Custom(self.parse_object_name()?)),
            other => return Err(self.cursor.expected("a data type", other)),
        };

        let data_type = match type_name.as_str() {
            "SMALLINT" | "INT2" => DataType::SmallInt,
            "INT" | "INTEGER" | "INT4" => DataType::Integer,
            "BIGINT" | "INT8" => DataType::BigInt,
            "REAL" | "FLOAT4" => DataType::Real,
            "FLOAT8" => DataType::DoublePrecision,
            "FLOAT" => {
                self.cursor.next_token();
                // FLOAT(p) с точностью до 24 бит соответствует REAL
                return match self.parse_type_length()? {
                    Some(precision) if precision <= 24 => Ok(DataType::Real),
                    _ => Ok(DataType::DoublePrecision),
                };
            }
            "DOUBLE" => {
                self.cursor.next_token();
                match self.cursor.peek() {
                    Token::Word(word) if word.value.eq_ignore_ascii_case("PRECISION") => {}
                    other => return Err(self.cursor.expected("PRECISION", other)),
                }
                DataType::DoublePrecision
            }
            "NUMERIC" | "DECIMAL" => {
                self.cursor.next_token();
                let (precision, scale) = self.parse_numeric_modifiers()?;
                return Ok(DataType::Numeric { precision, scale });
            }
            "BOOLEAN" | "BOOL" => DataType::Boolean,
            "TEXT" => DataType::Text,
            "VARCHAR" => {
                self.cursor.next_token();
                let length = self.parse_type_length()?;
                return Ok(DataType::Varchar { length });
            }
            "CHAR" | "CHARACTER" => {
                self.cursor.next_token();
                let varying = matches!(
                    self.cursor.peek(),
                    Token::Word(word) if word.value.eq_ignore_ascii_case("VARYING")
                );
                if varying {
                    self.cursor.next_token();
                }
                let length = self.parse_type_length()?;
                return Ok(if varying {
                    DataType::Varchar { length }
                } else {
                    DataType::Char { length }
                });
            }
            "DATE" => DataType::Date,
            "TIME" => DataType::Time,
            "TIMESTAMP" => DataType::Timestamp,
            "BYTEA" => DataType::Bytea,
            "UUID" => DataType::Uuid,
            "JSON" | "JSONB" => DataType::Json,
            _ => return Ok(DataType::Custom(self.parse_object_name()?)),
        };

        self.cursor.next_token();
        Ok(data_type)
    }

    /// Парсит необязательную длину типа `(n)`
    fn parse_type_length(&mut self) -> Result<Option<u32>> {
        if !self.cursor.consume_token(&Token::LeftParen) {
            return Ok(None);
        }
        let length = self.parse_type_modifier()?;
        self.cursor.expect_token(&Token::RightParen)?;
        Ok(Some(length))
    }

    /// Парсит необязательные модификаторы `(precision [, scale])`
    fn parse_numeric_modifiers(&mut self) -> Result<(Option<u32>, Option<u32>)> {
        if !self.cursor.consume_token(&Token::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.parse_type_modifier()?;
        let scale = if self.cursor.consume_token(&Token::Comma) {
            Some(self.parse_type_modifier()?)
        } else {
            None
        };
        self.cursor.expect_token(&Token::RightParen)?;
        Ok((Some(precision), scale))
    }

    fn parse_type_modifier(&mut self) -> Result<u32> {
        if let Token::Number(number) = self.cursor.peek() {
            if let Ok(value) = number.parse::<u32>() {
                self.cursor.next_token();
                return Ok(value);
            }
        }
        Err(self.cursor.expected("an integer type modifier", self.cursor.peek()))
    }

    /// Парсит выражение значения по умолчанию.
    ///
    /// Каждый вложенный уровень (скобки, унарный минус, аргумент функции)
    /// учитывается в `max_expression_depth`.
    pub(super) fn parse_expression(&mut self) -> Result<Expression> {
        if self.expression_depth >= self.settings.max_expression_depth {
            return Err(Error::ExpressionTooDeep {
                limit: self.settings.max_expression_depth,
                position: self.cursor.position(),
            });
        }

        self.expression_depth += 1;
        let expression = self.parse_expression_operand();
        self.expression_depth -= 1;
        expression
    }

    fn parse_expression_operand(&mut self) -> Result<Expression> {
        let token = self.cursor.next_token();
        let expression = match token {
            Token::Number(number) => Expression::Literal(Literal::Number(number)),
            Token::String(value) => Expression::Literal(Literal::String(value)),
            Token::Keyword(Keyword::Null) => Expression::Literal(Literal::Null),
            Token::Keyword(Keyword::True) => Expression::Literal(Literal::Boolean(true)),
            Token::Keyword(Keyword::False) => Expression::Literal(Literal::Boolean(false)),
            Token::Minus => Expression::Negate(Box::new(self.parse_expression()?)),
            Token::LeftParen => {
                let inner = self.parse_expression()?;
                self.cursor.expect_token(&Token::RightParen)?;
                inner
            }
            Token::Word(_) => {
                self.cursor.rewind();
                let name = self.parse_identifier()?;
                if self.cursor.consume_token(&Token::LeftParen) {
                    let args = self.parse_function_arguments()?;
                    Expression::Function { name, args }
                } else {
                    Expression::Identifier(name)
                }
            }
            other => {
                return Err(Error::expected(
                    "an expression",
                    &other,
                    self.cursor.previous_position(),
                ))
            }
        };
        Ok(expression)
    }

    /// Парсит аргументы функции после `(` до `)` включительно
    fn parse_function_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.cursor.consume_token(&Token::RightParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if self.cursor.consume_token(&Token::RightParen) {
                return Ok(args);
            }
            if !self.cursor.consume_token(&Token::Comma) {
                return Err(self.cursor.expected("',' or ')' in argument list", self.cursor.peek()));
            }
        }
    }
}
