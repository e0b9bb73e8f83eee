//! ddlparser - разбор SQL DDL в типизированное синтаксическое дерево
//!
//! Лексический анализатор превращает текст в поток токенов, а парсер
//! рекурсивного спуска строит по нему определения таблиц, колонок и
//! ограничений. Каждый вызов владеет собственным потоком токенов и курсором,
//! поэтому независимые разборы можно выполнять параллельно.
//!
//! ```
//! use ddlparser::{parse, Statement};
//!
//! let statement = parse("CREATE TABLE users (id BIGINT PRIMARY KEY)").unwrap();
//! match statement {
//!     Statement::CreateTable(table) => assert!(table.columns[0].not_null),
//!     _ => unreachable!(),
//! }
//! ```

pub mod cli;
pub mod common;
pub mod parser;

pub use common::config::{ParserConfig, ParserSettings};
pub use common::error::{Error, Result};
pub use parser::ast::*;
pub use parser::{Keyword, SqlParser, Token};

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Разбирает одно SQL выражение с настройками по умолчанию
pub fn parse(sql: &str) -> Result<Statement> {
    SqlParser::new(sql)?.parse()
}

/// Разбирает одно SQL выражение с заданными настройками
pub fn parse_with_settings(sql: &str, settings: &ParserSettings) -> Result<Statement> {
    SqlParser::with_settings(sql, settings.clone())?.parse()
}

/// Сканирует текст в последовательность токенов, завершающуюся EOF
pub fn tokenize(sql: &str) -> Result<Vec<Token>> {
    Ok(parser::Lexer::new(sql).tokenize()?.into_tokens())
}
