//! Парсер SQL DDL для ddlparser

pub mod ast;
pub mod columns;
pub mod cursor;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

// Переэкспортируем основные типы
pub use ast::*;
pub use cursor::TokenCursor;
pub use keywords::Keyword;
pub use lexer::Lexer;
pub use parser::SqlParser;
pub use token::{classify_symbol, Position, Token, TokenStream, Word};
