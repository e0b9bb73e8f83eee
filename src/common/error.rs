//! Обработка ошибок для ddlparser
//!
//! Тексты ошибок разбора являются частью наблюдаемого контракта:
//! вызывающая сторона сравнивает их дословно.

use crate::parser::token::Position;
use thiserror::Error;

/// Основной тип ошибки для ddlparser
#[derive(Error, Debug)]
pub enum Error {
    /// Лексическая ошибка: символ не относится ни к одному классу токенов
    #[error("unexpected character '{character}' at offset {}", .position.offset)]
    UnexpectedCharacter { character: char, position: Position },

    /// Лексическая ошибка: строка, идентификатор или комментарий не закрыты
    #[error("unterminated {kind} starting at offset {}", .position.offset)]
    UnterminatedLiteral {
        kind: &'static str,
        position: Position,
    },

    /// Ошибка синтаксического анализа вида "expected ... found ..."
    #[error("{message}")]
    Parse { message: String, position: Position },

    /// Повторное предложение, допустимое не более одного раза
    #[error("duplicate {clause} clause")]
    DuplicateClause {
        clause: &'static str,
        position: Position,
    },

    /// Распознанная, но не поддерживаемая конструкция
    #[error("unsupported construct: {construct}")]
    Unsupported { construct: String },

    /// Выражение вложено глубже настроенного лимита
    #[error("expression nesting exceeds the limit of {limit}")]
    ExpressionTooDeep { limit: usize, position: Position },

    /// Входной текст превышает настроенный лимит
    #[error("input of {length} characters exceeds the limit of {limit}")]
    InputTooLarge { length: usize, limit: usize },

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Ошибка I/O операций
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка разбора TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Ошибка сериализации/десериализации
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Тип результата для ddlparser
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает ошибку разбора с произвольным сообщением
    pub fn parse(message: impl Into<String>, position: Position) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Создает ошибку вида "expected <context> found <found>"
    pub fn expected(context: impl std::fmt::Display, found: impl std::fmt::Display, position: Position) -> Self {
        Self::parse(format!("expected {} found {}", context, found), position)
    }

    /// Создает ошибку неподдерживаемой конструкции
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Позиция во входном тексте, если ошибка к ней привязана
    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedLiteral { position, .. }
            | Self::Parse { position, .. }
            | Self::DuplicateClause { position, .. }
            | Self::ExpressionTooDeep { position, .. } => Some(position),
            _ => None,
        }
    }

    /// Является ли ошибка лексической
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedCharacter { .. } | Self::UnterminatedLiteral { .. }
        )
    }
}
