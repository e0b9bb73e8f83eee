//! Конфигурация для ddlparser
//!
//! Настройки парсера и логирования, загружаемые из TOML файла
//! и переменных окружения.

use crate::common::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Максимальная длина входного текста по умолчанию (в символах)
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1024 * 1024;

/// Максимальная вложенность выражений DEFAULT по умолчанию
pub const DEFAULT_MAX_EXPRESSION_DEPTH: usize = 128;

/// Уровень логирования по умолчанию
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Основная конфигурация
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Настройки парсера
    pub parser: ParserSettings,
    /// Настройки логирования
    pub logging: LoggingConfig,
}

/// Настройки парсера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Максимальная длина входного текста
    pub max_input_length: usize,
    /// Максимальная вложенность выражений (скобки, унарный минус, аргументы функций)
    pub max_expression_depth: usize,
    /// Приводить идентификаторы без кавычек к нижнему регистру
    pub fold_identifiers: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            max_expression_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
            fold_identifiers: false,
        }
    }
}

/// Конфигурация логирования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень логирования (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ParserConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParserConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Загружает конфигурацию из переменных окружения поверх значений по умолчанию
    pub fn from_env() -> Result<Self> {
        Self::default().apply_lookup(|key| std::env::var(key).ok())
    }

    /// Накладывает значения, найденные функцией поиска, поверх текущей конфигурации.
    ///
    /// Заданная переменная всегда побеждает, даже если ее значение совпадает
    /// со значением по умолчанию.
    pub(crate) fn apply_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup("DDLPARSER_MAX_INPUT_LENGTH") {
            self.parser.max_input_length = value.parse().map_err(|_| {
                Error::configuration(format!("invalid DDLPARSER_MAX_INPUT_LENGTH: {}", value))
            })?;
        }

        if let Some(value) = lookup("DDLPARSER_MAX_EXPRESSION_DEPTH") {
            self.parser.max_expression_depth = value.parse().map_err(|_| {
                Error::configuration(format!("invalid DDLPARSER_MAX_EXPRESSION_DEPTH: {}", value))
            })?;
        }

        if let Some(value) = lookup("DDLPARSER_FOLD_IDENTIFIERS") {
            self.parser.fold_identifiers = value.parse().map_err(|_| {
                Error::configuration(format!("invalid DDLPARSER_FOLD_IDENTIFIERS: {}", value))
            })?;
        }

        if let Some(level) = lookup("DDLPARSER_LOG_LEVEL") {
            self.logging.level = level;
        }

        self.validate()?;
        Ok(self)
    }

    /// Валидирует конфигурацию
    pub fn validate(&self) -> Result<()> {
        if self.parser.max_input_length == 0 {
            return Err(Error::configuration(
                "max_input_length must be greater than 0",
            ));
        }

        if self.parser.max_expression_depth == 0 {
            return Err(Error::configuration(
                "max_expression_depth must be greater than 0",
            ));
        }

        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(Error::configuration(format!(
                "unknown log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}
