//! CLI интерфейс для ddlparser
//!
//! Разбирает SQL из аргумента или файла и печатает синтаксическое дерево
//! или поток токенов в формате JSON.

use crate::common::{ParserConfig, ParserSettings};
use crate::parser::{Lexer, SqlParser};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// ddlparser - разбор SQL DDL в синтаксическое дерево
#[derive(Parser, Debug)]
#[command(name = "ddlparser")]
#[command(about = "Parses SQL data-definition statements into a typed AST")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Приводить идентификаторы без кавычек к нижнему регистру
    #[arg(long)]
    pub fold_identifiers: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Разобрать выражение и напечатать AST
    Parse {
        /// SQL текст
        sql: Option<String>,

        /// Файл с SQL текстом
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Напечатать поток токенов
    Tokens {
        /// SQL текст
        sql: Option<String>,

        /// Файл с SQL текстом
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Показать итоговую конфигурацию
    Config,
}

impl Cli {
    /// Собирает конфигурацию: файл, затем переменные окружения, затем флаги
    pub fn load_config(&self) -> anyhow::Result<ParserConfig> {
        self.load_config_with(|key| std::env::var(key).ok())
    }

    pub(crate) fn load_config_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<ParserConfig> {
        let base = match &self.config {
            Some(path) => ParserConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ParserConfig::default(),
        };
        let mut config = base
            .apply_lookup(lookup)
            .context("invalid DDLPARSER_* environment")?;

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.fold_identifiers {
            config.parser.fold_identifiers = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Выполняет команду и возвращает текст для вывода
    pub fn execute(&self, config: &ParserConfig) -> anyhow::Result<String> {
        match &self.command {
            Commands::Parse { sql, file } => {
                let input = read_input(sql.as_deref(), file.as_deref())?;
                parse_to_json(&input, &config.parser)
            }
            Commands::Tokens { sql, file } => {
                let input = read_input(sql.as_deref(), file.as_deref())?;
                let stream = Lexer::new(&input).tokenize()?;
                Ok(serde_json::to_string_pretty(stream.tokens())?)
            }
            Commands::Config => Ok(toml::to_string_pretty(config)?),
        }
    }
}

/// Инициализирует логирование с заданным уровнем
pub fn init_logging(level: &str) {
    let _ = env_logger::Builder::new().parse_filters(level).try_init();
}

fn read_input(sql: Option<&str>, file: Option<&Path>) -> anyhow::Result<String> {
    match (sql, file) {
        (Some(sql), None) => Ok(sql.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        (Some(_), Some(_)) => bail!("pass either SQL text or --file, not both"),
        (None, None) => bail!("no SQL given: pass SQL text or --file"),
    }
}

fn parse_to_json(input: &str, settings: &ParserSettings) -> anyhow::Result<String> {
    let statement = SqlParser::with_settings(input, settings.clone())?.parse()?;
    Ok(serde_json::to_string_pretty(&statement)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = vec!["ddlparser", "--log-level", "debug", "parse", "CREATE TABLE t ()"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Parse { sql: Some(_), file: None }));
    }

    #[test]
    fn test_parse_command_prints_json() {
        let cli = Cli::try_parse_from(["ddlparser", "parse", "CREATE TABLE t (id INT PRIMARY KEY)"])
            .unwrap();
        let output = cli.execute(&ParserConfig::default()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["CreateTable"]["columns"][0]["name"], "id");
        assert_eq!(json["CreateTable"]["columns"][0]["not_null"], true);
    }

    #[test]
    fn test_parse_command_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        std::fs::write(&path, "CREATE SCHEMA IF NOT EXISTS billing;").unwrap();

        let cli = Cli::try_parse_from([
            "ddlparser",
            "parse",
            "--file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let output = cli.execute(&ParserConfig::default()).unwrap();
        assert!(output.contains("billing"));
    }

    #[test]
    fn test_parse_command_reports_parse_error() {
        let cli = Cli::try_parse_from(["ddlparser", "parse", "CREATE SOMETHING"]).unwrap();
        let error = cli.execute(&ParserConfig::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected TABLE, VIEW, INDEX or SCHEMA after CREATE found SOMETHING"
        );
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let cli = Cli::try_parse_from(["ddlparser", "tokens"]).unwrap();
        assert!(cli.execute(&ParserConfig::default()).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["ddlparser", "--fold-identifiers", "--log-level", "info", "config"])
            .unwrap();
        let config = cli.load_config_with(|_| None).unwrap();
        assert!(config.parser.fold_identifiers);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ddlparser.toml");
        std::fs::write(
            &path,
            "[parser]\nfold_identifiers = true\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["ddlparser", "--config", path.to_str().unwrap(), "config"])
            .unwrap();
        let config = cli
            .load_config_with(|key| match key {
                "DDLPARSER_FOLD_IDENTIFIERS" => Some("false".to_string()),
                "DDLPARSER_LOG_LEVEL" => Some("warn".to_string()),
                _ => None,
            })
            .unwrap();

        assert!(!config.parser.fold_identifiers);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_flags_override_env() {
        let cli = Cli::try_parse_from(["ddlparser", "--log-level", "trace", "config"]).unwrap();
        let config = cli
            .load_config_with(|key| (key == "DDLPARSER_LOG_LEVEL").then(|| "error".to_string()))
            .unwrap();
        assert_eq!(config.logging.level, "trace");
    }
}
