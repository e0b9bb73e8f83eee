//! Словарь ключевых слов SQL
//!
//! Фиксированный, исчерпывающе перечисленный набор ключевых слов, которые
//! понимает грамматика. Поиск выполняется без учета регистра и не использует
//! никакого разделяемого состояния.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ключевое слово SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Action,
    By,
    Cascade,
    Check,
    Collate,
    Constraint,
    Create,
    Default,
    Deferrable,
    Deferred,
    Delete,
    Drop,
    Exists,
    False,
    Foreign,
    If,
    Immediate,
    Index,
    Inherit,
    Initially,
    Key,
    No,
    Not,
    Null,
    On,
    Primary,
    References,
    Restrict,
    Schema,
    Set,
    Table,
    True,
    Unique,
    Update,
    View,
}

impl Keyword {
    /// Ищет ключевое слово без учета регистра
    pub fn lookup(word: &str) -> Option<Self> {
        // Самое длинное ключевое слово состоит из 10 символов
        if word.len() > 10 {
            return None;
        }
        let upper = word.to_ascii_uppercase();
        let keyword = match upper.as_str() {
            "ACTION" => Self::Action,
            "BY" => Self::By,
            "CASCADE" => Self::Cascade,
            "CHECK" => Self::Check,
            "COLLATE" => Self::Collate,
            "CONSTRAINT" => Self::Constraint,
            "CREATE" => Self::Create,
            "DEFAULT" => Self::Default,
            "DEFERRABLE" => Self::Deferrable,
            "DEFERRED" => Self::Deferred,
            "DELETE" => Self::Delete,
            "DROP" => Self::Drop,
            "EXISTS" => Self::Exists,
            "FALSE" => Self::False,
            "FOREIGN" => Self::Foreign,
            "IF" => Self::If,
            "IMMEDIATE" => Self::Immediate,
            "INDEX" => Self::Index,
            "INHERIT" => Self::Inherit,
            "INITIALLY" => Self::Initially,
            "KEY" => Self::Key,
            "NO" => Self::No,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "ON" => Self::On,
            "PRIMARY" => Self::Primary,
            "REFERENCES" => Self::References,
            "RESTRICT" => Self::Restrict,
            "SCHEMA" => Self::Schema,
            "SET" => Self::Set,
            "TABLE" => Self::Table,
            "TRUE" => Self::True,
            "UNIQUE" => Self::Unique,
            "UPDATE" => Self::Update,
            "VIEW" => Self::View,
            _ => return None,
        };
        Some(keyword)
    }

    /// Каноническое написание ключевого слова
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "ACTION",
            Self::By => "BY",
            Self::Cascade => "CASCADE",
            Self::Check => "CHECK",
            Self::Collate => "COLLATE",
            Self::Constraint => "CONSTRAINT",
            Self::Create => "CREATE",
            Self::Default => "DEFAULT",
            Self::Deferrable => "DEFERRABLE",
            Self::Deferred => "DEFERRED",
            Self::Delete => "DELETE",
            Self::Drop => "DROP",
            Self::Exists => "EXISTS",
            Self::False => "FALSE",
            Self::Foreign => "FOREIGN",
            Self::If => "IF",
            Self::Immediate => "IMMEDIATE",
            Self::Index => "INDEX",
            Self::Inherit => "INHERIT",
            Self::Initially => "INITIALLY",
            Self::Key => "KEY",
            Self::No => "NO",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::On => "ON",
            Self::Primary => "PRIMARY",
            Self::References => "REFERENCES",
            Self::Restrict => "RESTRICT",
            Self::Schema => "SCHEMA",
            Self::Set => "SET",
            Self::Table => "TABLE",
            Self::True => "TRUE",
            Self::Unique => "UNIQUE",
            Self::Update => "UPDATE",
            Self::View => "VIEW",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
