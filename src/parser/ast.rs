//! Абстрактное синтаксическое дерево DDL для ddlparser
//!
//! Узлы дерева являются обычными владеющими значениями и не ссылаются
//! на токены, из которых были построены.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Разобранное SQL выражение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// CREATE TABLE операция
    CreateTable(CreateTableStatement),
    /// CREATE SCHEMA операция
    CreateSchema(CreateSchemaStatement),
    /// DROP TABLE операция
    DropTable(DropTableStatement),
}

/// Составное имя объекта: `schema.table`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName(pub Vec<String>);

impl ObjectName {
    /// Последняя (собственная) часть имени
    pub fn base_name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        ObjectName(name.split('.').map(str::to_string).collect())
    }
}

/// CREATE TABLE операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub name: ObjectName,
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDefinition>,
    /// Ограничения уровня таблицы и ограничения колонок в порядке объявления
    pub constraints: Vec<Constraint>,
}

/// CREATE SCHEMA операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSchemaStatement {
    pub name: ObjectName,
    pub if_not_exists: bool,
}

/// DROP TABLE операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableStatement {
    pub name: ObjectName,
    pub if_exists: bool,
    pub cascade: bool,
}

/// Определение колонки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub collation: Option<ObjectName>,
    pub default: Option<Expression>,
    /// Выводится из опций: true тогда и только тогда, когда задан PRIMARY KEY или NOT NULL
    pub not_null: bool,
}

impl ColumnDefinition {
    pub fn is_nullable(&self) -> bool {
        !self.not_null
    }
}

/// Тип данных колонки
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Boolean,
    Text,
    Varchar {
        length: Option<u32>,
    },
    Char {
        length: Option<u32>,
    },
    Date,
    Time,
    Timestamp,
    Bytea,
    Uuid,
    Json,
    /// Тип, не известный парсеру (например, пользовательский домен)
    Custom(ObjectName),
}

/// Ограничение таблицы или колонки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: Option<String>,
    pub kind: ConstraintKind,
    /// Колонки, к которым относится ограничение; у ограничения колонки ровно одна
    pub columns: Vec<String>,
    pub deferrable: bool,
    pub initially_deferred: bool,
    pub no_inherit: bool,
    pub raw_expression: Option<String>,
    pub cooked_expression: Option<String>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            name: None,
            kind,
            columns: Vec::new(),
            deferrable: false,
            initially_deferred: false,
            no_inherit: false,
            raw_expression: None,
            cooked_expression: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Внешний ключ, если ограничение им является
    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        match &self.kind {
            ConstraintKind::ForeignKey(foreign_key) => Some(foreign_key),
            _ => None,
        }
    }
}

/// Вид ограничения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintKind {
    NotNull,
    Null,
    PrimaryKey,
    Unique,
    ForeignKey(ForeignKey),
    Check,
}

/// Ссылка внешнего ключа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub foreign_table: ObjectName,
    pub referred_columns: Vec<String>,
    /// `None` означает, что предложение ON DELETE отсутствует
    pub on_delete: Option<ReferentialAction>,
    /// `None` означает, что предложение ON UPDATE отсутствует
    pub on_update: Option<ReferentialAction>,
}

/// Действие при удалении или изменении строки, на которую ссылается внешний ключ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::NoAction => "NO ACTION",
        })
    }
}

/// Опция колонки, разобранная из определения колонки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnOption {
    NotNull,
    Null,
    Default(Expression),
    PrimaryKey,
    Unique,
    ForeignKey(ForeignKey),
}

/// Выражение значения по умолчанию
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Literal(Literal),
    Identifier(String),
    Function { name: String, args: Vec<Expression> },
    Negate(Box<Expression>),
}

/// Литерал
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Boolean(bool),
    /// Число в исходном написании
    Number(String),
    String(String),
}
