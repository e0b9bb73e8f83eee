//! Грамматика списка колонок и ограничений CREATE TABLE
//!
//! Разбирает содержимое скобок после имени таблицы: определения колонок,
//! опции колонок, ограничения уровня таблицы, внешние ключи и ссылочные
//! действия. Ограничения колонок разворачиваются в общий список ограничений
//! таблицы, каждое со своей единственной колонкой.

use crate::common::{Error, Result};
use crate::parser::ast::*;
use crate::parser::keywords::Keyword;
use crate::parser::parser::SqlParser;
use crate::parser::token::Token;

/// Результат попытки разобрать ограничение уровня таблицы
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TableConstraintMatch {
    /// Ограничение разобрано
    Found(Constraint),
    /// Ограничение принято, но ничего не значит (`NULL`)
    Discarded,
    /// В текущей позиции нет ограничения, курсор не сдвинут
    Absent,
}

impl SqlParser {
    /// Парсит список колонок и ограничений в скобках.
    ///
    /// Отсутствие `(` и пустые скобки `()` дают пустые списки без ошибки.
    pub(crate) fn parse_columns(&mut self) -> Result<(Vec<ColumnDefinition>, Vec<Constraint>)> {
        if !self.cursor.consume_token(&Token::LeftParen)
            || self.cursor.consume_token(&Token::RightParen)
        {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut columns = Vec::new();
        let mut constraints = Vec::new();

        loop {
            match self.parse_optional_table_constraint()? {
                TableConstraintMatch::Found(constraint) => constraints.push(constraint),
                TableConstraintMatch::Discarded => {}
                TableConstraintMatch::Absent if self.cursor.peek().is_word() => {
                    let (column, column_constraints) = self.parse_column_definition()?;
                    columns.push(column);
                    constraints.extend(column_constraints);
                }
                TableConstraintMatch::Absent => {
                    return Err(self.cursor.expected(
                        "column name or constraint definition",
                        self.cursor.peek(),
                    ))
                }
            }

            if self.cursor.consume_token(&Token::RightParen) {
                break;
            }
            if !self.cursor.consume_token(&Token::Comma) {
                return Err(self
                    .cursor
                    .expected("',' or ')' after column definition", self.cursor.peek()));
            }
        }

        Ok((columns, constraints))
    }

    /// Пытается разобрать ограничение уровня таблицы.
    ///
    /// После `CONSTRAINT <name>` ограничение обязано существовать, поэтому
    /// любая ошибка дальше фатальна. Без имени нераспознанный токен
    /// возвращается обратно в поток, и результатом будет `Absent`.
    pub(crate) fn parse_optional_table_constraint(&mut self) -> Result<TableConstraintMatch> {
        let name = if self.cursor.consume_keyword(Keyword::Constraint) {
            Some(self.parse_identifier_as("constraint name")?)
        } else {
            None
        };

        let token = self.cursor.next_token();
        let mut constraint = match token {
            Token::Keyword(Keyword::Not) => {
                if !self.cursor.consume_keyword(Keyword::Null) {
                    return Err(self.cursor.expected("NULL", self.cursor.peek()));
                }
                Constraint::new(ConstraintKind::NotNull)
            }
            Token::Keyword(Keyword::Null) => return Ok(TableConstraintMatch::Discarded),
            Token::Keyword(Keyword::Primary) => {
                self.cursor.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_column_list(false)?;
                Constraint::new(ConstraintKind::PrimaryKey).with_columns(columns)
            }
            Token::Keyword(Keyword::Unique) => {
                let columns = self.parse_parenthesized_column_list(false)?;
                Constraint::new(ConstraintKind::Unique).with_columns(columns)
            }
            Token::Keyword(Keyword::Foreign) => {
                self.cursor.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_column_list(false)?;
                self.cursor.expect_keyword(Keyword::References)?;
                let foreign_key = self.parse_foreign_key_reference()?;
                Constraint::new(ConstraintKind::ForeignKey(foreign_key)).with_columns(columns)
            }
            Token::Keyword(Keyword::Check) => return Err(Error::unsupported("CHECK constraint")),
            other => {
                if name.is_some() {
                    return Err(Error::expected(
                        "PRIMARY, UNIQUE, FOREIGN or CHECK",
                        &other,
                        self.cursor.previous_position(),
                    ));
                }
                self.cursor.rewind();
                return Ok(TableConstraintMatch::Absent);
            }
        };

        constraint.name = name;
        self.parse_constraint_attributes(&mut constraint);

        log::trace!("table constraint {:?}", constraint);
        Ok(TableConstraintMatch::Found(constraint))
    }

    /// Парсит необязательные DEFERRABLE / INITIALLY / NO INHERIT после ограничения
    fn parse_constraint_attributes(&mut self, constraint: &mut Constraint) {
        if self
            .cursor
            .consume_keywords(&[Keyword::Not, Keyword::Deferrable])
        {
            constraint.deferrable = false;
        } else if self.cursor.consume_keyword(Keyword::Deferrable) {
            constraint.deferrable = true;
        }

        if self
            .cursor
            .consume_keywords(&[Keyword::Initially, Keyword::Deferred])
        {
            constraint.initially_deferred = true;
        } else if self
            .cursor
            .consume_keywords(&[Keyword::Initially, Keyword::Immediate])
        {
            constraint.initially_deferred = false;
        }

        if self.cursor.consume_keywords(&[Keyword::No, Keyword::Inherit]) {
            constraint.no_inherit = true;
        }
    }

    /// Парсит определение колонки и возвращает ее ограничения отдельным списком
    pub(crate) fn parse_column_definition(&mut self) -> Result<(ColumnDefinition, Vec<Constraint>)> {
        let name = self.parse_identifier_as("column name")?;
        let data_type = self.parse_data_type()?;

        let collation = if self.cursor.consume_keyword(Keyword::Collate) {
            Some(self.parse_object_name()?)
        } else {
            None
        };

        let mut column = ColumnDefinition {
            name,
            data_type,
            collation,
            default: None,
            not_null: false,
        };
        let mut constraints = Vec::new();

        loop {
            if matches!(
                self.cursor.peek(),
                Token::Eof | Token::Comma | Token::RightParen | Token::Semicolon
            ) {
                break;
            }

            let position = self.cursor.position();
            let (constraint_name, option) = self.parse_column_option()?;

            if matches!(option, ColumnOption::PrimaryKey | ColumnOption::NotNull) {
                column.not_null = true;
            }

            let kind = match option {
                ColumnOption::NotNull => ConstraintKind::NotNull,
                ColumnOption::PrimaryKey => ConstraintKind::PrimaryKey,
                ColumnOption::Unique => ConstraintKind::Unique,
                ColumnOption::ForeignKey(foreign_key) => ConstraintKind::ForeignKey(foreign_key),
                ColumnOption::Null => continue,
                ColumnOption::Default(expression) => {
                    if column.default.is_some() {
                        return Err(Error::DuplicateClause {
                            clause: "DEFAULT",
                            position,
                        });
                    }
                    column.default = Some(expression);
                    continue;
                }
            };

            constraints.push(
                Constraint::new(kind)
                    .with_name(constraint_name)
                    .with_columns(vec![column.name.clone()]),
            );
        }

        log::trace!(
            "column {} {:?} with {} constraints",
            column.name,
            column.data_type,
            constraints.len()
        );
        Ok((column, constraints))
    }

    /// Парсит одну опцию колонки вместе с необязательным `CONSTRAINT <name>`
    pub(crate) fn parse_column_option(&mut self) -> Result<(Option<String>, ColumnOption)> {
        let name = if self.cursor.consume_keyword(Keyword::Constraint) {
            Some(self.parse_identifier_as("constraint name")?)
        } else {
            None
        };

        let token = self.cursor.next_token();
        let option = match token {
            Token::Keyword(Keyword::Not) => {
                if !self.cursor.consume_keyword(Keyword::Null) {
                    return Err(self.cursor.expected("NULL", self.cursor.peek()));
                }
                ColumnOption::NotNull
            }
            Token::Keyword(Keyword::Null) => ColumnOption::Null,
            Token::Keyword(Keyword::Default) => ColumnOption::Default(self.parse_expression()?),
            Token::Keyword(Keyword::Primary) => {
                self.cursor.expect_keyword(Keyword::Key)?;
                ColumnOption::PrimaryKey
            }
            Token::Keyword(Keyword::Unique) => ColumnOption::Unique,
            Token::Keyword(Keyword::References) => {
                ColumnOption::ForeignKey(self.parse_foreign_key_reference()?)
            }
            Token::Keyword(Keyword::Check) => return Err(Error::unsupported("CHECK constraint")),
            other => {
                return Err(Error::expected(
                    "column option",
                    &other,
                    self.cursor.previous_position(),
                ))
            }
        };

        Ok((name, option))
    }

    /// Парсит часть внешнего ключа после REFERENCES: таблицу, колонки и действия
    pub(crate) fn parse_foreign_key_reference(&mut self) -> Result<ForeignKey> {
        let foreign_table = self.parse_object_name()?;
        let referred_columns = self.parse_parenthesized_column_list(true)?;

        let mut foreign_key = ForeignKey {
            foreign_table,
            referred_columns,
            on_delete: None,
            on_update: None,
        };

        while self.cursor.consume_keyword(Keyword::On) {
            let position = self.cursor.previous_position();
            if self.cursor.consume_keyword(Keyword::Delete) {
                if foreign_key.on_delete.is_some() {
                    return Err(Error::DuplicateClause {
                        clause: "ON DELETE",
                        position,
                    });
                }
                foreign_key.on_delete = Some(self.parse_referential_action()?);
            } else if self.cursor.consume_keyword(Keyword::Update) {
                if foreign_key.on_update.is_some() {
                    return Err(Error::DuplicateClause {
                        clause: "ON UPDATE",
                        position,
                    });
                }
                foreign_key.on_update = Some(self.parse_referential_action()?);
            } else {
                return Err(self
                    .cursor
                    .expected("DELETE or UPDATE after ON", self.cursor.peek()));
            }
        }

        Ok(foreign_key)
    }

    /// Парсит список колонок в скобках; необязательный список может отсутствовать
    pub(crate) fn parse_parenthesized_column_list(&mut self, optional: bool) -> Result<Vec<String>> {
        if self.cursor.consume_token(&Token::LeftParen) {
            let mut columns = vec![self.parse_identifier_as("column name")?];
            while self.cursor.consume_token(&Token::Comma) {
                columns.push(self.parse_identifier_as("column name")?);
            }
            self.cursor.expect_token(&Token::RightParen)?;
            Ok(columns)
        } else if optional {
            Ok(Vec::new())
        } else {
            Err(self
                .cursor
                .expected("a list of columns in parentheses", self.cursor.peek()))
        }
    }

    /// Парсит ссылочное действие внешнего ключа
    pub(crate) fn parse_referential_action(&mut self) -> Result<ReferentialAction> {
        let token = self.cursor.next_token();
        match token {
            Token::Keyword(Keyword::Restrict) => Ok(ReferentialAction::Restrict),
            Token::Keyword(Keyword::Cascade) => Ok(ReferentialAction::Cascade),
            Token::Keyword(Keyword::Set) => {
                if self.cursor.consume_keyword(Keyword::Null) {
                    Ok(ReferentialAction::SetNull)
                } else if self.cursor.consume_keyword(Keyword::Default) {
                    Ok(ReferentialAction::SetDefault)
                } else {
                    Err(self.cursor.expected("NULL or DEFAULT", self.cursor.peek()))
                }
            }
            Token::Keyword(Keyword::No) => {
                if !self.cursor.consume_keyword(Keyword::Action) {
                    return Err(self.cursor.expected("ACTION", self.cursor.peek()));
                }
                Ok(ReferentialAction::NoAction)
            }
            other => Err(Error::expected(
                "one of RESTRICT, CASCADE, SET NULL, NO ACTION or SET DEFAULT",
                &other,
                self.cursor.previous_position(),
            )),
        }
    }
}
