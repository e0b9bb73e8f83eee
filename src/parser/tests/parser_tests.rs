//! Тесты для синтаксического анализатора SQL

use crate::common::{Error, ParserSettings, Result};
use crate::parser::{
    ColumnDefinition, ConstraintKind, CreateTableStatement, DataType, Expression, Literal,
    ObjectName, SqlParser, Statement,
};

fn parse(sql: &str) -> Result<Statement> {
    SqlParser::new(sql)?.parse()
}

fn parse_table(sql: &str) -> Result<CreateTableStatement> {
    match parse(sql)? {
        Statement::CreateTable(table) => Ok(table),
        other => panic!("Ожидался CREATE TABLE, получено {:?}", other),
    }
}

fn parse_error(sql: &str) -> String {
    match parse(sql) {
        Ok(statement) => panic!("Ожидалась ошибка, получено {:?}", statement),
        Err(error) => error.to_string(),
    }
}

fn single_column(sql: &str) -> Result<ColumnDefinition> {
    let mut table = parse_table(sql)?;
    assert_eq!(table.columns.len(), 1);
    Ok(table.columns.remove(0))
}

#[test]
fn test_parser_creation() -> Result<()> {
    let parser = SqlParser::new("CREATE TABLE users ()")?;
    assert!(parser.settings().max_input_length > 0);
    assert!(!parser.settings().fold_identifiers);
    Ok(())
}

#[test]
fn test_parse_create_table() -> Result<()> {
    let table = parse_table(
        "CREATE TABLE users (id BIGINT PRIMARY KEY, name TEXT NOT NULL, email VARCHAR(255));",
    )?;

    assert_eq!(table.name, ObjectName::from("users"));
    assert!(!table.if_not_exists);
    assert_eq!(table.columns.len(), 3);

    assert_eq!(table.columns[0].name, "id");
    assert_eq!(table.columns[0].data_type, DataType::BigInt);
    assert!(table.columns[0].not_null);

    assert_eq!(table.columns[1].name, "name");
    assert_eq!(table.columns[1].data_type, DataType::Text);
    assert!(table.columns[1].not_null);

    assert_eq!(table.columns[2].data_type, DataType::Varchar { length: Some(255) });
    assert!(table.columns[2].is_nullable());

    assert_eq!(table.constraints.len(), 2);
    assert_eq!(table.constraints[0].kind, ConstraintKind::PrimaryKey);
    assert_eq!(table.constraints[0].columns, vec!["id"]);
    assert_eq!(table.constraints[1].kind, ConstraintKind::NotNull);
    assert_eq!(table.constraints[1].columns, vec!["name"]);
    Ok(())
}

#[test]
fn test_parse_create_table_if_not_exists() -> Result<()> {
    let table = parse_table("CREATE TABLE IF NOT EXISTS billing.invoices (id INT)")?;

    assert!(table.if_not_exists);
    assert_eq!(table.name.0, vec!["billing", "invoices"]);
    assert_eq!(table.name.base_name(), "invoices");
    assert_eq!(table.name.to_string(), "billing.invoices");
    Ok(())
}

#[test]
fn test_incomplete_if_not_exists_is_an_error() {
    // "IF NOT" без EXISTS не поглощается, и IF оказывается на месте имени
    assert_eq!(
        parse_error("CREATE TABLE IF NOT users (id INT)"),
        "expected identifier found IF"
    );
}

#[test]
fn test_empty_and_missing_column_lists() -> Result<()> {
    let table = parse_table("CREATE TABLE users ()")?;
    assert!(table.columns.is_empty());
    assert!(table.constraints.is_empty());

    let table = parse_table("CREATE TABLE users")?;
    assert!(table.columns.is_empty());
    Ok(())
}

#[test]
fn test_quoted_table_and_column_names() -> Result<()> {
    let table = parse_table("CREATE TABLE \"Order Items\" (\"Unit Price\" NUMERIC(10, 2))")?;

    assert_eq!(table.name.base_name(), "Order Items");
    assert_eq!(table.columns[0].name, "Unit Price");
    assert_eq!(
        table.columns[0].data_type,
        DataType::Numeric {
            precision: Some(10),
            scale: Some(2)
        }
    );
    Ok(())
}

#[test]
fn test_empty_quoted_identifier_is_rejected() {
    assert_eq!(
        parse_error("CREATE TABLE \"\" (id INT)"),
        "expected identifier found \"\""
    );
}

#[test]
fn test_identifier_folding() -> Result<()> {
    let settings = ParserSettings {
        fold_identifiers: true,
        ..ParserSettings::default()
    };
    let statement =
        SqlParser::with_settings("CREATE TABLE Users (UserId INT, \"KeepMe\" INT)", settings)?
            .parse()?;

    match statement {
        Statement::CreateTable(table) => {
            assert_eq!(table.name.base_name(), "users");
            assert_eq!(table.columns[0].name, "userid");
            assert_eq!(table.columns[1].name, "KeepMe");
        }
        other => panic!("Ожидался CREATE TABLE, получено {:?}", other),
    }
    Ok(())
}

#[test]
fn test_identifiers_keep_case_by_default() -> Result<()> {
    let table = parse_table("CREATE TABLE Users (UserId INT)")?;
    assert_eq!(table.name.base_name(), "Users");
    assert_eq!(table.columns[0].name, "UserId");
    Ok(())
}

#[test]
fn test_data_types() -> Result<()> {
    let cases = [
        ("SMALLINT", DataType::SmallInt),
        ("int", DataType::Integer),
        ("INTEGER", DataType::Integer),
        ("int8", DataType::BigInt),
        ("REAL", DataType::Real),
        ("FLOAT(10)", DataType::Real),
        ("FLOAT(53)", DataType::DoublePrecision),
        ("FLOAT", DataType::DoublePrecision),
        ("DOUBLE PRECISION", DataType::DoublePrecision),
        (
            "DECIMAL(12)",
            DataType::Numeric {
                precision: Some(12),
                scale: None,
            },
        ),
        (
            "NUMERIC",
            DataType::Numeric {
                precision: None,
                scale: None,
            },
        ),
        ("BOOLEAN", DataType::Boolean),
        ("VARCHAR", DataType::Varchar { length: None }),
        ("CHARACTER VARYING(40)", DataType::Varchar { length: Some(40) }),
        ("CHAR(2)", DataType::Char { length: Some(2) }),
        ("DATE", DataType::Date),
        ("TIME", DataType::Time),
        ("TIMESTAMP", DataType::Timestamp),
        ("BYTEA", DataType::Bytea),
        ("UUID", DataType::Uuid),
        ("JSONB", DataType::Json),
        ("citext", DataType::Custom(ObjectName::from("citext"))),
        ("public.money_t", DataType::Custom(ObjectName::from("public.money_t"))),
    ];

    for (type_sql, expected) in cases {
        let column = single_column(&format!("CREATE TABLE t (c {})", type_sql))?;
        assert_eq!(column.data_type, expected, "тип {}", type_sql);
    }
    Ok(())
}

#[test]
fn test_invalid_data_types() {
    assert_eq!(
        parse_error("CREATE TABLE t (c DOUBLE)"),
        "expected PRECISION found )"
    );
    assert_eq!(
        parse_error("CREATE TABLE t (c VARCHAR(abc))"),
        "expected an integer type modifier found abc"
    );
    assert_eq!(
        parse_error("CREATE TABLE t (c 'text')"),
        "expected a data type found 'text'"
    );
    assert_eq!(
        parse_error("CREATE TABLE t (c VARCHAR(10)"),
        "expected ',' or ')' after column definition found EOF"
    );
}

#[test]
fn test_collation() -> Result<()> {
    let column = single_column("CREATE TABLE t (name TEXT COLLATE \"C\" NOT NULL)")?;
    assert_eq!(column.collation, Some(ObjectName(vec!["C".to_string()])));
    assert!(column.not_null);
    Ok(())
}

#[test]
fn test_default_expressions() -> Result<()> {
    let cases = [
        ("0", Expression::Literal(Literal::Number("0".into()))),
        ("'n/a'", Expression::Literal(Literal::String("n/a".into()))),
        ("NULL", Expression::Literal(Literal::Null)),
        ("TRUE", Expression::Literal(Literal::Boolean(true))),
        ("false", Expression::Literal(Literal::Boolean(false))),
        (
            "-1.5",
            Expression::Negate(Box::new(Expression::Literal(Literal::Number("1.5".into())))),
        ),
        ("(42)", Expression::Literal(Literal::Number("42".into()))),
        ("current_timestamp", Expression::Identifier("current_timestamp".into())),
        (
            "now()",
            Expression::Function {
                name: "now".into(),
                args: Vec::new(),
            },
        ),
        (
            "coalesce(NULL, 'x')",
            Expression::Function {
                name: "coalesce".into(),
                args: vec![
                    Expression::Literal(Literal::Null),
                    Expression::Literal(Literal::String("x".into())),
                ],
            },
        ),
    ];

    for (default_sql, expected) in cases {
        let column = single_column(&format!("CREATE TABLE t (c TEXT DEFAULT {})", default_sql))?;
        assert_eq!(column.default, Some(expected), "DEFAULT {}", default_sql);
        assert!(column.is_nullable());
    }
    Ok(())
}

#[test]
fn test_invalid_default_expression() {
    assert_eq!(
        parse_error("CREATE TABLE t (c INT DEFAULT)"),
        "expected an expression found )"
    );
    assert_eq!(
        parse_error("CREATE TABLE t (c INT DEFAULT f(1 2))"),
        "expected ',' or ')' in argument list found 2"
    );
}

#[test]
fn test_parse_create_schema() -> Result<()> {
    match parse("CREATE SCHEMA IF NOT EXISTS billing")? {
        Statement::CreateSchema(schema) => {
            assert_eq!(schema.name, ObjectName::from("billing"));
            assert!(schema.if_not_exists);
        }
        other => panic!("Ожидался CREATE SCHEMA, получено {:?}", other),
    }
    Ok(())
}

#[test]
fn test_parse_drop_table() -> Result<()> {
    match parse("DROP TABLE IF EXISTS billing.invoices CASCADE;")? {
        Statement::DropTable(drop) => {
            assert_eq!(drop.name.to_string(), "billing.invoices");
            assert!(drop.if_exists);
            assert!(drop.cascade);
        }
        other => panic!("Ожидался DROP TABLE, получено {:?}", other),
    }

    match parse("DROP TABLE users RESTRICT")? {
        Statement::DropTable(drop) => {
            assert!(!drop.if_exists);
            assert!(!drop.cascade);
        }
        other => panic!("Ожидался DROP TABLE, получено {:?}", other),
    }
    Ok(())
}

#[test]
fn test_statement_dispatch_errors() {
    assert_eq!(
        parse_error("CREATE SOMETHING"),
        "expected TABLE, VIEW, INDEX or SCHEMA after CREATE found SOMETHING"
    );
    assert_eq!(parse_error("SELECT 1"), "expected a statement found SELECT");
    assert_eq!(parse_error(""), "expected a statement found EOF");
    assert_eq!(parse_error("DROP SCHEMA s"), "expected TABLE after DROP found SCHEMA");
}

#[test]
fn test_unsupported_statements() {
    let error = parse("CREATE VIEW v").unwrap_err();
    assert!(matches!(error, Error::Unsupported { .. }));
    assert_eq!(error.to_string(), "unsupported construct: CREATE VIEW");

    let error = parse("CREATE INDEX i").unwrap_err();
    assert_eq!(error.to_string(), "unsupported construct: CREATE INDEX");
}

#[test]
fn test_trailing_input_is_rejected() {
    assert_eq!(
        parse_error("CREATE TABLE t (id INT) extra"),
        "expected end of statement found extra"
    );
    assert_eq!(
        parse_error("CREATE TABLE t (id INT);;"),
        "expected end of statement found ;"
    );
}

#[test]
fn test_input_length_limit() {
    let settings = ParserSettings {
        max_input_length: 10,
        ..ParserSettings::default()
    };
    let error = SqlParser::with_settings("CREATE TABLE users ()", settings)
        .err()
        .unwrap();

    match error {
        Error::InputTooLarge { length, limit } => {
            assert_eq!(length, 21);
            assert_eq!(limit, 10);
        }
        other => panic!("Ожидалась ошибка размера, получено {:?}", other),
    }
}

#[test]
fn test_lexical_error_surfaces_from_constructor() {
    let error = SqlParser::new("CREATE TABLE t (id INT) @").err().unwrap();
    assert!(error.is_lexical());
}

#[test]
fn test_parse_error_position() {
    let error = parse("CREATE TABLE t (\n  id INT,\n  )").unwrap_err();
    match error.position() {
        Some(position) => {
            assert_eq!(position.line, 3);
            assert_eq!(position.column, 3);
        }
        None => panic!("Ожидалась позиция ошибки"),
    }
}

#[test]
fn test_deeply_nested_default_is_rejected() {
    let sql = format!(
        "CREATE TABLE t (a INT DEFAULT {}1{})",
        "(".repeat(100_000),
        ")".repeat(100_000)
    );
    let error = parse(&sql).unwrap_err();

    match error {
        Error::ExpressionTooDeep { limit, position } => {
            assert_eq!(limit, ParserSettings::default().max_expression_depth);
            assert_eq!(position.offset, 30 + limit);
        }
        other => panic!("Ожидалась ошибка вложенности, получено {:?}", other),
    }
}

#[test]
fn test_expression_depth_limit() -> Result<()> {
    let settings = ParserSettings {
        max_expression_depth: 3,
        ..ParserSettings::default()
    };
    let parse_with = |sql: &str| SqlParser::with_settings(sql, settings.clone())?.parse();

    // Три уровня помещаются в лимит
    parse_with("CREATE TABLE t (a INT DEFAULT ((1)))")?;
    parse_with("CREATE TABLE t (a INT DEFAULT - -1)")?;
    parse_with("CREATE TABLE t (a INT DEFAULT f(g(1)))")?;

    for sql in [
        "CREATE TABLE t (a INT DEFAULT (((1))))",
        "CREATE TABLE t (a INT DEFAULT - - -1)",
        "CREATE TABLE t (a INT DEFAULT f(g(h(1))))",
    ] {
        let error = parse_with(sql).unwrap_err();
        assert!(
            matches!(error, Error::ExpressionTooDeep { limit: 3, .. }),
            "{}: {:?}",
            sql,
            error
        );
        assert_eq!(error.to_string(), "expression nesting exceeds the limit of 3");
    }
    Ok(())
}

#[test]
fn test_depth_is_counted_per_expression() -> Result<()> {
    let settings = ParserSettings {
        max_expression_depth: 2,
        ..ParserSettings::default()
    };
    // Соседние выражения не накапливают глубину
    let statement = SqlParser::with_settings(
        "CREATE TABLE t (a INT DEFAULT (1), b INT DEFAULT (2), c INT DEFAULT f(1, 2, 3))",
        settings,
    )?
    .parse()?;

    match statement {
        Statement::CreateTable(table) => assert_eq!(table.columns.len(), 3),
        other => panic!("Ожидался CREATE TABLE, получено {:?}", other),
    }
    Ok(())
}
