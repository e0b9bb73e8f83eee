//! Тесты парсера

mod parser_tests;
