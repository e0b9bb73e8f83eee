//! Общие типы и утилиты для ddlparser

pub mod config;
pub mod error;

pub use config::*;
pub use error::{Error, Result};
