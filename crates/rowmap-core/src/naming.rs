//! Field identifier to column identifier translation

use convert_case::{Case, Casing};
use serde::Deserialize;

/// Converts a declared field name into its storage column name
pub trait IdentifierTranslator: Send + Sync {
    fn to_column_identifier(&self, field_name: &str) -> String;
}

/// camelCase / PascalCase to snake_case (`avatarUrl` -> `avatar_url`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCase;

impl IdentifierTranslator for SnakeCase {
    fn to_column_identifier(&self, field_name: &str) -> String {
        field_name.to_case(Case::Snake)
    }
}

/// Uses the field name unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl IdentifierTranslator for Verbatim {
    fn to_column_identifier(&self, field_name: &str) -> String {
        field_name.to_string()
    }
}

/// Configurable choice of translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    SnakeCase,
    Verbatim,
}

impl NamingStrategy {
    pub fn translator(self) -> Box<dyn IdentifierTranslator> {
        match self {
            NamingStrategy::SnakeCase => Box::new(SnakeCase),
            NamingStrategy::Verbatim => Box::new(Verbatim),
        }
    }
}
