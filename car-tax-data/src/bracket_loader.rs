use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use car_tax_core::{BracketLoader, LoadError, TaxBracket};
use tracing::{debug, info, warn};

use crate::decimal::parse_decimal;
use crate::properties::Properties;
use crate::read_error;

/// Key holding the number of brackets.
pub const BRACKET_COUNT_KEY: &str = "numero.rangos";

/// Prefix of the bracket keys, numbered from 1.
pub const BRACKET_KEY_PREFIX: &str = "rango";

/// Loader for the tax bracket properties file.
///
/// ```text
/// numero.rangos=2
/// rango1=0,30000000,1.5
/// rango2=30000000,70000000,2.0
/// ```
///
/// Each `rangoN` value is `lower,upper,rate_percent`.
#[derive(Debug, Clone)]
pub struct BracketFileLoader {
    path: PathBuf,
}

impl BracketFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse brackets from any reader, preserving key order `rango1..rangoN`.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracket>, LoadError> {
        let properties = Properties::parse(reader).map_err(|e| LoadError::Io(e.to_string()))?;
        Self::from_properties(&properties)
    }

    /// Build brackets from already parsed properties.
    pub fn from_properties(properties: &Properties) -> Result<Vec<TaxBracket>, LoadError> {
        let count = required(properties, BRACKET_COUNT_KEY)?.trim();
        let count: usize = count
            .parse()
            .map_err(|_| LoadError::InvalidCount(count.to_string()))?;

        let brackets = (1..=count)
            .map(|n| {
                let key = format!("{BRACKET_KEY_PREFIX}{n}");
                let value = required(properties, &key)?;
                parse_bracket(&key, value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = brackets.len(), "parsed tax brackets");
        Ok(brackets)
    }
}

impl BracketLoader for BracketFileLoader {
    fn load_brackets(&self) -> Result<Vec<TaxBracket>, LoadError> {
        let file = File::open(&self.path).map_err(|e| read_error(&self.path, &e))?;
        let brackets = Self::parse(file)?;

        if brackets.is_empty() {
            warn!(path = %self.path.display(), "bracket file defines no tax brackets");
        }
        info!(
            path = %self.path.display(),
            count = brackets.len(),
            "loaded tax brackets"
        );
        Ok(brackets)
    }
}

fn required<'a>(
    properties: &'a Properties,
    key: &str,
) -> Result<&'a str, LoadError> {
    properties
        .get(key)
        .ok_or_else(|| LoadError::MissingKey(key.to_string()))
}

fn parse_bracket(
    key: &str,
    value: &str,
) -> Result<TaxBracket, LoadError> {
    let invalid = |reason: String| LoadError::InvalidBracket {
        key: key.to_string(),
        reason,
    };

    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(invalid(format!(
            "expected lower,upper,rate but got '{value}'"
        )));
    }

    let lower = parse_decimal(fields[0]).map_err(invalid)?;
    let upper = parse_decimal(fields[1]).map_err(invalid)?;
    let rate = parse_decimal(fields[2]).map_err(invalid)?;

    TaxBracket::new(lower, upper, rate).map_err(|e| invalid(e.to_string()))
}
