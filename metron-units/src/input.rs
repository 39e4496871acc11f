//! Free-text quantity input such as "12.4 km/s2" or "3,894,829.88 sq in"

use std::sync::LazyLock;

use metron_core::UnitError;
use regex::Regex;

use crate::{Quantity, UnitRef, UnitRegistry};

static TEXT_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?[\d.,]+)\s*(.*)$").expect("quantity pattern is valid"));

impl UnitRegistry {
    /// Parse "<number> <unit>" into a quantity.
    ///
    /// Commas in the number are thousands separators and are dropped. The
    /// unit part may be empty (a dimensionless number) and may contain spaces,
    /// as in "sq in". Surrounding whitespace, line endings included, is ignored.
    pub fn parse_quantity(&self, text: &str) -> Result<Quantity, UnitError> {
        let caps = TEXT_RX
            .captures(text.trim())
            .ok_or_else(|| UnitError::InvalidFormat(format!("cannot parse quantity [{}]", text)))?;

        let number = &caps[1];
        if number.matches('.').count() > 1 {
            return Err(UnitError::InvalidFormat(format!(
                "more than one decimal point in [{}]",
                text
            )));
        }
        let number = number.replace(',', "");
        let value: f64 = number
            .parse()
            .map_err(|_| UnitError::InvalidNumber(number.clone()))?;

        let symbol = caps[2].trim_end();
        let unit = self.resolve(symbol)?;
        Ok(Quantity::new(value, UnitRef::Resolved(unit)))
    }
}
