//! Usage contexts for quantities
//!
//! A context names a usage domain ("person height", "rain intensity") and
//! fixes the unit quantities are shown in and the template they print with.

use std::io::Write;
use std::sync::Arc;

use metron_core::Template;
use metron_units::{Quantity, Unit, UnitRef, UnitRegistry};
use serde::{Deserialize, Serialize};

use crate::ContextError;

/// A preferred unit and print template for one usage domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    name: String,
    unit: Arc<Unit>,
    template: Template,
}

impl Context {
    /// Build a context; the unit may be any expression the registry resolves
    pub fn new(
        name: &str,
        unit: &str,
        template: &str,
        units: &UnitRegistry,
    ) -> Result<Self, ContextError> {
        Ok(Context {
            name: name.to_string(),
            unit: units.resolve(unit)?,
            template: Template::parse(template)?,
        })
    }

    /// An unnamed context for an already resolved unit
    pub fn anonymous(unit: Arc<Unit>, template: Template) -> Self {
        Context {
            name: String::new(),
            unit,
            template,
        }
    }

    /// Empty for anonymous contexts
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &Arc<Unit> {
        &self.unit
    }

    pub fn symbol(&self) -> &str {
        &self.unit.symbol
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// A quantity given in any compatible unit, expressed in this context's unit
    pub fn quantity(
        &self,
        value: f64,
        symbol: &str,
        units: &UnitRegistry,
    ) -> Result<Quantity, ContextError> {
        let unit = units.resolve(symbol)?;
        self.convert(&Quantity::new(value, UnitRef::Resolved(unit)))
    }

    /// Express a quantity in this context's unit
    pub fn convert(&self, q: &Quantity) -> Result<Quantity, ContextError> {
        Ok(q.convert_to_unit(&self.unit_ref())?)
    }

    /// Unchecked `convert` for quantities known to be compatible
    pub fn in_context(&self, q: &Quantity) -> Quantity {
        q.convert(&self.unit_ref())
    }

    /// Convert, then print with the context template
    pub fn render(&self, q: &Quantity) -> Result<String, ContextError> {
        let converted = self.convert(q)?;
        Ok(converted.format(&self.template))
    }

    pub fn write_to<W: Write>(&self, out: &mut W, q: &Quantity) -> Result<(), ContextError> {
        let text = self.render(q)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn unit_ref(&self) -> UnitRef {
        UnitRef::Resolved(Arc::clone(&self.unit))
    }
}
