//! Bounded resources
//!
//! A resource works like an account for any kind of quantity: fuel in a
//! tank, stock in a warehouse, energy in a battery. Its balance always stays
//! within `min ..= max`; an operation that would break this fails and leaves
//! the resource unchanged.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use metron_core::format::default_template;
use metron_core::UnitError;
use metron_units::{
    ensure_compatible, multiply_by_scalar, try_add, try_compare, try_subtract, Quantity,
};
use serde::{Deserialize, Serialize};

use crate::{Bound, Context, ContextError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    min: Quantity,
    max: Quantity,
    balance: Quantity,
    context: Arc<Context>,
}

impl Resource {
    /// Create a resource with balance `min`.
    ///
    /// `min` must be less than `max`, in compatible units. Without a context
    /// the resource reports in the unit of `min` with the default template.
    pub fn new(
        min: Quantity,
        max: Quantity,
        context: Option<Arc<Context>>,
    ) -> Result<Self, ContextError> {
        let context = match context {
            Some(context) => context,
            None => {
                let unit = min.unit().get().ok_or(UnitError::UndefinedUnit)?;
                Arc::new(Context::anonymous(Arc::new(unit.clone()), default_template()))
            }
        };

        if try_compare(&min, &max)? != Ordering::Less {
            return Err(ContextError::InvalidLimits {
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        Ok(Resource {
            min: context.convert(&min)?,
            max: context.convert(&max)?,
            balance: min,
            context,
        })
    }

    /// Replace the balance
    pub fn set(&mut self, q: Quantity) -> Result<(), ContextError> {
        ensure_compatible(&self.balance, &q)?;
        self.check_bounds(&q)?;
        self.balance = q;
        Ok(())
    }

    pub fn deposit(&mut self, q: &Quantity) -> Result<(), ContextError> {
        let next = try_add(&self.balance, q)?;
        self.check_bounds(&next)?;
        self.balance = next;
        Ok(())
    }

    pub fn withdraw(&mut self, q: &Quantity) -> Result<(), ContextError> {
        let next = try_subtract(&self.balance, q)?;
        self.check_bounds(&next)?;
        self.balance = next;
        Ok(())
    }

    /// Withdraw a percentage (0 to 100) of the balance, returning the amount
    /// taken in the context unit
    pub fn withdraw_pct(&mut self, percentage: f64) -> Result<Quantity, ContextError> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(ContextError::PercentageOutOfRange(percentage));
        }
        let taken = multiply_by_scalar(&self.balance, percentage / 100.0);
        self.withdraw(&taken)?;
        Ok(self.context.in_context(&taken))
    }

    /// The balance in the context unit
    pub fn balance(&self) -> Quantity {
        self.context.in_context(&self.balance)
    }

    /// Lower the limit. Fails if it is above the balance.
    pub fn set_min(&mut self, min: Quantity) -> Result<(), ContextError> {
        if try_compare(&min, &self.balance)? == Ordering::Greater {
            return Err(self.crosses_balance(Bound::Min, &min));
        }
        self.min = self.context.in_context(&min);
        Ok(())
    }

    /// Raise the limit. Fails if it is below the balance.
    pub fn set_max(&mut self, max: Quantity) -> Result<(), ContextError> {
        if try_compare(&max, &self.balance)? == Ordering::Less {
            return Err(self.crosses_balance(Bound::Max, &max));
        }
        self.max = self.context.in_context(&max);
        Ok(())
    }

    /// Current `(min, max)` in the context unit
    pub fn limits(&self) -> (&Quantity, &Quantity) {
        (&self.min, &self.max)
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    fn crosses_balance(&self, bound: Bound, limit: &Quantity) -> ContextError {
        ContextError::LimitCrossesBalance {
            bound,
            limit: limit.to_string(),
            balance: self.balance().to_string(),
        }
    }

    fn check_bounds(&self, q: &Quantity) -> Result<(), ContextError> {
        let below = try_compare(q, &self.min)? == Ordering::Less;
        let above = try_compare(q, &self.max)? == Ordering::Greater;
        if below || above {
            return Err(ContextError::out_of_bounds(
                q.to_string(),
                self.min.to_string(),
                self.max.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.balance().format(self.context.template()))
    }
}
