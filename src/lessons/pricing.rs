//! Price totals with a percentage tax.

use std::fmt;

use super::LessonError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub original_price: f64,
    /// Percentage, e.g. `8.5` for 8.5%
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub final_total: f64,
}

pub fn total_with_tax(price: f64, tax_rate: f64) -> Result<PriceBreakdown, LessonError> {
    if price < 0.0 || tax_rate < 0.0 {
        return Err(LessonError::NegativeAmount);
    }

    let tax_amount = price * tax_rate / 100.0;
    Ok(PriceBreakdown {
        original_price: price,
        tax_rate,
        tax_amount,
        final_total: price + tax_amount,
    })
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "💰 Price Breakdown:")?;
        writeln!(f, "Original Price: ${:.2}", self.original_price)?;
        writeln!(f, "Tax ({}%): ${:.2}", self.tax_rate, self.tax_amount)?;
        write!(f, "Final Total: ${:.2}", self.final_total)
    }
}
