//! The demo shopping cart
//!
//! Immutable for the life of a run. Subtotal, tax, and total are computed
//! from the line items so displayed arithmetic always holds.

use serde::{Deserialize, Serialize};

use crate::error::{OcnError, Result};
use crate::round_cents;

/// Sales tax rate applied to the demo cart
pub const DEMO_TAX_RATE: f64 = 0.08;

/// One cart line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    pub name: String,
    pub qty: u32,
    pub price: f64,
}

impl CartItem {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, qty: u32, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            qty,
            price,
        }
    }

    /// Line total: qty x unit price
    pub fn line_total(&self) -> f64 {
        round_cents(self.qty as f64 * self.price)
    }
}

/// Fixed shopping-cart value object for a demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// Always "USD" for the demo
    pub currency: String,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Cart {
    /// Build a cart from items, computing subtotal, tax, and total.
    pub fn with_tax_rate(items: Vec<CartItem>, tax_rate: f64) -> Self {
        let subtotal = round_cents(items.iter().map(CartItem::line_total).sum());
        let tax = round_cents(subtotal * tax_rate);
        let total = round_cents(subtotal + tax);
        Self {
            items,
            currency: "USD".to_string(),
            subtotal,
            tax,
            total,
        }
    }

    /// The canonical demo cart: two Oxford shirts and a blazer.
    ///
    /// Subtotal 380.00, tax 30.40 (8%), total 410.40.
    pub fn oxford() -> Self {
        Self::with_tax_rate(
            vec![
                CartItem::new("OXFORD-SLIM-CREW-M", "Slim-Fit Crew Oxford (M)", 2, 120.0),
                CartItem::new("BLAZER-NAVY-40R", "Navy Blazer", 1, 140.0),
            ],
            DEMO_TAX_RATE,
        )
    }

    /// Verify the stored totals against the line items.
    pub fn check(&self) -> Result<()> {
        let subtotal = round_cents(self.items.iter().map(CartItem::line_total).sum());
        if subtotal != self.subtotal {
            return Err(OcnError::InconsistentCart {
                detail: format!("subtotal {} != sum of lines {}", self.subtotal, subtotal),
            });
        }
        let total = round_cents(self.subtotal + self.tax);
        if total != self.total {
            return Err(OcnError::InconsistentCart {
                detail: format!("total {} != subtotal + tax {}", self.total, total),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oxford_cart_totals() {
        let cart = Cart::oxford();
        assert_eq!(cart.subtotal, 380.00);
        assert_eq!(cart.tax, 30.40);
        assert_eq!(cart.total, 410.40);
        assert_eq!(cart.currency, "USD");
        cart.check().unwrap();
    }

    #[test]
    fn test_line_totals() {
        let cart = Cart::oxford();
        assert_eq!(cart.items[0].line_total(), 240.00);
        assert_eq!(cart.items[1].line_total(), 140.00);
    }

    #[test]
    fn test_inconsistent_cart_rejected() {
        let mut cart = Cart::oxford();
        cart.total = 999.99;
        assert!(cart.check().is_err());
    }
}
