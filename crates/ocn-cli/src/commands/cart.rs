//! `ocn-demo cart` - print the canonical demo cart

use colored::*;

use ocn_types::{Cart, DEMO_TAX_RATE};

use crate::display;

pub fn show() {
    let cart = Cart::oxford();

    display::section("Demo cart");
    for item in &cart.items {
        println!(
            "  {:<28} {} × ${:>7.2}  = ${:>7.2}   {}",
            item.name,
            item.qty,
            item.price,
            item.line_total(),
            item.sku.bright_black(),
        );
    }
    println!("  {}", "─".repeat(56).bright_black());
    display::labeled("Subtotal", &format!("${:.2}", cart.subtotal));
    display::labeled(
        &format!("Tax ({:.0}%)", DEMO_TAX_RATE * 100.0),
        &format!("${:.2}", cart.tax),
    );
    display::labeled("Total", &format!("${:.2} {}", cart.total, cart.currency));
}
