//! Catalog cart

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

/// Public catalog cart, owned by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product; merges into the existing line for the same product
    pub fn add(&mut self, product_id: i64, name: impl Into<String>, unit_price: f64, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id,
                name: name.into(),
                unit_price,
                quantity,
            }),
        }
    }

    /// Set a line's quantity; 0 removes the line. Returns false if absent.
    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ unit_price × quantity, rounded to 2 places
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| Decimal::from_f64(i.unit_price).unwrap_or_default() * Decimal::from(i.quantity))
            .sum::<Decimal>()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(1, "Bracket", 2.5, 2);
        cart.add(1, "Bracket", 2.5, 3);
        cart.add(2, "Hinge", 1.1, 1);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(1, "Bracket", 2.5, 2);
        assert!(cart.set_quantity(1, 4));
        assert_eq!(cart.item_count(), 4);
        assert!(cart.set_quantity(1, 0));
        assert!(cart.is_empty());
        assert!(!cart.set_quantity(1, 3));
    }

    #[test]
    fn test_subtotal_is_exact() {
        let mut cart = Cart::new();
        cart.add(1, "A", 0.1, 3);
        cart.add(2, "B", 0.2, 1);
        assert_eq!(cart.subtotal(), Decimal::new(50, 2));
        cart.clear();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
