//! Client-side order drafting: a list of lines referencing catalog items,
//! each with a quantity and a unit price, keyed by a local temporary key.
//!
//! Purchases, sales and BOM assignment all draft through the same cart with
//! different rules (sales are bounded by known stock, BOM rows are unique
//! per material).

use crate::shared::format::format_quantity;
use std::fmt;

const EPSILON: f64 = 1e-9;

/// An item the user can pick, as known from the last fetched list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry<R> {
    pub reference: R,
    pub name: String,
    /// Known stock at fetch time; `None` when stock does not bound the cart
    pub stock_limit: Option<f64>,
    pub default_price: f64,
    pub whole_units: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<R> {
    pub temp_key: u32,
    pub reference: R,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub stock_limit: Option<f64>,
}

impl<R> CartLine<R> {
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Lines of the same reference summed together.
#[derive(Debug, Clone, PartialEq)]
pub struct CartGroup<R> {
    pub reference: R,
    pub name: String,
    pub quantity: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartRules {
    pub stock_bounded: bool,
    pub unique_references: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartError {
    UnknownReference,
    InvalidQuantity,
    FractionalQuantity,
    InvalidPrice,
    ExceedsStock {
        name: String,
        requested: f64,
        available: f64,
    },
    Duplicate {
        name: String,
    },
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::UnknownReference => write!(f, "Selecciona un artículo válido"),
            CartError::InvalidQuantity => write!(f, "La cantidad debe ser mayor a cero"),
            CartError::FractionalQuantity => {
                write!(f, "La cantidad debe ser un número entero")
            }
            CartError::InvalidPrice => write!(f, "El precio no puede ser negativo"),
            CartError::ExceedsStock {
                name,
                requested,
                available,
            } => write!(
                f,
                "Stock insuficiente para {}. Solicitado: {}, Disponible: {}",
                name,
                format_quantity(*requested),
                format_quantity(*available)
            ),
            CartError::Duplicate { name } => write!(f, "{} ya está en la lista", name),
        }
    }
}

impl std::error::Error for CartError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart<R> {
    rules: CartRules,
    lines: Vec<CartLine<R>>,
    next_key: u32,
}

impl<R> Default for Cart<R> {
    fn default() -> Self {
        Self::with_rules(CartRules::default())
    }
}

impl<R> Cart<R> {
    pub fn with_rules(rules: CartRules) -> Self {
        Self {
            rules,
            lines: Vec::new(),
            next_key: 1,
        }
    }

    /// Purchases: unbounded quantities.
    pub fn for_purchase() -> Self {
        Self::with_rules(CartRules::default())
    }

    /// Sales: quantity per item capped by the stock known at fetch time.
    pub fn for_sale() -> Self {
        Self::with_rules(CartRules {
            stock_bounded: true,
            unique_references: false,
        })
    }

    /// BOM assignment: one row per material.
    pub fn for_bom() -> Self {
        Self::with_rules(CartRules {
            stock_bounded: false,
            unique_references: true,
        })
    }

    pub fn rules(&self) -> CartRules {
        self.rules
    }

    pub fn lines(&self) -> &[CartLine<R>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes exactly the line with `temp_key`. Unknown keys are a no-op.
    pub fn remove(&mut self, temp_key: u32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.temp_key != temp_key);
        self.lines.len() != before
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Maps lines into the backend detail shape.
    pub fn to_payload<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(&CartLine<R>) -> T,
    {
        self.lines.iter().map(f).collect()
    }

    /// Empties the cart. Temporary keys keep counting up.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl<R: Clone + PartialEq> Cart<R> {
    pub fn quantity_for(&self, reference: &R) -> f64 {
        self.lines
            .iter()
            .filter(|l| &l.reference == reference)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn add(
        &mut self,
        reference: &R,
        quantity: f64,
        unit_price: f64,
        catalog: &[CatalogEntry<R>],
    ) -> Result<u32, CartError> {
        let entry = catalog
            .iter()
            .find(|e| &e.reference == reference)
            .ok_or(CartError::UnknownReference)?;

        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CartError::InvalidQuantity);
        }
        if entry.whole_units && quantity.fract() != 0.0 {
            return Err(CartError::FractionalQuantity);
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(CartError::InvalidPrice);
        }
        if self.rules.unique_references && self.lines.iter().any(|l| &l.reference == reference) {
            return Err(CartError::Duplicate {
                name: entry.name.clone(),
            });
        }
        if self.rules.stock_bounded {
            let available = entry.stock_limit.unwrap_or(0.0);
            let requested = self.quantity_for(reference) + quantity;
            if requested > available + EPSILON {
                return Err(CartError::ExceedsStock {
                    name: entry.name.clone(),
                    requested,
                    available,
                });
            }
        }

        let temp_key = self.next_key;
        self.next_key += 1;
        self.lines.push(CartLine {
            temp_key,
            reference: reference.clone(),
            name: entry.name.clone(),
            quantity,
            unit_price,
            stock_limit: entry.stock_limit,
        });
        Ok(temp_key)
    }

    /// Applies the stock limits of a freshly fetched catalog to the lines.
    pub fn refresh_limits(&mut self, catalog: &[CatalogEntry<R>]) {
        for line in self.lines.iter_mut() {
            line.stock_limit = catalog
                .iter()
                .find(|e| e.reference == line.reference)
                .and_then(|e| e.stock_limit);
        }
    }

    /// True when, for some reference, the summed quantity exceeds its limit.
    pub fn over_limit(&self) -> bool {
        if !self.rules.stock_bounded {
            return false;
        }
        self.grouped().iter().any(|g| {
            let limit = self
                .lines
                .iter()
                .find(|l| l.reference == g.reference)
                .and_then(|l| l.stock_limit)
                .unwrap_or(0.0);
            g.quantity > limit + EPSILON
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_empty() && !self.over_limit()
    }

    /// Lines merged per reference, in first-appearance order.
    pub fn grouped(&self) -> Vec<CartGroup<R>> {
        let mut groups: Vec<CartGroup<R>> = Vec::new();
        for line in &self.lines {
            match groups.iter_mut().find(|g| g.reference == line.reference) {
                Some(g) => {
                    g.quantity += line.quantity;
                    g.subtotal += line.subtotal();
                }
                None => groups.push(CartGroup {
                    reference: line.reference.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    subtotal: line.subtotal(),
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Item {
        Tela,
        Boton,
        Pijama,
    }

    fn catalog() -> Vec<CatalogEntry<Item>> {
        vec![
            CatalogEntry {
                reference: Item::Tela,
                name: "Tela Polar".into(),
                stock_limit: Some(12.5),
                default_price: 80.0,
                whole_units: false,
            },
            CatalogEntry {
                reference: Item::Boton,
                name: "Botón".into(),
                stock_limit: Some(100.0),
                default_price: 1.5,
                whole_units: true,
            },
        ]
    }

    #[test]
    fn test_empty_cart_cannot_submit() {
        let cart: Cart<Item> = Cart::for_purchase();
        assert!(cart.is_empty());
        assert!(!cart.can_submit());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_add_assigns_fresh_keys_and_names() {
        let mut cart = Cart::for_purchase();
        let k1 = cart.add(&Item::Tela, 2.5, 80.0, &catalog()).unwrap();
        let k2 = cart.add(&Item::Tela, 1.0, 75.0, &catalog()).unwrap();
        assert_ne!(k1, k2);
        assert_eq!(cart.lines()[0].name, "Tela Polar");
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_only_keyed_line() {
        let mut cart = Cart::for_purchase();
        let k1 = cart.add(&Item::Tela, 1.0, 80.0, &catalog()).unwrap();
        let k2 = cart.add(&Item::Tela, 1.0, 80.0, &catalog()).unwrap();
        let k3 = cart.add(&Item::Boton, 10.0, 1.5, &catalog()).unwrap();

        assert!(cart.remove(k2));
        let keys: Vec<u32> = cart.lines().iter().map(|l| l.temp_key).collect();
        assert_eq!(keys, vec![k1, k3]);
        assert!(!cart.remove(k2));
        assert!(!cart.remove(999));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let mut cart = Cart::for_purchase();
        cart.add(&Item::Tela, 2.5, 80.0, &catalog()).unwrap();
        cart.add(&Item::Boton, 10.0, 1.5, &catalog()).unwrap();
        assert!((cart.total() - 215.0).abs() < 1e-9);
        let k = cart.lines()[0].temp_key;
        cart.remove(k);
        assert!((cart.total() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut cart = Cart::for_purchase();
        let cat = catalog();
        assert_eq!(
            cart.add(&Item::Pijama, 1.0, 1.0, &cat),
            Err(CartError::UnknownReference)
        );
        assert_eq!(cart.add(&Item::Tela, 0.0, 1.0, &cat), Err(CartError::InvalidQuantity));
        assert_eq!(cart.add(&Item::Tela, -1.0, 1.0, &cat), Err(CartError::InvalidQuantity));
        assert_eq!(cart.add(&Item::Tela, 1.0, -1.0, &cat), Err(CartError::InvalidPrice));
        assert_eq!(
            cart.add(&Item::Boton, 1.5, 1.0, &cat),
            Err(CartError::FractionalQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_sale_cart_is_capped_across_lines() {
        let mut cart = Cart::for_sale();
        let cat = catalog();
        cart.add(&Item::Tela, 10.0, 80.0, &cat).unwrap();
        let err = cart.add(&Item::Tela, 3.0, 80.0, &cat).unwrap_err();
        assert_eq!(
            err,
            CartError::ExceedsStock {
                name: "Tela Polar".into(),
                requested: 13.0,
                available: 12.5
            }
        );
        cart.add(&Item::Tela, 2.5, 80.0, &cat).unwrap();
        assert!(cart.can_submit());
    }

    #[test]
    fn test_refreshed_limits_can_block_submit() {
        let mut cart = Cart::for_sale();
        cart.add(&Item::Boton, 50.0, 1.5, &catalog()).unwrap();
        let mut cat = catalog();
        cat[1].stock_limit = Some(20.0);
        cart.refresh_limits(&cat);
        assert!(cart.over_limit());
        assert!(!cart.can_submit());
    }

    #[test]
    fn test_purchase_cart_ignores_stock() {
        let mut cart = Cart::for_purchase();
        cart.add(&Item::Boton, 500.0, 1.0, &catalog()).unwrap();
        assert!(cart.can_submit());
    }

    #[test]
    fn test_bom_cart_rejects_duplicate_material() {
        let mut cart = Cart::for_bom();
        cart.add(&Item::Tela, 1.5, 0.0, &catalog()).unwrap();
        assert_eq!(
            cart.add(&Item::Tela, 1.0, 0.0, &catalog()),
            Err(CartError::Duplicate {
                name: "Tela Polar".into()
            })
        );
    }

    #[test]
    fn test_grouped_and_payload() {
        let mut cart = Cart::for_purchase();
        cart.add(&Item::Tela, 1.0, 80.0, &catalog()).unwrap();
        cart.add(&Item::Boton, 4.0, 2.0, &catalog()).unwrap();
        cart.add(&Item::Tela, 2.0, 70.0, &catalog()).unwrap();

        let groups = cart.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].quantity, 3.0);
        assert_eq!(groups[0].subtotal, 220.0);

        let payload = cart.to_payload(|l| (l.reference, l.quantity));
        assert_eq!(payload, vec![(Item::Tela, 1.0), (Item::Boton, 4.0), (Item::Tela, 2.0)]);
    }

    #[test]
    fn test_clear_keeps_key_counter() {
        let mut cart = Cart::for_purchase();
        let k1 = cart.add(&Item::Tela, 1.0, 80.0, &catalog()).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        let k2 = cart.add(&Item::Tela, 1.0, 80.0, &catalog()).unwrap();
        assert!(k2 > k1);
    }
}
