//! Cart catalogs built from freshly fetched lists.
//!
//! The stock recorded here is the ceiling the sales cart enforces until the
//! next fetch.

use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialId};
use contracts::domain::a005_resale_product::aggregate::ResaleProduct;
use contracts::domain::a006_product_variant::aggregate::ProductVariant;
use contracts::shared::cart::CatalogEntry;
use contracts::shared::stock_item::{PurchaseItemRef, StockItemRef};

/// Variants and resale products, bounded by their stock.
pub fn sale_catalog(
    variants: &[ProductVariant],
    resale: &[ResaleProduct],
) -> Vec<CatalogEntry<StockItemRef>> {
    let variants = variants.iter().map(|v| CatalogEntry {
        reference: StockItemRef::Variant(v.id),
        name: v.label(),
        stock_limit: Some(v.stock as f64),
        default_price: v.sale_price,
        whole_units: true,
    });
    let resale = resale.iter().map(|r| CatalogEntry {
        reference: StockItemRef::Resale(r.id),
        name: r.name.clone(),
        stock_limit: Some(r.stock as f64),
        default_price: r.sale_price,
        whole_units: true,
    });
    variants.chain(resale).collect()
}

/// Raw materials (fractional quantities) and resale products, priced at cost.
pub fn purchase_catalog(
    materials: &[RawMaterial],
    resale: &[ResaleProduct],
) -> Vec<CatalogEntry<PurchaseItemRef>> {
    let materials = materials.iter().map(|m| {
        let reference = PurchaseItemRef::Material(m.id);
        CatalogEntry {
            whole_units: reference.whole_units(),
            reference,
            name: format!("{} ({})", m.name, m.unit),
            stock_limit: None,
            default_price: m.cost,
        }
    });
    let resale = resale.iter().map(|r| {
        let reference = PurchaseItemRef::Resale(r.id);
        CatalogEntry {
            whole_units: reference.whole_units(),
            reference,
            name: r.name.clone(),
            stock_limit: None,
            default_price: r.purchase_cost,
        }
    });
    materials.chain(resale).collect()
}

/// Materials for a recipe; price is irrelevant there.
pub fn bom_catalog(materials: &[RawMaterial]) -> Vec<CatalogEntry<RawMaterialId>> {
    materials
        .iter()
        .map(|m| CatalogEntry {
            reference: m.id,
            name: format!("{} ({})", m.name, m.unit),
            stock_limit: None,
            default_price: 0.0,
            whole_units: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_manufactured_product::aggregate::ManufacturedProductId;
    use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
    use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
    use contracts::shared::cart::{Cart, CartError};

    fn variant(id: i64, stock: i64) -> ProductVariant {
        ProductVariant {
            id: ProductVariantId(id),
            product_id: ManufacturedProductId(1),
            size: "M".into(),
            color: "Azul".into(),
            stock,
            meli_id: None,
            product_name: Some("Filipina".into()),
            sale_price: 450.0,
        }
    }

    fn resale(id: i64, stock: i64) -> ResaleProduct {
        ResaleProduct {
            id: ResaleProductId(id),
            name: "Estetoscopio".into(),
            description: None,
            purchase_cost: 300.0,
            sale_price: 520.0,
            stock,
            supplier_id: None,
            supplier: None,
            meli_id: None,
        }
    }

    #[test]
    fn test_sale_catalog_bounds_cart_by_stock() {
        let catalog = sale_catalog(&[variant(1, 3)], &[resale(2, 1)]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Filipina (M/Azul)");

        let mut cart = Cart::for_sale();
        let item = StockItemRef::Variant(ProductVariantId(1));
        assert!(cart.add(&item, 2.0, 450.0, &catalog).is_ok());
        assert!(matches!(
            cart.add(&item, 2.0, 450.0, &catalog),
            Err(CartError::ExceedsStock { .. })
        ));
    }

    #[test]
    fn test_purchase_catalog_prices_at_cost() {
        let catalog = purchase_catalog(&[], &[resale(2, 0)]);
        assert_eq!(catalog[0].default_price, 300.0);
        assert!(catalog[0].whole_units);
        assert_eq!(catalog[0].stock_limit, None);
    }
}
