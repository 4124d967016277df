//! Product and toy ("mainan") catalogs.
//!
//! Both tables share one layout, so a single repository serves them,
//! parameterised by [`CatalogKind`].

pub mod currency;
pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{CatalogItem, CatalogPatch, NewCatalogItem};
pub use repository::CatalogRepository;

/// Which catalog table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Product,
    Toy,
}

impl CatalogKind {
    /// Table name, also the URL segment under `/api/v1`.
    pub fn table(self) -> &'static str {
        match self {
            CatalogKind::Product => "products",
            CatalogKind::Toy => "mainan",
        }
    }

    /// Human-readable noun for messages
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Product => "Product",
            CatalogKind::Toy => "Toy",
        }
    }

    pub fn image_url(self, id: i64) -> String {
        format!("/api/v1/{}/{}/image", self.table(), id)
    }

    pub fn not_found_message(self) -> String {
        format!("{} not found", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tables() {
        assert_eq!(CatalogKind::Product.table(), "products");
        assert_eq!(CatalogKind::Toy.table(), "mainan");
        assert_eq!(CatalogKind::Toy.image_url(3), "/api/v1/mainan/3/image");
        assert_eq!(CatalogKind::Product.not_found_message(), "Product not found");
    }
}
