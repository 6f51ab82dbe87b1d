//! Authoritative catalog state and its mutation contract.
//!
//! One `CatalogStore` owns the in-memory [`Catalog`] snapshot. Every
//! mutation validates against the current snapshot before touching the
//! backend, and on backend success re-fetches the affected collection
//! rather than patching locally — read-your-writes via refetch. On any
//! failure the snapshot stays at its last known-good contents.
//!
//! Concurrent admins editing the same entity are a last-write-wins race;
//! there is one authoritative backend and no merge contract. Known
//! limitation, accepted.

use crate::backend::CatalogBackend;
use crate::row::ProductRow;
use frostline_auth::Session;
use frostline_commerce::catalog::{Brand, Catalog, Category, Product};
use frostline_commerce::error::CatalogError;
use frostline_commerce::ids::{BrandId, CategoryId, ProductId};
use frostline_commerce::sku::SkuPolicy;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Backend settings key holding the site logo override.
pub const SITE_LOGO_KEY: &str = "site_logo";

/// The catalog engine: snapshot plus gated CRUD.
pub struct CatalogStore<B> {
    backend: B,
    catalog: RwLock<Catalog>,
    sku_policy: SkuPolicy,
    site_logo: RwLock<String>,
    default_site_logo: String,
}

fn authorize(session: &Session) -> Result<(), CatalogError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::Unauthorized)
    }
}

impl<B: CatalogBackend> CatalogStore<B> {
    /// Create a store over a backend. The snapshot starts empty; call
    /// [`CatalogStore::refresh_all`] to load it.
    pub fn new(backend: B, sku_policy: SkuPolicy, default_site_logo: impl Into<String>) -> Self {
        let default_site_logo = default_site_logo.into();
        Self {
            backend,
            catalog: RwLock::new(Catalog::new()),
            sku_policy,
            site_logo: RwLock::new(default_site_logo.clone()),
            default_site_logo,
        }
    }

    /// The SKU policy in force.
    pub fn sku_policy(&self) -> &SkuPolicy {
        &self.sku_policy
    }

    /// A point-in-time copy of the whole catalog.
    pub async fn catalog(&self) -> Catalog {
        self.catalog.read().await.clone()
    }

    /// Load every collection and the site logo setting.
    pub async fn refresh_all(&self) -> Result<(), CatalogError> {
        self.refresh_categories().await?;
        self.refresh_brands().await?;
        self.refresh_products().await?;
        self.refresh_site_logo().await?;
        Ok(())
    }

    /// Re-fetch and re-normalize the product collection.
    pub async fn refresh_products(&self) -> Result<(), CatalogError> {
        let rows = self
            .backend
            .fetch_products()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        let products: Vec<Product> = rows.into_iter().map(ProductRow::into_product).collect();
        debug!(count = products.len(), "products refreshed");
        self.catalog.write().await.products = products;
        Ok(())
    }

    /// Re-fetch the category collection.
    pub async fn refresh_categories(&self) -> Result<(), CatalogError> {
        let categories = self
            .backend
            .fetch_categories()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        debug!(count = categories.len(), "categories refreshed");
        self.catalog.write().await.categories = categories;
        Ok(())
    }

    /// Re-fetch the brand collection.
    pub async fn refresh_brands(&self) -> Result<(), CatalogError> {
        let brands = self
            .backend
            .fetch_brands()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        debug!(count = brands.len(), "brands refreshed");
        self.catalog.write().await.brands = brands;
        Ok(())
    }

    // Products

    /// Add a product. Admin only; validates before any backend call.
    pub async fn add_product(
        &self,
        session: &Session,
        product: Product,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            catalog.validate_product(&product, &self.sku_policy)?;
        }
        self.backend
            .insert_product(ProductRow::from_product(&product))
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %product.id, sku = %product.sku, "product added");
        self.refresh_products().await
    }

    /// Update a product. Admin only; the product must already exist.
    pub async fn update_product(
        &self,
        session: &Session,
        product: Product,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            if catalog.product(&product.id).is_none() {
                return Err(CatalogError::ProductNotFound(product.id.to_string()));
            }
            catalog.validate_product(&product, &self.sku_policy)?;
        }
        self.backend
            .update_product(ProductRow::from_product(&product))
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %product.id, "product updated");
        self.refresh_products().await
    }

    /// Delete a product. Admin only. Existing basket and quote references
    /// are left dangling on purpose; they resolve as unknown at render
    /// time.
    pub async fn delete_product(
        &self,
        session: &Session,
        id: &ProductId,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        if self.catalog.read().await.product(id).is_none() {
            return Err(CatalogError::ProductNotFound(id.to_string()));
        }
        self.backend
            .delete_product(id)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %id, "product deleted");
        self.refresh_products().await
    }

    // Categories

    /// Add a category. Admin only.
    pub async fn add_category(
        &self,
        session: &Session,
        category: Category,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        self.catalog.read().await.validate_category(&category)?;
        self.backend
            .insert_category(category.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %category.id, name = %category.name, "category added");
        self.refresh_categories().await
    }

    /// Update a category. Admin only.
    pub async fn update_category(
        &self,
        session: &Session,
        category: Category,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            if catalog.category(&category.id).is_none() {
                return Err(CatalogError::CategoryNotFound(category.id.to_string()));
            }
            catalog.validate_category(&category)?;
        }
        self.backend
            .update_category(category.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %category.id, "category updated");
        self.refresh_categories().await
    }

    /// Delete a category. Admin only. Blocked while products or child
    /// categories still reference it.
    pub async fn delete_category(
        &self,
        session: &Session,
        id: &CategoryId,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            if catalog.category(id).is_none() {
                return Err(CatalogError::CategoryNotFound(id.to_string()));
            }
            if let Err(err) = catalog.ensure_category_deletable(id) {
                warn!(id = %id, error = %err, "category deletion blocked");
                return Err(err);
            }
        }
        self.backend
            .delete_category(id)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %id, "category deleted");
        self.refresh_categories().await
    }

    // Brands

    /// Add a brand. Admin only.
    pub async fn add_brand(&self, session: &Session, brand: Brand) -> Result<(), CatalogError> {
        authorize(session)?;
        self.catalog.read().await.validate_brand(&brand)?;
        self.backend
            .insert_brand(brand.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %brand.id, name = %brand.name, "brand added");
        self.refresh_brands().await
    }

    /// Update a brand. Admin only.
    pub async fn update_brand(&self, session: &Session, brand: Brand) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            if catalog.brand(&brand.id).is_none() {
                return Err(CatalogError::BrandNotFound(brand.id.to_string()));
            }
            catalog.validate_brand(&brand)?;
        }
        self.backend
            .update_brand(brand.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %brand.id, "brand updated");
        self.refresh_brands().await
    }

    /// Delete a brand. Admin only. Blocked while products reference it.
    pub async fn delete_brand(&self, session: &Session, id: &BrandId) -> Result<(), CatalogError> {
        authorize(session)?;
        {
            let catalog = self.catalog.read().await;
            if catalog.brand(id).is_none() {
                return Err(CatalogError::BrandNotFound(id.to_string()));
            }
            if let Err(err) = catalog.ensure_brand_deletable(id) {
                warn!(id = %id, error = %err, "brand deletion blocked");
                return Err(err);
            }
        }
        self.backend
            .delete_brand(id)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %id, "brand deleted");
        self.refresh_brands().await
    }

    // Site settings

    /// The current site logo URL.
    pub async fn site_logo(&self) -> String {
        self.site_logo.read().await.clone()
    }

    /// Reload the site logo from settings, falling back to the default.
    pub async fn refresh_site_logo(&self) -> Result<(), CatalogError> {
        let stored = self
            .backend
            .fetch_setting(SITE_LOGO_KEY)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        *self.site_logo.write().await = stored.unwrap_or_else(|| self.default_site_logo.clone());
        Ok(())
    }

    /// Persist a new site logo. Admin only.
    pub async fn set_site_logo(
        &self,
        session: &Session,
        url: impl Into<String>,
    ) -> Result<(), CatalogError> {
        authorize(session)?;
        let url = url.into();
        if url.trim().is_empty() {
            return Err(CatalogError::Validation("site logo URL is required".into()));
        }
        self.backend
            .upsert_setting(SITE_LOGO_KEY, &url)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!("site logo updated");
        self.refresh_site_logo().await
    }
}
