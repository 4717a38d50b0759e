use smartstock_core::validation::validate_product;
use smartstock_core::{CreateProduct, Product};
use tracing::{debug, info};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const PRODUCTS: &str = "productos/";

impl SmartStockClient {
    /// `GET productos/`
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let products: Option<Vec<Product>> = self.http.get(PRODUCTS).await?;
        let products = products.unwrap_or_default();
        debug!(count = products.len(), "Products loaded");
        Ok(products)
    }

    /// `POST productos/`, after form validation.
    pub async fn create_product(&self, product: &CreateProduct) -> ClientResult<Product> {
        validate_product(product)?;
        let created: Product = self.http.post(PRODUCTS, product).await?;
        info!(product_id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// `PUT productos/{id}`, after form validation.
    pub async fn update_product(&self, id: i64, product: &CreateProduct) -> ClientResult<Product> {
        validate_product(product)?;
        let updated: Product = self
            .http
            .put(&format!("{}{}", PRODUCTS, id), product)
            .await?;
        info!(product_id = id, "Product updated");
        Ok(updated)
    }

    /// `DELETE productos/{id}`
    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("{}{}", PRODUCTS, id)).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}
