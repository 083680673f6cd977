use crate::error::{CatalogError, CatalogErrorExt};
use shop_database::Database;
use shop_domain::catalog::{Money, Product};
use surrealdb::types::SurrealValue;
use tracing::instrument;

const PRODUCT_FIELDS: &str = "record::id(id) AS id, name, price, description, image, stock";

#[derive(Debug, SurrealValue)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    description: Option<String>,
    image: Option<String>,
    stock: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str| CatalogError::Internal {
            message: format!("{field} out of range").into(),
            context: Some(format!("product {}", row.id).into()),
        };

        Ok(Self {
            id: u32::try_from(row.id).map_err(|_| invalid("id"))?,
            price: Money::from_minor(u64::try_from(row.price).map_err(|_| invalid("price"))?),
            stock: u32::try_from(row.stock).map_err(|_| invalid("stock"))?,
            name: row.name,
            description: row.description,
            image: row.image,
        })
    }
}

/// Read access to the `product` table.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All products ordered by id.
    ///
    /// # Errors
    /// Query failures and rows that do not fit [`Product`].
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let rows = self
            .db
            .query(format!("SELECT {PRODUCT_FIELDS} FROM product ORDER BY id"))
            .await
            .context("Listing products")?
            .take::<Vec<ProductRow>>(0)
            .context("Decoding products")?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// # Errors
    /// Query failures and rows that do not fit [`Product`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: u32) -> Result<Option<Product>, CatalogError> {
        let rows = self
            .db
            .query(format!("SELECT {PRODUCT_FIELDS} FROM product WHERE record::id(id) = $id"))
            .bind(("id", i64::from(id)))
            .await
            .context("Loading product")?
            .take::<Vec<ProductRow>>(0)
            .context("Decoding product")?;
        rows.into_iter().next().map(Product::try_from).transpose()
    }

    /// Like [`get`](Self::get) but a missing product is an error.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] when no product has `id`.
    pub async fn require(&self, id: u32) -> Result<Product, CatalogError> {
        self.get(id).await?.ok_or(CatalogError::NotFound { id })
    }

    /// Products whose ids are in `ids`, ordered by id. Unknown ids are skipped.
    ///
    /// # Errors
    /// Query failures and rows that do not fit [`Product`].
    #[instrument(skip(self, ids))]
    pub async fn find_many(
        &self,
        ids: impl IntoIterator<Item = u32>,
    ) -> Result<Vec<Product>, CatalogError> {
        let ids: Vec<i64> = ids.into_iter().map(i64::from).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .db
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product WHERE record::id(id) IN $ids ORDER BY id"
            ))
            .bind(("ids", ids))
            .await
            .context("Loading cart products")?
            .take::<Vec<ProductRow>>(0)
            .context("Decoding cart products")?;
        rows.into_iter().map(Product::try_from).collect()
    }
}
