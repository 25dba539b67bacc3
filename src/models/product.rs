//! Catalog products.
//!
//! Numeric form inputs go through [`coerce_number`], so a blank price reads as
//! zero and non-numeric text is rejected instead of being stored.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entity::{coerce_number, unknown_field, Entity, EntityId, FormDraft, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub category_id: EntityId,
    pub supplier_id: EntityId,
    pub barcode: String,
    pub name: String,
    pub description: String,
    /// Units per purchase package.
    pub conversion_factor: f64,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub image: String,
    pub status: Status,
    /// RFC 3339 UTC timestamp, set once on creation.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub category_id: EntityId,
    pub supplier_id: EntityId,
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub conversion_factor: f64,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub image: String,
    pub status: Status,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            category_id: 1,
            supplier_id: 1,
            barcode: String::new(),
            name: String::new(),
            description: String::new(),
            conversion_factor: 1.0,
            purchase_price: 0.0,
            sale_price: 0.0,
            stock: 0,
            min_stock: 0,
            image: String::new(),
            status: Status::Active,
        }
    }
}

impl FormDraft for ProductDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        match field {
            "category_id" => self.category_id = coerce_number(field, raw)?,
            "supplier_id" => self.supplier_id = coerce_number(field, raw)?,
            "barcode" => self.barcode = raw.to_string(),
            "name" => self.name = raw.to_string(),
            "description" => self.description = raw.to_string(),
            "conversion_factor" => self.conversion_factor = coerce_number(field, raw)?,
            "purchase_price" => self.purchase_price = coerce_number(field, raw)?,
            "sale_price" => self.sale_price = coerce_number(field, raw)?,
            "stock" => self.stock = coerce_number(field, raw)?,
            "min_stock" => self.min_stock = coerce_number(field, raw)?,
            "image" => self.image = raw.to_string(),
            "status" => self.status = raw.parse()?,
            _ => return Err(unknown_field(Product::KIND, field)),
        }
        Ok(())
    }
}

impl Product {
    pub fn is_below_min_stock(&self) -> bool {
        self.stock < self.min_stock
    }
}

impl Entity for Product {
    type Draft = ProductDraft;
    const KIND: &'static str = "product";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ProductDraft) -> Self {
        Product {
            id,
            category_id: draft.category_id,
            supplier_id: draft.supplier_id,
            barcode: draft.barcode,
            name: draft.name,
            description: draft.description,
            conversion_factor: draft.conversion_factor,
            purchase_price: draft.purchase_price,
            sale_price: draft.sale_price,
            stock: draft.stock,
            min_stock: draft.min_stock,
            image: draft.image,
            status: draft.status,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn apply_draft(&mut self, draft: ProductDraft) {
        let created_at = std::mem::take(&mut self.created_at);
        *self = Product {
            created_at,
            ..Product::from_draft(self.id, draft)
        };
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            conversion_factor: self.conversion_factor,
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            stock: self.stock,
            min_stock: self.min_stock,
            image: self.image.clone(),
            status: self.status,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
