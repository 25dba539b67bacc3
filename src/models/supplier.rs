use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entity::{unknown_field, Entity, EntityId, FormDraft, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: Status,
    /// `YYYY-MM-DD`, UTC date of creation.
    pub registered_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierDraft {
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: Status,
}

impl FormDraft for SupplierDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        match field {
            "name" => self.name = raw.to_string(),
            "tax_id" => self.tax_id = raw.to_string(),
            "phone" => self.phone = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "address" => self.address = raw.to_string(),
            "status" => self.status = raw.parse()?,
            _ => return Err(unknown_field(Supplier::KIND, field)),
        }
        Ok(())
    }
}

impl Entity for Supplier {
    type Draft = SupplierDraft;
    const KIND: &'static str = "supplier";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: SupplierDraft) -> Self {
        Supplier {
            id,
            name: draft.name,
            tax_id: draft.tax_id,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            status: draft.status,
            registered_on: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }

    fn apply_draft(&mut self, draft: SupplierDraft) {
        self.name = draft.name;
        self.tax_id = draft.tax_id;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
        self.status = draft.status;
    }

    fn to_draft(&self) -> SupplierDraft {
        SupplierDraft {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            status: self.status,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
