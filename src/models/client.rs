use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entity::{unknown_field, Entity, EntityId, FormDraft, Status};

/// A customer of the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    /// National id or tax document number.
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_on: String,
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_on: String,
    pub status: Status,
}

impl FormDraft for ClientDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        match field {
            "first_name" => self.first_name = raw.to_string(),
            "last_name" => self.last_name = raw.to_string(),
            "document" => self.document = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "phone" => self.phone = raw.to_string(),
            "address" => self.address = raw.to_string(),
            "created_on" => self.created_on = raw.to_string(),
            "status" => self.status = raw.parse()?,
            _ => return Err(unknown_field(Client::KIND, field)),
        }
        Ok(())
    }
}

impl Entity for Client {
    type Draft = ClientDraft;
    const KIND: &'static str = "client";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ClientDraft) -> Self {
        let mut client = Client {
            id,
            first_name: String::new(),
            last_name: String::new(),
            document: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            created_on: String::new(),
            status: Status::Active,
        };
        client.apply_draft(draft);
        client
    }

    fn apply_draft(&mut self, draft: ClientDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.document = draft.document;
        self.email = draft.email;
        self.phone = draft.phone;
        self.address = draft.address;
        self.created_on = draft.created_on;
        self.status = draft.status;
    }

    fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            document: self.document.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            created_on: self.created_on.clone(),
            status: self.status,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.document.as_str(),
        ]
    }
}
