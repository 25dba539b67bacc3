use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entity::{unknown_field, Entity, EntityId, FormDraft, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub status: Status,
}

impl FormDraft for CategoryDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        match field {
            "name" => self.name = raw.to_string(),
            "description" => self.description = raw.to_string(),
            "status" => self.status = raw.parse()?,
            _ => return Err(unknown_field(Category::KIND, field)),
        }
        Ok(())
    }
}

impl Entity for Category {
    type Draft = CategoryDraft;
    const KIND: &'static str = "category";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: CategoryDraft) -> Self {
        Category {
            id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
        }
    }

    fn apply_draft(&mut self, draft: CategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.status = draft.status;
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
