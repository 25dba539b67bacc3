use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entity::{unknown_field, Entity, EntityId, FormDraft, Status};

/// A panel account. The password is held as typed; nothing here
/// authenticates against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub access_level: String,
    pub created_on: String,
    pub password: String,
    pub status: Status,
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub access_level: String,
    pub created_on: String,
    pub password: String,
    pub status: Status,
}

// Keeps passwords out of log output.
impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("access_level", &self.access_level)
            .field("created_on", &self.created_on)
            .field("password", &"***")
            .field("status", &self.status)
            .finish()
    }
}

impl FormDraft for UserDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        match field {
            "first_name" => self.first_name = raw.to_string(),
            "last_name" => self.last_name = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "access_level" => self.access_level = raw.to_string(),
            "created_on" => self.created_on = raw.to_string(),
            "password" => self.password = raw.to_string(),
            "status" => self.status = raw.parse()?,
            _ => return Err(unknown_field(User::KIND, field)),
        }
        Ok(())
    }
}

impl Entity for User {
    type Draft = UserDraft;
    const KIND: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: UserDraft) -> Self {
        User {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            access_level: draft.access_level,
            created_on: draft.created_on,
            password: draft.password,
            status: draft.status,
        }
    }

    fn apply_draft(&mut self, draft: UserDraft) {
        *self = User::from_draft(self.id, draft);
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            access_level: self.access_level.clone(),
            created_on: self.created_on.clone(),
            password: self.password.clone(),
            status: self.status,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }
}
