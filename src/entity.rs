//! Record abstraction shared by every entity list.
//!
//! A record type names its draft (the editable form values), how a draft
//! becomes a record, and which text fields the search box looks at. The
//! generic [`EntityList`](crate::entity_list::EntityList) does the rest.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

pub type EntityId = u64;

/// A record held by an entity list.
pub trait Entity: Clone {
    /// Form values for creating or editing the record, without the id.
    type Draft: FormDraft + Clone + Default + std::fmt::Debug;

    /// Singular, human-readable name used in prompts and log lines.
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Replaces every draft-backed field. The id and any system stamps stay.
    fn apply_draft(&mut self, draft: Self::Draft);

    fn to_draft(&self) -> Self::Draft;

    fn searchable_fields(&self) -> Vec<&str>;

    /// Hook for rejecting a draft before create/update. Accepts everything by
    /// default.
    fn validate(_draft: &Self::Draft) -> Result<(), AppResponse> {
        Ok(())
    }
}

/// Raw form binding: one input name, one input value.
pub trait FormDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse>;
}

/// Active/inactive flag carried by every record type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Activo", alias = "activo")]
    Active,
    #[serde(rename = "Inactivo", alias = "inactivo")]
    Inactive,
}

impl FromStr for Status {
    type Err = AppResponse;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "activo" | "active" => Ok(Status::Active),
            "inactivo" | "inactive" => Ok(Status::Inactive),
            other => Err(AppResponse::ValidationError(format!(
                "Unknown status '{other}'"
            ))),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "Activo"),
            Status::Inactive => write!(f, "Inactivo"),
        }
    }
}

/// Numeric coercion for form inputs. Blank input reads as zero.
pub fn coerce_number<T>(field: &str, raw: &str) -> Result<T, AppResponse>
where
    T: FromStr + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse::<T>().map_err(|_| {
        AppResponse::ValidationError(format!("Field '{field}' expects a number, got '{raw}'"))
    })
}

pub(crate) fn unknown_field(kind: &str, field: &str) -> AppResponse {
    AppResponse::BadRequest(format!("{kind} has no field named '{field}'"))
}

/// Case-insensitive substring match over a record's searchable fields.
/// `needle` must already be lowercase.
pub(crate) fn matches_query<E: Entity>(record: &E, needle: &str) -> bool {
    needle.is_empty()
        || record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
