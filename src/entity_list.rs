//! Generic list controller: filter, create, edit, and confirmed delete over
//! one in-memory collection.
//!
//! Nothing here is persisted. Dropping the list drops its records.

use log::{debug, info};

use crate::app_response::AppResponse;
use crate::entity::{matches_query, Entity, EntityId, FormDraft};

/// Which way the modal form is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Creating,
    Editing(EntityId),
}

/// Confirmation prompt returned by [`EntityList::request_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub id: EntityId,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct EntityList<E: Entity> {
    records: Vec<E>,
    draft: E::Draft,
    mode: FormMode,
    pending_delete: Option<EntityId>,
}

impl<E: Entity> Default for EntityList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityList<E> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            draft: E::Draft::default(),
            mode: FormMode::Closed,
            pending_delete: None,
        }
    }

    /// Builds a list over existing records. Ids are taken as given.
    pub fn from_records(records: Vec<E>) -> Self {
        Self {
            records,
            ..Self::new()
        }
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Max-plus-one over the current ids, or 1 when empty. Fails once the
    /// largest id is `EntityId::MAX`.
    pub fn next_id(&self) -> Result<EntityId, AppResponse> {
        match self.records.iter().map(Entity::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                AppResponse::ValidationError(format!("No {} ids left after {max}", E::KIND))
            }),
        }
    }

    /// Records whose searchable fields contain `query`, ignoring case, in
    /// collection order.
    pub fn filter(&self, query: &str) -> Vec<&E> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| matches_query(*r, &needle))
            .collect()
    }

    pub fn create(&mut self, draft: E::Draft) -> Result<&E, AppResponse> {
        E::validate(&draft)?;
        let id = self.next_id()?;
        self.records.push(E::from_draft(id, draft));
        info!("Created {} {id}", E::KIND);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Replaces the draft fields of record `id`. `Ok(None)` when there is no
    /// such record; the collection is left untouched.
    pub fn update(&mut self, id: EntityId, draft: E::Draft) -> Result<Option<&E>, AppResponse> {
        E::validate(&draft)?;
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply_draft(draft);
                info!("Updated {} {id}", E::KIND);
                Ok(Some(&*record))
            }
            None => {
                debug!("Update ignored, no {} with id {id}", E::KIND);
                Ok(None)
            }
        }
    }

    /// Removes record `id` immediately. Returns whether anything was removed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        let removed = self.records.len() != before;
        if removed {
            info!("Deleted {} {id}", E::KIND);
        }
        removed
    }

    /// First half of a delete: remembers `id` and returns the prompt to show.
    /// `None` when the record does not exist.
    pub fn request_delete(&mut self, id: EntityId) -> Option<DeletePrompt> {
        self.get(id)?;
        self.pending_delete = Some(id);
        Some(DeletePrompt {
            id,
            message: format!("Delete this {}?", E::KIND),
        })
    }

    /// Second half of a delete. Only removes `id` if it is the pending request.
    pub fn confirm_delete(&mut self, id: EntityId) -> bool {
        if self.pending_delete != Some(id) {
            debug!("Delete of {} {id} was not requested", E::KIND);
            return false;
        }
        self.pending_delete = None;
        self.remove(id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    // Form handling

    pub fn form_mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Draft {
        &mut self.draft
    }

    pub fn open_create_form(&mut self) {
        self.draft = E::Draft::default();
        self.mode = FormMode::Creating;
    }

    /// Loads record `id` into the draft. `false` when there is no such record.
    pub fn open_edit_form(&mut self, id: EntityId) -> bool {
        let Some(draft) = self.get(id).map(Entity::to_draft) else {
            return false;
        };
        self.draft = draft;
        self.mode = FormMode::Editing(id);
        true
    }

    pub fn set_draft_field(&mut self, field: &str, raw: &str) -> Result<(), AppResponse> {
        self.draft.set_field(field, raw)
    }

    /// Commits the draft. Returns the id of the created or edited record, or
    /// `None` when the edited record vanished meanwhile. The form stays open
    /// if the draft is rejected.
    pub fn submit_form(&mut self) -> Result<Option<EntityId>, AppResponse> {
        let draft = self.draft.clone();
        let outcome = match self.mode {
            FormMode::Closed => {
                return Err(AppResponse::BadRequest(format!(
                    "No {} form is open",
                    E::KIND
                )))
            }
            FormMode::Creating => Some(self.create(draft)?.id()),
            FormMode::Editing(id) => self.update(id, draft)?.map(Entity::id),
        };
        self.cancel_form();
        Ok(outcome)
    }

    pub fn cancel_form(&mut self) {
        self.draft = E::Draft::default();
        self.mode = FormMode::Closed;
    }
}
