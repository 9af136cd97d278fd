//! The page container: owns the authoritative list of cats and sequences
//! every mutation with a full refetch.
//!
//! # Design
//! `Roster` never performs I/O. Each action returns the `HttpRequest` to send
//! and the host feeds the outcome back through `on_response`, which may hand
//! out one more request (the refetch that follows a successful mutation).
//! Only one such chain is in flight at a time. The list is only ever replaced
//! wholesale from a list response, so it always mirrors what the backend
//! last reported.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::SpyCatClient;
use crate::error::ApiError;
use crate::form::{CatForm, SalaryEdit};
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::salary::format_salary;
use crate::types::{Cat, CatId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("another request is still in flight")]
    Busy,

    #[error("the create form is not open")]
    NoCreateForm,

    #[error("no salary is being edited")]
    NotEditing,

    #[error("no spy cat with id {0}")]
    UnknownCat(CatId),

    #[error("spy cat {0} is being edited")]
    RowLocked(CatId),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update(CatId),
    Delete(CatId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Load,
    Create,
    Update(CatId),
    Delete(CatId),
    Refresh(Mutation),
}

#[derive(Debug)]
pub struct Roster {
    client: SpyCatClient,
    cats: Vec<Cat>,
    loading: bool,
    load_error: Option<String>,
    create_form: Option<CatForm>,
    editing: Option<SalaryEdit>,
    deleting: Option<CatId>,
    delete_error: Option<String>,
    pending: Option<Pending>,
}

impl Roster {
    pub fn new(client: SpyCatClient) -> Self {
        Self {
            client,
            cats: Vec::new(),
            loading: false,
            load_error: None,
            create_form: None,
            editing: None,
            deleting: None,
            delete_error: None,
            pending: None,
        }
    }

    pub fn client(&self) -> &SpyCatClient {
        &self.client
    }

    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The page-level load error. Hidden while a load is running.
    pub fn error_banner(&self) -> Option<&str> {
        if self.loading {
            return None;
        }
        self.load_error.as_deref()
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    pub fn create_form(&self) -> Option<&CatForm> {
        self.create_form.as_ref()
    }

    pub fn editing(&self) -> Option<&SalaryEdit> {
        self.editing.as_ref()
    }

    pub fn deleting(&self) -> Option<CatId> {
        self.deleting
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Fetch the whole list. Also serves as the manual retry.
    pub fn load(&mut self) -> Result<HttpRequest, RosterError> {
        self.ensure_idle()?;
        self.loading = true;
        self.load_error = None;
        self.delete_error = None;
        self.pending = Some(Pending::Load);
        Ok(self.client.build_list_cats())
    }

    /// Show the create form, keeping any values already entered.
    pub fn open_create_form(&mut self) -> &mut CatForm {
        self.create_form.get_or_insert_with(CatForm::default)
    }

    pub fn close_create_form(&mut self) -> Result<(), RosterError> {
        if self.create_form.as_ref().is_some_and(CatForm::is_submitting) {
            return Err(RosterError::Busy);
        }
        self.create_form = None;
        Ok(())
    }

    /// The open create form, unless it is closed or being submitted.
    pub fn create_form_mut(&mut self) -> Option<&mut CatForm> {
        self.create_form.as_mut().filter(|form| !form.submitting)
    }

    pub fn submit_create(&mut self) -> Result<HttpRequest, RosterError> {
        self.ensure_idle()?;
        let form = self.create_form.as_mut().ok_or(RosterError::NoCreateForm)?;
        form.error = None;
        if let Err(msg) = form.validate() {
            form.error = Some(msg.clone());
            return Err(RosterError::Invalid(msg));
        }
        let request = self.client.build_create_cat(&form.to_create())?;
        form.submitting = true;
        self.pending = Some(Pending::Create);
        Ok(request)
    }

    /// Put one row into salary edit mode.
    pub fn start_edit(&mut self, id: CatId) -> Result<&mut SalaryEdit, RosterError> {
        self.ensure_idle()?;
        if self.deleting.is_some() {
            return Err(RosterError::Busy);
        }
        let cat = self.find(id)?;
        let edit = SalaryEdit::for_cat(cat);
        Ok(self.editing.insert(edit))
    }

    /// The salary editor, unless nothing is edited or it is being saved.
    pub fn edit_mut(&mut self) -> Option<&mut SalaryEdit> {
        self.editing.as_mut().filter(|edit| !edit.saving)
    }

    pub fn cancel_edit(&mut self) -> Result<(), RosterError> {
        let edit = self.editing.as_ref().ok_or(RosterError::NotEditing)?;
        if edit.saving {
            return Err(RosterError::Busy);
        }
        self.editing = None;
        Ok(())
    }

    pub fn save_edit(&mut self) -> Result<HttpRequest, RosterError> {
        self.ensure_idle()?;
        let edit = self.editing.as_mut().ok_or(RosterError::NotEditing)?;
        edit.error = None;
        if let Err(msg) = edit.validate() {
            edit.error = Some(msg.clone());
            return Err(RosterError::Invalid(msg));
        }
        let id = edit.id();
        let request = self.client.build_update_cat(id, &edit.to_update())?;
        edit.saving = true;
        self.pending = Some(Pending::Update(id));
        Ok(request)
    }

    /// Delete a row once `confirm` agrees. Returns `None` when declined.
    pub fn delete<F>(&mut self, id: CatId, confirm: F) -> Result<Option<HttpRequest>, RosterError>
    where
        F: FnOnce(&Cat) -> bool,
    {
        self.ensure_idle()?;
        if self.deleting.is_some() {
            return Err(RosterError::Busy);
        }
        if self.editing.as_ref().is_some_and(|edit| edit.id() == id) {
            return Err(RosterError::RowLocked(id));
        }
        let cat = self.find(id)?;
        if !confirm(cat) {
            debug!(%id, "delete declined");
            return Ok(None);
        }
        self.deleting = Some(id);
        self.delete_error = None;
        self.pending = Some(Pending::Delete(id));
        Ok(Some(self.client.build_delete_cat(id)))
    }

    // -----------------------------------------------------------------------
    // Responses
    // -----------------------------------------------------------------------

    /// Apply the outcome of the in-flight request. Returns the follow-up
    /// request to send, if any.
    pub fn on_response(&mut self, result: Result<HttpResponse, TransportError>) -> Option<HttpRequest> {
        let Some(pending) = self.pending.take() else {
            warn!("response received with no request in flight");
            return None;
        };
        let result = self.client.interpret(result);
        match pending {
            Pending::Load => {
                self.apply_list(result);
                None
            }
            Pending::Refresh(mutation) => {
                self.apply_list(result);
                self.finish(mutation);
                None
            }
            Pending::Create => match result.and_then(|r| self.client.parse_create_cat(r)) {
                Ok(cat) => {
                    info!(id = %cat.id, name = %cat.name, "spy cat created");
                    self.refetch(Mutation::Create)
                }
                Err(e) => {
                    warn!(error = %e, "create failed");
                    if let Some(form) = self.create_form.as_mut() {
                        form.submitting = false;
                        form.error = Some(e.to_string());
                    }
                    None
                }
            },
            Pending::Update(id) => match result.and_then(|r| self.client.parse_update_cat(r)) {
                Ok(cat) => {
                    info!(%id, salary = %cat.salary, "salary updated");
                    self.refetch(Mutation::Update(id))
                }
                Err(e) => {
                    warn!(%id, error = %e, "salary update failed");
                    if let Some(edit) = self.editing.as_mut() {
                        edit.saving = false;
                        edit.error = Some(e.to_string());
                    }
                    None
                }
            },
            Pending::Delete(id) => match result.and_then(|r| self.client.parse_delete_cat(r)) {
                Ok(()) => {
                    info!(%id, "spy cat deleted");
                    self.refetch(Mutation::Delete(id))
                }
                Err(e) => {
                    warn!(%id, error = %e, "delete failed");
                    self.deleting = None;
                    self.delete_error = Some(e.to_string());
                    None
                }
            },
        }
    }

    /// Send `request` and every follow-up through `transport`.
    pub fn run<T: Transport>(&mut self, transport: &T, request: HttpRequest) {
        let mut next = Some(request);
        while let Some(request) = next {
            debug!(method = request.method.as_str(), path = %request.path, "sending request");
            next = self.on_response(transport.execute(request));
        }
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    pub fn view(&self) -> ListView<'_> {
        if self.cats.is_empty() {
            return if self.loading { ListView::Loading } else { ListView::Empty };
        }
        let rows = self
            .cats
            .iter()
            .map(|cat| {
                let edit = self.editing.as_ref().filter(|edit| edit.id() == cat.id);
                let (salary, actions) = match edit {
                    Some(edit) => (SalaryCell::Editing(edit), RowActions::Editing),
                    None => (
                        SalaryCell::Display(format_salary(cat.salary)),
                        RowActions::Available {
                            edit_enabled: self.deleting.is_none(),
                            delete_enabled: self.deleting.is_none(),
                            deleting: self.deleting == Some(cat.id),
                        },
                    ),
                };
                RowView {
                    cat,
                    experience: format!("{} years", cat.experience),
                    salary,
                    actions,
                }
            })
            .collect();
        ListView::Rows(rows)
    }

    fn ensure_idle(&self) -> Result<(), RosterError> {
        match self.pending {
            Some(_) => Err(RosterError::Busy),
            None => Ok(()),
        }
    }

    fn find(&self, id: CatId) -> Result<&Cat, RosterError> {
        self.cats
            .iter()
            .find(|cat| cat.id == id)
            .ok_or(RosterError::UnknownCat(id))
    }

    fn refetch(&mut self, mutation: Mutation) -> Option<HttpRequest> {
        self.loading = true;
        self.load_error = None;
        self.delete_error = None;
        self.pending = Some(Pending::Refresh(mutation));
        Some(self.client.build_list_cats())
    }

    fn apply_list(&mut self, result: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match result.and_then(|r| self.client.parse_list_cats(r)) {
            Ok(cats) => {
                debug!(count = cats.len(), "roster replaced");
                self.cats = cats;
            }
            Err(e) => {
                warn!(error = %e, "failed to load spy cats");
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn finish(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Create => self.create_form = None,
            Mutation::Update(_) => self.editing = None,
            Mutation::Delete(_) => self.deleting = None,
        }
    }
}

/// What the list area shows.
#[derive(Debug)]
pub enum ListView<'a> {
    /// Loading with nothing to show yet.
    Loading,
    Empty,
    Rows(Vec<RowView<'a>>),
}

#[derive(Debug)]
pub struct RowView<'a> {
    pub cat: &'a Cat,
    pub experience: String,
    pub salary: SalaryCell<'a>,
    pub actions: RowActions,
}

#[derive(Debug, PartialEq)]
pub enum SalaryCell<'a> {
    Display(String),
    Editing(&'a SalaryEdit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActions {
    /// The row is in salary edit mode; its buttons are replaced.
    Editing,
    Available {
        edit_enabled: bool,
        delete_enabled: bool,
        /// This row is the one being deleted.
        deleting: bool,
    },
}
