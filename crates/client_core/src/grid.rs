//! Editable employee grid: the working set, the selection, and reconciliation of
//! remote outcomes.
//!
//! The controller never performs I/O. Operations that need the server return a
//! [`GridRequest`]; whoever runs the request feeds the matching [`GridOutcome`]
//! back through [`GridController::apply`], which yields the notification to show.

use std::collections::{BTreeSet, HashSet};

use shared::{
    domain::{EmployeeField, EmployeeId, EmployeeRecord},
    protocol::{CreateEmployeesRequest, UpdateEmployeesRequest},
};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, GridError},
    notification::Notification,
};

pub const DELETE_CONFIRMATION_PROMPT: &str =
    "Are you sure you want to delete the selected employee(s)?";

pub mod messages {
    pub const LOAD_FAILED: &str = "There was an error fetching the employees!";
    pub const CREATE_SUCCEEDED: &str = "New employees added successfully!";
    pub const CREATE_FAILED: &str = "Error creating new employees!";
    pub const UPDATE_SUCCEEDED: &str = "Existing employees updated successfully!";
    pub const UPDATE_FAILED: &str = "Error updating existing employees!";
    pub const DELETE_ONE_SUCCEEDED: &str = "Employee deleted successfully!";
    pub const DELETE_ONE_FAILED: &str = "Error deleting employee!";
    pub const DELETE_MANY_SUCCEEDED: &str = "Employees deleted successfully!";
    pub const DELETE_MANY_FAILED: &str = "Error deleting employees!";
}

/// Client-side identity of a row, stable across edits and independent of the
/// server id. Unsaved rows are matched back to create responses through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    key: RowKey,
    record: EmployeeRecord,
}

impl GridRow {
    pub fn record(&self) -> &EmployeeRecord {
        &self.record
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    One(EmployeeId),
    Many(Vec<EmployeeId>),
}

impl DeleteTarget {
    fn from_selection(selection: &BTreeSet<EmployeeId>) -> Option<Self> {
        let mut ids: Vec<EmployeeId> = selection.iter().copied().collect();
        match ids.len() {
            0 => None,
            1 => ids.pop().map(DeleteTarget::One),
            _ => Some(DeleteTarget::Many(ids)),
        }
    }

    pub fn ids(&self) -> &[EmployeeId] {
        match self {
            DeleteTarget::One(id) => std::slice::from_ref(id),
            DeleteTarget::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRequest {
    Load,
    Create {
        rows: Vec<RowKey>,
        employees: CreateEmployeesRequest,
    },
    Update {
        employees: UpdateEmployeesRequest,
    },
    Delete(DeleteTarget),
}

impl GridRequest {
    pub fn name(&self) -> &'static str {
        match self {
            GridRequest::Load => "load",
            GridRequest::Create { .. } => "create",
            GridRequest::Update { .. } => "update",
            GridRequest::Delete(DeleteTarget::One(_)) => "delete_one",
            GridRequest::Delete(DeleteTarget::Many(_)) => "delete_many",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridOutcome {
    Loaded(Result<Vec<EmployeeRecord>, ClientError>),
    Created {
        rows: Vec<RowKey>,
        result: Result<Vec<EmployeeRecord>, ClientError>,
    },
    Updated(Result<(), ClientError>),
    Deleted {
        target: DeleteTarget,
        result: Result<(), ClientError>,
    },
}

/// A confirmed-or-declined delete waiting on the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    target: DeleteTarget,
}

impl PendingDelete {
    pub fn prompt(&self) -> &'static str {
        DELETE_CONFIRMATION_PROMPT
    }

    pub fn ids(&self) -> &[EmployeeId] {
        self.target.ids()
    }
}

/// Yes/no answer to the delete prompt.
pub trait ConfirmDelete {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> ConfirmDelete for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct InFlight {
    load: bool,
    create: bool,
    update: bool,
    delete: bool,
}

#[derive(Debug, Default)]
pub struct GridController {
    rows: Vec<GridRow>,
    selection: BTreeSet<EmployeeId>,
    next_key: u64,
    in_flight: InFlight,
}

impl GridController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.rows.iter().map(GridRow::record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selection(&self) -> &BTreeSet<EmployeeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: EmployeeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.create || self.in_flight.update
    }

    pub fn is_deleting(&self) -> bool {
        self.in_flight.delete
    }

    fn next_row_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn push_record(&mut self, record: EmployeeRecord) -> RowKey {
        let key = self.next_row_key();
        self.rows.push(GridRow { key, record });
        key
    }

    fn persisted_ids(&self) -> BTreeSet<EmployeeId> {
        self.records().filter_map(|record| record.id).collect()
    }

    pub fn load(&mut self) -> Result<GridRequest, GridError> {
        if self.in_flight.load {
            return Err(GridError::LoadInFlight);
        }
        self.in_flight.load = true;
        Ok(GridRequest::Load)
    }

    pub fn add_row(&mut self) -> RowKey {
        self.push_record(EmployeeRecord::unsaved())
    }

    pub fn edit_field(
        &mut self,
        index: usize,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> Result<(), GridError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(GridError::RowOutOfRange { index, len })?;
        row.record = row.record.with_field(field, value);
        Ok(())
    }

    pub fn toggle_selection(&mut self, id: EmployeeId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// True when every persisted row is selected and there is at least one.
    pub fn all_selected(&self) -> bool {
        let persisted = self.persisted_ids();
        !persisted.is_empty() && persisted.is_subset(&self.selection)
    }

    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            self.selection.clear();
        } else {
            self.selection = self.persisted_ids();
        }
    }

    /// Splits the working set into a create request for unsaved rows and an
    /// update request for persisted rows. Empty partitions produce no request.
    pub fn save(&mut self) -> Result<Vec<GridRequest>, GridError> {
        if self.is_saving() {
            return Err(GridError::SaveInFlight);
        }

        let mut created_rows = Vec::new();
        let mut to_create = CreateEmployeesRequest::new();
        let mut to_update = UpdateEmployeesRequest::new();
        for row in &self.rows {
            match row.record.id {
                None => {
                    created_rows.push(row.key);
                    to_create.push(row.record.fields());
                }
                Some(id) => {
                    to_update.insert(id, row.record.fields());
                }
            }
        }

        let mut requests = Vec::new();
        if !to_create.is_empty() {
            self.in_flight.create = true;
            requests.push(GridRequest::Create {
                rows: created_rows,
                employees: to_create,
            });
        }
        if !to_update.is_empty() {
            self.in_flight.update = true;
            requests.push(GridRequest::Update {
                employees: to_update,
            });
        }
        debug!(requests = requests.len(), "save planned");
        Ok(requests)
    }

    /// First half of a delete: returns what would be deleted, or `None` when
    /// nothing is selected.
    pub fn begin_delete(&self) -> Result<Option<PendingDelete>, GridError> {
        if self.in_flight.delete {
            return Err(GridError::DeleteInFlight);
        }
        Ok(DeleteTarget::from_selection(&self.selection).map(|target| PendingDelete { target }))
    }

    /// Second half of a delete, once the user has answered the prompt.
    pub fn resolve_delete(
        &mut self,
        pending: PendingDelete,
        confirmed: bool,
    ) -> Option<GridRequest> {
        if !confirmed {
            debug!("delete declined");
            return None;
        }
        if self.in_flight.delete {
            warn!("delete confirmed while another delete is in flight; ignoring");
            return None;
        }
        self.in_flight.delete = true;
        Some(GridRequest::Delete(pending.target))
    }

    pub fn delete_with(
        &mut self,
        confirm: &mut impl ConfirmDelete,
    ) -> Result<Option<GridRequest>, GridError> {
        let Some(pending) = self.begin_delete()? else {
            return Ok(None);
        };
        let confirmed = confirm.confirm(pending.prompt());
        Ok(self.resolve_delete(pending, confirmed))
    }

    /// Folds a remote outcome into the grid and returns the notification to show.
    pub fn apply(&mut self, outcome: GridOutcome) -> Option<Notification> {
        match outcome {
            GridOutcome::Loaded(result) => {
                self.in_flight.load = false;
                match result {
                    Ok(records) => {
                        info!(count = records.len(), "employees loaded");
                        self.replace_rows(records);
                        None
                    }
                    Err(err) => {
                        warn!("failed to load employees: {err}");
                        Some(Notification::error(messages::LOAD_FAILED))
                    }
                }
            }
            GridOutcome::Created { rows, result } => {
                self.in_flight.create = false;
                match result {
                    Ok(created) => {
                        info!(count = created.len(), "employees created");
                        self.merge_created(&rows, created);
                        Some(Notification::success(messages::CREATE_SUCCEEDED))
                    }
                    Err(err) => {
                        warn!("failed to create employees: {err}");
                        Some(Notification::error(messages::CREATE_FAILED))
                    }
                }
            }
            GridOutcome::Updated(result) => {
                self.in_flight.update = false;
                match result {
                    Ok(()) => {
                        info!("employees updated");
                        Some(Notification::success(messages::UPDATE_SUCCEEDED))
                    }
                    Err(err) => {
                        warn!("failed to update employees: {err}");
                        Some(Notification::error(messages::UPDATE_FAILED))
                    }
                }
            }
            GridOutcome::Deleted { target, result } => {
                self.in_flight.delete = false;
                let (succeeded, failed) = match &target {
                    DeleteTarget::One(_) => {
                        (messages::DELETE_ONE_SUCCEEDED, messages::DELETE_ONE_FAILED)
                    }
                    DeleteTarget::Many(_) => (
                        messages::DELETE_MANY_SUCCEEDED,
                        messages::DELETE_MANY_FAILED,
                    ),
                };
                match result {
                    Ok(()) => {
                        info!(count = target.ids().len(), "employees deleted");
                        self.remove_deleted(target.ids());
                        Some(Notification::success(succeeded))
                    }
                    Err(err) => {
                        warn!("failed to delete employees: {err}");
                        Some(Notification::error(failed))
                    }
                }
            }
        }
    }

    fn replace_rows(&mut self, records: Vec<EmployeeRecord>) {
        self.rows.clear();
        for record in records {
            self.push_record(record);
        }
        let present = self.persisted_ids();
        self.selection.retain(|id| present.contains(id));
    }

    fn merge_created(&mut self, submitted: &[RowKey], created: Vec<EmployeeRecord>) {
        let submitted: HashSet<RowKey> = submitted.iter().copied().collect();
        self.rows.retain(|row| !submitted.contains(&row.key));

        let mut present = self.persisted_ids();
        for record in created {
            if let Some(id) = record.id {
                if !present.insert(id) {
                    warn!(%id, "create response repeated an existing id; keeping the existing row");
                    continue;
                }
            }
            self.push_record(record);
        }
    }

    fn remove_deleted(&mut self, ids: &[EmployeeId]) {
        let deleted: HashSet<EmployeeId> = ids.iter().copied().collect();
        self.rows
            .retain(|row| row.record.id.map_or(true, |id| !deleted.contains(&id)));
        self.selection.clear();
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
