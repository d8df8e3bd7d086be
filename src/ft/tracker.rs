use crate::edit::Form;
use crate::filter::Filter;
use crate::ids::TransactionId;
use crate::input::ValidInput;
use crate::storage::{self, Storage};
use crate::store::Store;
use crate::summary::Summary;
use crate::view::View;
use crate::Result;
use crate::Transaction;

/// Observer invoked with a fresh view after every change the user should see
pub trait Renderer {
    fn render(&mut self, view: &View);
}

/// Owns the transaction store, the input form and the current filter, and keeps storage and the
/// renderer in sync with them
pub struct Tracker<S: Storage, R: Renderer> {
    store: Store,
    form: Form,
    filter: Filter,
    storage: S,
    renderer: R,
}

impl<S: Storage, R: Renderer> Tracker<S, R> {
    /// Loads persisted transactions and draws the initial view
    pub fn open(storage: S, renderer: R) -> Result<Self> {
        let transactions = storage::load_transactions(&storage)?;

        let mut tracker = Self {
            store: Store::from_transactions(transactions),
            form: Form::new(),
            filter: Filter::All,
            storage,
            renderer,
        };

        tracker.render();

        Ok(tracker)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Validates the form, then adds a transaction or updates the one being edited.
    /// Returns the added or updated transaction, or `None` when the edit target no longer exists.
    pub fn submit(&mut self) -> Result<Option<Transaction>> {
        let input = self.form.validate()?;

        let result = match self.form.editing_id().cloned() {
            Some(id) => {
                self.form.reset();
                if self.store.get(&id).is_none() {
                    // Nothing to persist, but the form left edit mode
                    self.render();
                }
                self.update(&id, input)?;
                self.store.get(&id).cloned()
            }
            None => {
                self.form.reset();
                Some(self.add(input)?)
            }
        };

        Ok(result)
    }

    pub fn add(&mut self, input: ValidInput) -> Result<Transaction> {
        let tx = self.store.add(input).clone();
        log::debug!("Added transaction: {tx:?}");

        self.commit()?;

        Ok(tx)
    }

    /// Adds every input, persisting once at the end. Returns the number added.
    pub fn add_many(&mut self, inputs: Vec<ValidInput>) -> Result<usize> {
        let count = inputs.len();

        for input in inputs.into_iter() {
            let tx = self.store.add(input);
            log::debug!("Added transaction: {tx:?}");
        }

        if count > 0 {
            self.commit()?;
        }

        Ok(count)
    }

    /// Unknown ids are ignored
    pub fn update(&mut self, id: &TransactionId, input: ValidInput) -> Result {
        if !self.store.update(id, input) {
            log::debug!("Update ignored, no transaction with id {id}");
            return Ok(());
        }

        log::debug!("Updated transaction: {:?}", self.store.get(id));

        self.commit()
    }

    /// Unknown ids are ignored. Deleting the transaction being edited resets the form.
    pub fn delete(&mut self, id: &TransactionId) -> Result {
        if !self.store.delete(id) {
            log::debug!("Delete ignored, no transaction with id {id}");
            return Ok(());
        }

        log::debug!("Deleted transaction {id}");

        if self.form.is_editing(id) {
            log::debug!("Deleted transaction was being edited, resetting form");
            self.form.reset();
        }

        self.commit()
    }

    /// Deletes only if `confirm` agrees. Returns whether the delete was applied.
    pub fn request_delete(&mut self, id: &TransactionId, confirm: impl FnOnce() -> bool) -> Result<bool> {
        if !confirm() {
            log::debug!("Delete of {id} cancelled");
            return Ok(false);
        }

        self.delete(id)?;

        Ok(true)
    }

    /// Binds the form to an existing transaction. Returns false when the id is unknown.
    pub fn edit(&mut self, id: &TransactionId) -> bool {
        match self.store.get(id) {
            Some(tx) => {
                self.form.begin_edit(tx);
                log::debug!("Editing transaction {id}");
                true
            }
            None => false,
        }
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.render();
    }

    pub fn list(&self) -> Vec<&Transaction> {
        self.store.list(self.filter)
    }

    pub fn summary(&self) -> Summary {
        self.store.summary()
    }

    pub fn view(&self) -> View {
        View::build(&self.store, self.filter, &self.form)
    }

    pub fn render(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }

    /// Persists the whole collection, then redraws. A failed write is logged and returned after
    /// redrawing; the in-memory change stays and is written with the next successful commit.
    fn commit(&mut self) -> Result {
        let saved = storage::save_transactions(&mut self.storage, self.store.transactions());

        if let Err(e) = &saved {
            log::error!("{e:#}");
        }

        self.render();

        saved
    }
}
