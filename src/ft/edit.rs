use crate::ids::TransactionId;
use crate::input::{self, ValidInput};
use crate::Result;
use crate::{Transaction, TransactionType};

pub const ADD_LABEL: &str = "Add Transaction";
pub const UPDATE_LABEL: &str = "Update Transaction";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(TransactionId),
}

/// Input form state. Submitting while `Editing` updates the bound transaction instead of adding one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub description: String,
    pub amount: String,
    pub tx_type: Option<TransactionType>,
    mode: EditMode,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the form to an existing transaction, replacing any previous edit target
    pub fn begin_edit(&mut self, tx: &Transaction) {
        if let EditMode::Editing(previous) = &self.mode {
            log::debug!("Replacing edit target {previous} with {}", tx.id);
        }

        self.description = tx.description.clone();
        self.amount = tx.amount.to_input_string();
        self.tx_type = Some(tx.tx_type);
        self.mode = EditMode::Editing(tx.id.clone());
    }

    /// Clears every field and returns to `Idle`
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn editing_id(&self) -> Option<&TransactionId> {
        match &self.mode {
            EditMode::Idle => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self, id: &TransactionId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Idle => ADD_LABEL,
            EditMode::Editing(_) => UPDATE_LABEL,
        }
    }

    pub fn validate(&self) -> Result<ValidInput> {
        input::validate(&self.description, &self.amount, self.tx_type)
    }
}
