use crate::filter::Filter;
use crate::ids::TransactionId;
use crate::input::ValidInput;
use crate::summary::Summary;
use crate::Transaction;

use std::collections::HashMap;

use chrono::{DateTime, SubsecRound, Utc};

/// Ordered collection of transactions, in insertion order, with an id lookup
#[derive(Debug, Default, Clone)]
pub struct Store {
    history: Vec<Transaction>,
    lookup_map: HashMap<TransactionId, usize>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted records. Later duplicates of an id are dropped.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut store = Self::new();

        for tx in transactions.into_iter() {
            if store.lookup_map.contains_key(&tx.id) {
                log::warn!("Dropping transaction with duplicate id: {tx:?}");
                continue;
            }

            store.lookup_map.insert(tx.id.clone(), store.history.len());
            store.history.push(tx);
        }

        store
    }

    /// Appends a new transaction stamped with the current time
    pub fn add(&mut self, input: ValidInput) -> &Transaction {
        // Millisecond precision so the stored timestamp survives a reload unchanged
        self.add_dated(input, Utc::now().trunc_subsecs(3))
    }

    pub fn add_dated(&mut self, input: ValidInput, date: DateTime<Utc>) -> &Transaction {
        let mut id = TransactionId::generate();
        while self.lookup_map.contains_key(&id) {
            id = TransactionId::generate();
        }

        let index = self.history.len();

        self.history.push(Transaction {
            id: id.clone(),
            description: input.description,
            amount: input.amount,
            tx_type: input.tx_type,
            date,
        });
        self.lookup_map.insert(id, index);

        &self.history[index]
    }

    /// Replaces description, amount and type in place. Returns false when the id is unknown.
    pub fn update(&mut self, id: &TransactionId, input: ValidInput) -> bool {
        let index = match self.lookup_map.get(id) {
            Some(index) => *index,
            None => return false,
        };

        let tx = &mut self.history[index];
        tx.description = input.description;
        tx.amount = input.amount;
        tx.tx_type = input.tx_type;

        true
    }

    /// Removes the transaction. Returns false when the id is unknown.
    pub fn delete(&mut self, id: &TransactionId) -> bool {
        let index = match self.lookup_map.remove(id) {
            Some(index) => index,
            None => return false,
        };

        self.history.remove(index);

        for (idx, tx) in self.history[index..].iter().enumerate() {
            self.lookup_map.insert(tx.id.clone(), index + idx);
        }

        true
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.lookup_map.get(id).map(|index| &self.history[*index])
    }

    /// Matching transactions, most recent first. Equal dates keep their stored order.
    pub fn list(&self, filter: Filter) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self
            .history
            .iter()
            .filter(|tx| filter.matches(tx.tx_type))
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        transactions
    }

    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.history)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
