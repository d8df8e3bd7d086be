use crate::edit::Form;
use crate::filter::Filter;
use crate::ids::TransactionId;
use crate::store::Store;
use crate::summary::{BalanceStyle, Summary};
use crate::{Money, Transaction, TransactionType};

use chrono::Local;

/// Everything a renderer needs to redraw the screen after a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub filter: Filter,
    pub list: ListView,
    pub summary: SummaryView,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty(String),
    Rows(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TransactionId,
    pub description: String,
    pub date: String,
    pub amount: String,
    pub tx_type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub balance_style: BalanceStyle,
}

impl View {
    pub fn build(store: &Store, filter: Filter, form: &Form) -> Self {
        let transactions = store.list(filter);

        let list = if transactions.is_empty() {
            ListView::Empty(filter.empty_message())
        } else {
            ListView::Rows(transactions.into_iter().map(Row::from).collect())
        };

        Self {
            filter,
            list,
            summary: SummaryView::from(&store.summary()),
            submit_label: form.submit_label(),
        }
    }
}

impl From<&Transaction> for Row {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            description: tx.description.clone(),
            date: tx.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            amount: format_signed(tx.tx_type, tx.amount),
            tx_type: tx.tx_type,
        }
    }
}

impl From<&Summary> for SummaryView {
    fn from(summary: &Summary) -> Self {
        Self {
            income: format_currency(summary.income_total),
            expenses: format_currency(summary.expense_total),
            balance: format_currency(summary.net_balance),
            balance_style: summary.balance_style(),
        }
    }
}

/// `$4.50`, or `-$4.50` for negative amounts
pub fn format_currency(amount: Money) -> String {
    let text = amount.to_string();

    match text.strip_prefix('-') {
        Some(digits) => format!("-${digits}"),
        None => format!("${text}"),
    }
}

/// List amount: `+$` for income, `-$` for expenses
pub fn format_signed(tx_type: TransactionType, amount: Money) -> String {
    match tx_type {
        TransactionType::Income => format!("+${amount}"),
        TransactionType::Expense => format!("-${amount}"),
    }
}
