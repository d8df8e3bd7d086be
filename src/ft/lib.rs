pub mod edit;
pub mod filter;
pub mod ids;
pub mod input;
mod money;
mod report;
mod result;
pub mod storage;
pub mod store;
pub mod summary;
mod tracker;
mod transaction;
pub mod view;

pub use filter::Filter;
pub use money::{Money, MoneyError};
pub use report::TransactionReport;
pub use result::Result;
pub use store::Store;
pub use summary::{BalanceStyle, Summary};
pub use tracker::{Renderer, Tracker};
pub use transaction::{Transaction, TransactionType};
