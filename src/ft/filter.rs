use crate::TransactionType;

use std::fmt;

/// Which transactions the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub fn parse(string: &str) -> Option<Self> {
        match string.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn matches(&self, tx_type: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => tx_type == TransactionType::Income,
            Self::Expense => tx_type == TransactionType::Expense,
        }
    }

    /// Wording shown in place of the list when nothing matches
    pub fn empty_message(&self) -> String {
        match self {
            Self::All => "No transactions found.".to_string(),
            Self::Income | Self::Expense => format!("No {self} transactions found."),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        };

        write!(f, "{name}")
    }
}
