use crate::{Money, Transaction, TransactionType};

/// Running totals over the whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub income_total: Money,
    pub expense_total: Money,
    pub net_balance: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStyle {
    Positive,
    Negative,
}

impl Summary {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut income_total = Money::ZERO;
        let mut expense_total = Money::ZERO;

        // each amount fits in i64, so i128 totals cannot overflow
        for tx in transactions {
            match tx.tx_type {
                TransactionType::Income => income_total = income_total + tx.amount,
                TransactionType::Expense => expense_total = expense_total + tx.amount,
            }
        }

        Self {
            income_total,
            expense_total,
            net_balance: income_total - expense_total,
        }
    }

    pub fn balance_style(&self) -> BalanceStyle {
        if self.net_balance.is_negative() {
            BalanceStyle::Negative
        } else {
            BalanceStyle::Positive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ids::TransactionId;

    use chrono::Utc;

    fn build_transaction(amount: Money, tx_type: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            description: "Something".to_string(),
            amount,
            tx_type,
            date: Utc::now(),
        }
    }

    #[test]
    fn empty() {
        let summary = Summary::from_transactions(&Vec::<Transaction>::new());

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.balance_style(), BalanceStyle::Positive);
    }

    #[test]
    fn totals() {
        let transactions = vec![
            build_transaction(Money(45000), TransactionType::Expense),
            build_transaction(Money(20_000_000), TransactionType::Income),
            build_transaction(Money(5000), TransactionType::Expense),
        ];

        let summary = Summary::from_transactions(&transactions);

        assert_eq!(summary.income_total, Money(20_000_000));
        assert_eq!(summary.expense_total, Money(50000));
        assert_eq!(summary.net_balance, Money(19_950_000));
        assert_eq!(summary.balance_style(), BalanceStyle::Positive);
    }

    #[test]
    fn negative_balance() {
        let transactions = vec![
            build_transaction(Money(10000), TransactionType::Income),
            build_transaction(Money(60000), TransactionType::Expense),
        ];

        let summary = Summary::from_transactions(&transactions);

        assert_eq!(summary.net_balance, Money(-50000));
        assert_eq!(summary.balance_style(), BalanceStyle::Negative);
    }

    #[test]
    fn largest_amounts_sum_without_overflow() {
        let transactions = vec![
            build_transaction(Money::MAX_AMOUNT, TransactionType::Income),
            build_transaction(Money::MAX_AMOUNT, TransactionType::Income),
            build_transaction(Money::MAX_AMOUNT, TransactionType::Expense),
        ];

        let summary = Summary::from_transactions(&transactions);

        assert_eq!(summary.income_total.0, 2 * (i64::MAX as i128));
        assert_eq!(summary.net_balance, Money::MAX_AMOUNT);
    }
}
