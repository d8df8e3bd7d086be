use ft::{Result, Transaction, TransactionReport};

use csv::Writer;

pub fn build_csv_writer() -> Writer<Vec<u8>> {
    Writer::from_writer(vec![])
}

pub fn write_to_string(writer: Writer<Vec<u8>>) -> Result<String> {
    let utf8 = writer.into_inner()?;
    let string = String::from_utf8(utf8)?;

    Ok(string)
}

/// Serializes transactions as csv with header `id,date,type,description,amount`
pub fn export_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<String> {
    let mut wtr = build_csv_writer();

    log::debug!("Serializing reports...");
    for tx in transactions {
        let report = TransactionReport::from(tx);
        log::debug!("Serializing report: {report:?}");
        wtr.serialize(report)?;
    }

    write_to_string(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ft::ids::TransactionId;
    use ft::{Money, TransactionType};

    use chrono::{TimeZone, Utc};

    #[test]
    fn export() {
        let transactions = vec![Transaction {
            id: TransactionId::from("abc123"),
            description: "Coffee, large".to_string(),
            amount: Money(45000),
            tx_type: TransactionType::Expense,
            date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }];

        let csv = export_transactions(&transactions).unwrap();

        assert_eq!(
            csv,
            "id,date,type,description,amount\n\
             abc123,2024-03-01T09:30:00.000Z,expense,\"Coffee, large\",4.50\n"
        );
    }

    #[test]
    fn export_empty() {
        let csv = export_transactions(&Vec::<Transaction>::new()).unwrap();

        assert_eq!(csv, "");
    }
}
