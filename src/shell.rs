use crate::{args, reader, terminal, writer};

use ft::ids::TransactionId;
use ft::input::{self, InputParseError, VALIDATION_NOTICE};
use ft::storage::Storage;
use ft::{Filter, Renderer, Result, Tracker, TransactionType};

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

const DELETE_PROMPT: &str = "Are you sure you want to delete this transaction? [y/N] ";

/// One line typed at the prompt
#[derive(Parser, Debug)]
#[command(name = "finance-tracker", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the form description
    Description {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Set the form amount
    Amount {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set the form type
    Type {
        /// income or expense
        #[arg(value_parser = parse_tx_type)]
        tx_type: TransactionType,
    },
    /// Add the form as a transaction, or apply the edit
    Submit,
    /// Clear the form and leave edit mode
    Reset,
    /// Add a transaction directly
    Add {
        /// income or expense
        tx_type: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Load a transaction into the form
    Edit { id: String },
    /// Delete a transaction (asks for confirmation)
    Delete { id: String },
    /// Change which transactions are listed
    Filter {
        /// all, income or expense
        #[arg(value_parser = parse_filter)]
        filter: Filter,
    },
    /// Show the transaction list
    List,
    /// Show income, expenses and balance
    Summary,
    /// Show the form
    Form,
    /// Print all transactions as csv
    Export,
    /// Add the rows of a csv with columns type,description,amount
    Import { path: String },
    /// Exit
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`; `help` comes back as a clap error
    /// carrying the help text.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let words: Vec<&str> = line.split_whitespace().collect();

        if words.is_empty() {
            return Ok(None);
        }

        let parsed = ShellLine::try_parse_from(words)?;

        Ok(Some(parsed.command))
    }
}

fn parse_tx_type(value: &str) -> std::result::Result<TransactionType, String> {
    TransactionType::parse(value).ok_or_else(|| "expected income or expense".to_string())
}

fn parse_filter(value: &str) -> std::result::Result<Filter, String> {
    Filter::parse(value).ok_or_else(|| "expected all, income or expense".to_string())
}

/// Reads one line, replacing invalid UTF-8. Returns `None` at end of input.
fn read_line<B: BufRead>(source: &mut B) -> Result<Option<String>> {
    let mut buf = vec![];

    if source.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Reads commands until `quit` or end of input. Failed commands are reported and the loop continues.
pub fn run<S: Storage, R: Renderer, B: BufRead>(
    tracker: &mut Tracker<S, R>,
    mut source: B,
    out: &mut impl Write,
) -> Result {
    writeln!(out, "Type `help` for a list of commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match read_line(&mut source)? {
            Some(line) => line,
            None => break,
        };

        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write!(out, "{e}")?;
                continue;
            }
        };

        log::debug!("Executing command: {command:?}");

        if command == Command::Quit {
            break;
        }

        if let Err(e) = execute(tracker, command, &mut source, out) {
            report_error(out, e)?;
        }
    }

    Ok(())
}

fn execute<S: Storage, R: Renderer, B: BufRead>(
    tracker: &mut Tracker<S, R>,
    command: Command,
    source: &mut B,
    out: &mut impl Write,
) -> Result {
    match command {
        Command::Description { words } => tracker.form_mut().description = words.join(" "),
        Command::Amount { value } => tracker.form_mut().amount = value,
        Command::Type { tx_type } => tracker.form_mut().tx_type = Some(tx_type),
        Command::Submit => match tracker.submit()? {
            Some(tx) => writeln!(out, "Saved transaction {}.", tx.id)?,
            None => writeln!(out, "Transaction no longer exists, nothing updated.")?,
        },
        Command::Reset => {
            tracker.reset_form();
            writeln!(out, "Form cleared.")?;
        }
        Command::Add {
            tx_type,
            amount,
            description,
        } => {
            let tx_type = TransactionType::parse(&tx_type);
            let valid = input::validate(&description.join(" "), &amount, tx_type)?;
            let tx = tracker.add(valid)?;
            writeln!(out, "Added transaction {}.", tx.id)?;
        }
        Command::Edit { id } => {
            let id = TransactionId::from(id.as_str());

            if tracker.edit(&id) {
                terminal::write_form(out, tracker.form())?;
            } else {
                writeln!(out, "No transaction with id {id}.")?;
            }
        }
        Command::Delete { id } => {
            let id = TransactionId::from(id.as_str());

            if tracker.store().get(&id).is_none() {
                writeln!(out, "No transaction with id {id}.")?;
                return Ok(());
            }

            let confirmed = confirm(source, out)?;

            if tracker.request_delete(&id, || confirmed)? {
                writeln!(out, "Deleted transaction {id}.")?;
            } else {
                writeln!(out, "Delete cancelled.")?;
            }
        }
        Command::Filter { filter } => tracker.set_filter(filter),
        Command::List => terminal::write_list(out, &tracker.view())?,
        Command::Summary => terminal::write_summary(out, &tracker.view().summary)?,
        Command::Form => terminal::write_form(out, tracker.form())?,
        Command::Export => {
            let csv = writer::export_transactions(tracker.store().list(Filter::All))?;
            write!(out, "{csv}")?;
        }
        Command::Import { path } => {
            let path: PathBuf = args::resolve_import_path(&path)?;
            log::debug!("Importing from {path:?}");

            let mut rdr = reader::build_csv_reader(path)?;
            let batch = reader::read_import_batch(&mut rdr);
            let skipped = batch.skipped;
            let added = tracker.add_many(batch.inputs)?;

            writeln!(out, "Imported {added} transactions, skipped {skipped} invalid rows.")?;
        }
        Command::Quit => {}
    }

    Ok(())
}

/// Asks the delete question and reads the answer from the next input line
fn confirm<B: BufRead>(source: &mut B, out: &mut impl Write) -> Result<bool> {
    write!(out, "{DELETE_PROMPT}")?;
    out.flush()?;

    let answer = match read_line(source)? {
        Some(line) => line,
        None => return Ok(false),
    };

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn report_error(out: &mut impl Write, e: anyhow::Error) -> Result {
    if let Some(parse_error) = e.downcast_ref::<InputParseError>() {
        log::debug!("{parse_error}");
        writeln!(out, "{VALIDATION_NOTICE}")?;
    } else {
        writeln!(out, "Error: {e:#}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::terminal::TerminalRenderer;

    use ft::storage::MemoryStorage;

    fn run_script(script: &str) -> (Tracker<MemoryStorage, TerminalRenderer<Vec<u8>>>, String) {
        let mut tracker = Tracker::open(MemoryStorage::new(), TerminalRenderer::new(vec![])).unwrap();
        let mut out = vec![];

        run(&mut tracker, script.as_bytes(), &mut out).unwrap();

        (tracker, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
        assert_eq!(
            Command::parse_line("description  Morning coffee ").unwrap(),
            Some(Command::Description {
                words: vec!["Morning".to_string(), "coffee".to_string()]
            })
        );
        assert_eq!(
            Command::parse_line("type Income").unwrap(),
            Some(Command::Type {
                tx_type: TransactionType::Income
            })
        );
        assert_eq!(
            Command::parse_line("amount -2").unwrap(),
            Some(Command::Amount {
                value: "-2".to_string()
            })
        );
        assert_eq!(
            Command::parse_line("add expense 4.50 Coffee at the station").unwrap(),
            Some(Command::Add {
                tx_type: "expense".to_string(),
                amount: "4.50".to_string(),
                description: vec![
                    "Coffee".to_string(),
                    "at".to_string(),
                    "the".to_string(),
                    "station".to_string()
                ],
            })
        );
        assert_eq!(
            Command::parse_line("filter expense").unwrap(),
            Some(Command::Filter {
                filter: Filter::Expense
            })
        );
        assert_eq!(
            Command::parse_line("delete abc123").unwrap(),
            Some(Command::Delete {
                id: "abc123".to_string()
            })
        );
        assert_eq!(Command::parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        for line in ["type transfer", "filter weekly", "edit", "delete a b", "add", "import", "bogus"] {
            let err = Command::parse_line(line).unwrap_err();
            assert!(err.downcast_ref::<clap::Error>().is_some(), "{line}");
        }
    }

    #[test]
    fn help_lists_commands() {
        let (_, output) = run_script("help\n");

        assert!(output.contains("Add a transaction directly"));
        assert!(output.contains("Change which transactions are listed"));
    }

    #[test]
    fn unknown_command_keeps_running() {
        let (tracker, output) = run_script(
            "bogus\n\
             add income 2000 Paycheck\n",
        );

        assert!(output.contains("bogus"));
        assert_eq!(tracker.store().len(), 1);
    }

    #[test]
    fn invalid_utf8_line_is_replaced() {
        let mut tracker = Tracker::open(MemoryStorage::new(), TerminalRenderer::new(vec![])).unwrap();
        let mut out = vec![];

        run(
            &mut tracker,
            &b"description caf\xE9\nadd expense 4.50 Coffee\n"[..],
            &mut out,
        )
        .unwrap();

        assert_eq!(tracker.store().len(), 1);
        assert_eq!(tracker.form().description, "caf\u{FFFD}");
    }

    #[test]
    fn form_submission() {
        let (tracker, output) = run_script(
            "description Coffee\n\
             amount 4.50\n\
             type expense\n\
             submit\n",
        );

        assert_eq!(tracker.store().len(), 1);
        assert!(output.contains("Saved transaction"));
    }

    #[test]
    fn invalid_submission_shows_notice() {
        let (tracker, output) = run_script(
            "description Coffee\n\
             amount -2\n\
             submit\n\
             add expense abc Lunch\n",
        );

        assert!(tracker.store().is_empty());
        assert_eq!(output.matches(VALIDATION_NOTICE).count(), 2);
        assert_eq!(tracker.form().description, "Coffee");
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut tracker = Tracker::open(MemoryStorage::new(), TerminalRenderer::new(vec![])).unwrap();
        let mut out = vec![];
        run(&mut tracker, "add expense 4.50 Coffee\n".as_bytes(), &mut out).unwrap();

        let id = tracker.store().transactions()[0].id.clone();

        let mut out = vec![];
        run(&mut tracker, format!("delete {id}\nno\n").as_bytes(), &mut out).unwrap();
        assert_eq!(tracker.store().len(), 1);
        assert!(String::from_utf8(out).unwrap().contains("Delete cancelled."));

        let mut out = vec![];
        run(&mut tracker, format!("delete {id}\ny\n").as_bytes(), &mut out).unwrap();
        assert!(tracker.store().is_empty());
        assert!(String::from_utf8(out).unwrap().contains(DELETE_PROMPT));
    }

    #[test]
    fn edit_then_delete_returns_to_idle() {
        let mut tracker = Tracker::open(MemoryStorage::new(), TerminalRenderer::new(vec![])).unwrap();
        let mut out = vec![];
        run(&mut tracker, "add expense 4.50 Coffee\n".as_bytes(), &mut out).unwrap();

        let id = tracker.store().transactions()[0].id.clone();

        let mut out = vec![];
        run(&mut tracker, format!("edit {id}\nform\ndelete {id}\nyes\nform\n").as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[Update Transaction]"));
        assert!(output.trim_end().ends_with("[Add Transaction]\n>"));
        assert!(tracker.form().editing_id().is_none());
    }

    #[test]
    fn stops_at_quit() {
        let (tracker, _) = run_script(
            "add income 2000 Paycheck\n\
             quit\n\
             add expense 4.50 Coffee\n",
        );

        assert_eq!(tracker.store().len(), 1);
    }

    #[test]
    fn export_csv() {
        let (_, output) = run_script(
            "add income 2000 Paycheck\n\
             export\n",
        );

        assert!(output.contains("id,date,type,description,amount\n"));
        assert!(output.contains(",income,Paycheck,2000.00\n"));
    }

    #[test]
    fn import_missing_file() {
        let (tracker, output) = run_script("import ./no/such/file.csv\n");

        assert!(tracker.store().is_empty());
        assert!(output.contains("Error: File not found"));
    }
}
