use ft::edit::Form;
use ft::view::{ListView, SummaryView, View};
use ft::{BalanceStyle, Renderer};

use std::io::{self, Write};

/// Draws every view to a terminal-like writer
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View) {
        let res = write_summary(&mut self.out, &view.summary)
            .and_then(|_| write_list(&mut self.out, view))
            .and_then(|_| self.out.flush());

        if let Err(e) = res {
            log::error!("Failed to render view: {e}");
        }
    }
}

pub fn write_summary(out: &mut impl Write, summary: &SummaryView) -> io::Result<()> {
    let style = match summary.balance_style {
        BalanceStyle::Positive => "positive",
        BalanceStyle::Negative => "negative",
    };

    writeln!(
        out,
        "Balance: {} ({style})  Income: {}  Expenses: {}",
        summary.balance, summary.income, summary.expenses
    )
}

pub fn write_list(out: &mut impl Write, view: &View) -> io::Result<()> {
    writeln!(out, "Transactions ({}):", view.filter)?;

    match &view.list {
        ListView::Empty(message) => writeln!(out, "  {message}"),
        ListView::Rows(rows) => {
            for row in rows.iter() {
                writeln!(
                    out,
                    "  {}  {:>12}  {}  [{}]",
                    row.date, row.amount, row.description, row.id
                )?;
            }

            Ok(())
        }
    }
}

pub fn write_form(out: &mut impl Write, form: &Form) -> io::Result<()> {
    let tx_type = form.tx_type.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string());

    writeln!(out, "Description: {}", form.description)?;
    writeln!(out, "Amount: {}", form.amount)?;
    writeln!(out, "Type: {tx_type}")?;

    if let Some(id) = form.editing_id() {
        writeln!(out, "Editing: {id}")?;
    }

    writeln!(out, "[{}]", form.submit_label())
}
