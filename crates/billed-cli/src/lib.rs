use billed_app::{Adapter, BillRow, Intent};
use billed_core::error::{REJECTED_FILE_ALERT, REJECTED_FILE_HINT};
use std::io::Write;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Applies controller intents to a terminal.
pub struct TerminalAdapter<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
    failed: bool,
}

impl TerminalAdapter<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), format)
    }
}

impl<O: Write, E: Write> TerminalAdapter<O, E> {
    pub fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            format,
            failed: false,
        }
    }

    /// Whether an alert or an error page was shown.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn print_table(&mut self, rows: &[BillRow]) -> std::io::Result<()> {
        writeln!(self.out, "\n=== Mes notes de frais ===\n")?;

        if rows.is_empty() {
            writeln!(self.out, "Aucune note de frais.")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "{:<24} {:<20} {:<30} {:<12} {:>10} {:<12}",
            "ID", "Type", "Nom", "Date", "Montant", "Statut"
        )?;
        writeln!(self.out, "{}", "-".repeat(113))?;

        for row in rows {
            writeln!(
                self.out,
                "{:<24} {:<20} {:<30} {:<12} {:>8} € {:<12}",
                truncate_string(row.id.as_deref().unwrap_or("-"), 24),
                truncate_string(&row.bill_type, 20),
                truncate_string(&row.name, 30),
                row.display_date,
                row.amount,
                row.status_label
            )?;
        }
        writeln!(self.out)
    }

    fn write_intent(&mut self, intent: Intent) -> std::io::Result<()> {
        match intent {
            Intent::Stay => Ok(()),
            Intent::Navigate(route) => {
                tracing::debug!(route = %route, "Navigate");
                writeln!(self.out, "-> {}", route)
            }
            Intent::ShowReceipt { url, width } => {
                writeln!(self.out, "Justificatif: {} ({}px)", url, width)
            }
            Intent::Alert(message) => {
                self.failed = true;
                writeln!(self.err, "{}", message)?;
                if message == REJECTED_FILE_ALERT {
                    writeln!(self.err, "{}", REJECTED_FILE_HINT)?;
                }
                Ok(())
            }
            Intent::RenderBills(rows) => match self.format {
                OutputFormat::Table => self.print_table(&rows),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&rows)
                        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
                    writeln!(self.out, "{}", json)
                }
            },
            Intent::RenderError(message) => {
                self.failed = true;
                writeln!(self.err, "{}", message)
            }
        }
    }
}

impl<O: Write, E: Write> Adapter for TerminalAdapter<O, E> {
    fn apply(&mut self, intent: Intent) {
        if let Err(e) = self.write_intent(intent) {
            tracing::error!(error = %e, "Failed to write to terminal");
        }
    }
}
