// ============================================================================
// src/ui.rs – Console output helpers for the filewarden CLI
// ============================================================================

use console::Style;

/// Styled status output. `quiet` suppresses everything except payload
/// printed through `line`.
#[derive(Debug, Clone)]
pub struct UX {
    pub quiet: bool,
}

impl UX {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Raw payload (file lines, table rows); printed even when quiet.
    pub fn line(&self, text: &str) {
        println!("{text}");
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", Style::new().cyan().apply_to("▸"));
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", Style::new().green().bold().apply_to(format!("✔ {msg}")));
        }
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("{}", Style::new().yellow().apply_to(format!("⚠ {msg}")));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", Style::new().red().bold().apply_to(format!("✖ {msg}")));
    }

    /// Key/value panel, keys padded to a common width.
    pub fn data_panel(&self, title: &str, rows: &[(&str, String)]) {
        if !self.quiet {
            println!("{}", Style::new().bold().apply_to(title));
        }
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            println!(
                "  {}  {value}",
                Style::new().dim().apply_to(format!("{key:<width$}"))
            );
        }
    }
}
