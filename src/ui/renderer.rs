//! Plain-text renderer for the terminal front end.
//!
//! Output is line-oriented so it can be piped: the expression, then a status
//! line with the delete-key label and the microphone state.

use crate::storage::CalculationRecord;
use crate::ui::viewmodel::UIViewModel;
use std::io::{self, Write};

/// Renders the view model to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn render(vm: &UIViewModel) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(vm, &mut out)
}

/// Renders the view model to any writer.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_to<W: Write>(vm: &UIViewModel, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", vm.expression)?;

    let mic = if vm.recording { "  [listening]" } else { "" };
    writeln!(out, "  [{}]{mic}", vm.delete_label)?;
    out.flush()
}

/// Lists calculations, most recent last, with their recall index.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_history<W: Write>(records: &[CalculationRecord], out: &mut W) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "(no history)")?;
        return out.flush();
    }
    for (index, record) in records.iter().enumerate() {
        writeln!(out, "{index:>3}  {} = {}", record.expression, record.result)?;
    }
    out.flush()
}
