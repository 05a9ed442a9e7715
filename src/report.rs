//! Top-level handler: runs the patcher once and turns the result into a
//! status message and a process exit code.

use crate::patcher::{PatchError, PatchOutcome, Patcher};
use colored::Colorize;
use std::io::{self, Write};
use tracing::error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Patch the target and write the status message to `out`.
///
/// Both outcomes exit `0`; every failure exits `1`.
pub fn execute<W: Write>(patcher: &Patcher, out: &mut W) -> i32 {
    let written = match patcher.patch() {
        Ok(outcome) => write_outcome(out, &outcome).map(|()| EXIT_SUCCESS),
        Err(e) => {
            error!(file = %patcher.target().display(), error = %e, "patch failed");
            write_failure(out, &e).map(|()| EXIT_FAILURE)
        }
    };

    written.unwrap_or(EXIT_FAILURE)
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &PatchOutcome) -> io::Result<()> {
    match outcome {
        PatchOutcome::Patched { summary, .. } => {
            writeln!(out, "✅ {}", "Successfully patched CLI banner!".green())?;
            for line in summary {
                writeln!(out, "   {}", line)?;
            }
        }
        PatchOutcome::Unchanged { .. } => {
            writeln!(out, "❌ {}", "No banner patterns found to patch".yellow())?;
            writeln!(
                out,
                "   {}",
                "The file may already be patched or patterns have changed".dimmed()
            )?;
        }
    }
    Ok(())
}

pub fn write_failure<W: Write>(out: &mut W, error: &PatchError) -> io::Result<()> {
    writeln!(out, "❌ {} {}", "Error patching file:".red(), error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn render(outcome: &PatchOutcome) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_outcome(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_patched_message() {
        let outcome = PatchOutcome::Patched {
            file: PathBuf::from("/tmp/cli.js"),
            summary: vec![crate::patcher::ReplacementSummary {
                label: "HERO'S QUEST".to_string(),
                text: "HYRULE CODE".to_string(),
            }],
            replaced: 1,
        };
        assert_eq!(
            render(&outcome),
            "✅ Successfully patched CLI banner!\n   HERO'S QUEST → HYRULE CODE\n"
        );
    }

    #[test]
    fn test_unchanged_message() {
        let outcome = PatchOutcome::Unchanged {
            file: PathBuf::from("/tmp/cli.js"),
        };
        let text = render(&outcome);
        assert!(text.starts_with("❌ No banner patterns found to patch\n"));
        assert!(text.contains("may already be patched"));
    }

    #[test]
    fn test_execute_failure_exit_code() {
        colored::control::set_override(false);
        let temp_dir = tempfile::tempdir().unwrap();
        let patcher = Patcher::new(temp_dir.path().join("missing.js")).unwrap();

        let mut buf = Vec::new();
        let code = execute(&patcher, &mut buf);

        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("❌ Error patching file: failed to read"));
        assert!(text.contains("missing.js"));
    }

    #[test]
    fn test_execute_success_exit_code() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("cli.js");
        fs::write(&file_path, "TRIFORCE POWER ACTIVATED!!").unwrap();
        let patcher = Patcher::new(&file_path).unwrap();

        let mut buf = Vec::new();
        assert_eq!(execute(&patcher, &mut buf), EXIT_SUCCESS);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "TRIFORCE AWAKENED!!");

        let mut buf = Vec::new();
        assert_eq!(execute(&patcher, &mut buf), EXIT_SUCCESS);
        assert!(String::from_utf8(buf).unwrap().contains("No banner patterns found"));
    }
}
