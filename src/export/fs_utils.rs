// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Fail unless `path` may be (over)written: absent, forced, or confirmed on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    confirm_overwrite(path, io::stdin().lock())
}

/// Only an explicit yes overwrites; an empty or closed input cancels.
fn confirm_overwrite<R: BufRead>(path: &Path, mut input: R) -> AppResult<()> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;

    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            info("Existing file will be overwritten.");
            Ok(())
        }
        _ => Err(AppError::Export(format!(
            "cancelled: existing file '{}' not overwritten",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::confirm_overwrite;
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn only_yes_confirms() {
        let p = Path::new("/tmp/x.csv");
        assert!(confirm_overwrite(p, Cursor::new("y\n")).is_ok());
        assert!(confirm_overwrite(p, Cursor::new(" YES \n")).is_ok());
        assert!(confirm_overwrite(p, Cursor::new("n\n")).is_err());
        assert!(confirm_overwrite(p, Cursor::new("")).is_err());
    }
}
