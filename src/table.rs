// ============================================================================
// src/table.rs – Comma-separated rows read through a handle
// ============================================================================

use crate::error::Result;
use crate::handle::FileHandle;

/// Read the handle's file and split every line into fields. The read is
/// audited like any other `read`.
pub fn read_table(handle: &mut FileHandle) -> Result<Vec<Vec<String>>> {
    Ok(handle.read()?.iter().map(|line| split_row(line)).collect())
}

/// Split one line on commas. Fields wrapped in double quotes may contain
/// commas, and `""` inside a quoted field stands for one quote.
pub fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if field.is_empty() => quoted = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::AccessMode;
    use tempfile::tempdir;

    #[test]
    fn plain_fields() {
        assert_eq!(split_row("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_row(""), vec![""]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_escaped_quotes() {
        assert_eq!(
            split_row(r#"1,"Smith, J","say ""hi""""#),
            vec!["1", "Smith, J", r#"say "hi""#]
        );
    }

    #[test]
    fn read_table_goes_through_the_handle() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("audit.log");
        let mut handle =
            FileHandle::open(dir.path().join("t.csv"), AccessMode::Write, &log).unwrap();
        handle.write(&["name,qty", "bolt,4"], true).unwrap();

        let rows = read_table(&mut handle).unwrap();
        assert_eq!(rows, vec![vec!["name", "qty"], vec!["bolt", "4"]]);
        assert!(handle.is_at_rest());
    }
}
