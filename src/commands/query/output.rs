//! Output formatting for query command results.
//!
//! Table output lists each row as `column = value` lines, one block per row.

use super::execute::QueryResult;
use crate::output::Outputable;

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        if self.rows.is_empty() {
            return "No rows.".to_string();
        }

        let width = self.columns.iter().map(String::len).max().unwrap_or(0);
        let mut lines = Vec::new();

        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                lines.push(String::new());
            }
            lines.push(format!("-[ row {} ]-", idx + 1));
            for (column, value) in self.columns.iter().zip(row) {
                let value = value.as_deref().unwrap_or("NULL");
                lines.push(format!("{:<width$} = {}", column, value, width = width));
            }
        }

        lines.join("\n")
    }
}
