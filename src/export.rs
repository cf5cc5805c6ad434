// 📤 CSV Export
// One `name,amount,category,date` line per record, no header, no quoting

use crate::error::TrackerResult;
use crate::expense::Expense;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// File name offered for downloads
pub const DEFAULT_EXPORT_FILE: &str = "expenses.csv";

pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> TrackerResult<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);

    for expense in expenses {
        let amount = expense.amount.to_string();
        wtr.write_record([
            expense.name.as_str(),
            amount.as_str(),
            expense.category.as_str(),
            expense.date.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(expenses: &[Expense]) -> TrackerResult<String> {
    let mut buffer = Vec::new();
    write_csv(expenses, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the export file, replacing any previous one
pub fn export_to_path(expenses: &[Expense], path: &Path) -> TrackerResult<usize> {
    let file = File::create(path)?;
    write_csv(expenses, file)?;
    tracing::info!(path = %path.display(), count = expenses.len(), "exported expenses");
    Ok(expenses.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, name: &str, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id,
            name: name.to_string(),
            amount,
            category: category.to_string(),
            date: date.to_string(),
            recurring: None,
        }
    }

    #[test]
    fn test_csv_lines() {
        let expenses = vec![
            expense(1, "Lunch", 12.5, "Food", "2024-03-01"),
            expense(2, "Bus", 3.0, "Transport", "2024-03-02"),
        ];

        let csv = to_csv_string(&expenses).unwrap();
        assert_eq!(csv, "Lunch,12.5,Food,2024-03-01\nBus,3,Transport,2024-03-02\n");
    }

    #[test]
    fn test_embedded_commas_are_not_quoted() {
        let expenses = vec![expense(1, "Coffee, large", 4.0, "Food", "2024-03-01")];
        let csv = to_csv_string(&expenses).unwrap();
        assert_eq!(csv, "Coffee, large,4,Food,2024-03-01\n");
    }

    #[test]
    fn test_empty_ledger_exports_nothing() {
        assert_eq!(to_csv_string(&[]).unwrap(), "");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);

        let written = export_to_path(&[expense(1, "Rent", 900.0, "Utilities", "2024-03-01")], &path)
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Rent,900,Utilities,2024-03-01\n");
    }
}
