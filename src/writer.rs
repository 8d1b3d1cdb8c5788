use crate::{OutputRow, ScraperError};
use csv::WriterBuilder;
use std::fs::File;
use std::io;
use std::path::Path;

pub const HEADER: [&str; 3] = ["Website URL", "Category Name", "H5 Text"];

pub fn write_rows<W: io::Write>(writer: W, rows: &[OutputRow]) -> Result<(), ScraperError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes every row in one go.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[OutputRow]) -> Result<(), ScraperError> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn row(url: &str, category_name: &str, h5_text: Option<&str>) -> OutputRow {
        OutputRow {
            url: url.to_string(),
            category_name: category_name.to_string(),
            h5_text: h5_text.map(ToString::to_string),
        }
    }

    #[test]
    fn test_write_rows_quotes_and_empty_values() {
        let rows = vec![
            row("https://www.capterra.in/directory/30/accounting/software", "Accounting", Some("37")),
            row("https://www.capterra.in/a", "Billing, Invoicing", Some("5")),
            row("https://www.capterra.in/b", r#"The "Best" CRM"#, None),
        ];

        let mut buf = vec![];
        write_rows(&mut buf, &rows).expect("Failed to write rows");

        assert_eq!(
            String::from_utf8(buf).expect("Invalid utf8"),
            concat!(
                "Website URL,Category Name,H5 Text\n",
                "https://www.capterra.in/directory/30/accounting/software,Accounting,37\n",
                "https://www.capterra.in/a,\"Billing, Invoicing\",5\n",
                "https://www.capterra.in/b,\"The \"\"Best\"\" CRM\",\n",
            )
        );
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("capterra_data.csv");
        fs::write(&path, "stale content\nfrom an old run\n").expect("Failed to seed file");

        write_csv(&path, &[]).expect("Failed to write csv");

        assert_eq!(
            fs::read_to_string(&path).expect("Failed to read csv"),
            "Website URL,Category Name,H5 Text\n"
        );
    }
}
