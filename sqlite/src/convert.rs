//! Conversion from SQLite rows to sample rows.

use rusqlite::Row;
use rusqlite::types::ValueRef;
use schema_doc_core::{SampleRow, SampleValue};

/// Converts a borrowed SQLite value into an owned [`SampleValue`].
///
/// Text that is not valid UTF-8 is decoded lossily.
pub(crate) fn sample_value(value: ValueRef<'_>) -> SampleValue {
    match value {
        ValueRef::Null => SampleValue::Null,
        ValueRef::Integer(v) => SampleValue::Integer(v),
        ValueRef::Real(v) => SampleValue::Real(v),
        ValueRef::Text(bytes) => SampleValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SampleValue::Blob(bytes.to_vec()),
    }
}

/// Reads every column of `row`, pairing values with the result-set names.
pub(crate) fn sample_row(row: &Row<'_>, names: &[String]) -> rusqlite::Result<SampleRow> {
    let mut cells = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        cells.push((name.clone(), sample_value(row.get_ref(idx)?)));
    }
    Ok(SampleRow::new(cells))
}

/// Quotes an identifier for interpolation into SQL.
///
/// Table and column names come from the catalog and cannot be bound as
/// parameters, so embedded double quotes are doubled.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("cliente"), "\"cliente\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_sample_row_reads_all_types() {
        let conn = Connection::open_in_memory().unwrap();
        let names: Vec<String> = ["i", "r", "t", "b", "n"].iter().map(|s| s.to_string()).collect();
        let row = conn
            .query_row(
                "SELECT 7 AS i, 2.5 AS r, 'txt' AS t, x'0102' AS b, NULL AS n",
                [],
                |row| sample_row(row, &names),
            )
            .unwrap();

        assert_eq!(row.get("i"), Some(&SampleValue::Integer(7)));
        assert_eq!(row.get("r"), Some(&SampleValue::Real(2.5)));
        assert_eq!(row.get("t"), Some(&SampleValue::Text("txt".into())));
        assert_eq!(row.get("b"), Some(&SampleValue::Blob(vec![1, 2])));
        assert_eq!(row.get("n"), Some(&SampleValue::Null));
        assert_eq!(row.non_null_count(), 4);
    }
}
