// src/table/mod.rs
use csv::{ByteRecord, ReaderBuilder, Writer, WriterBuilder};
use encoding_rs::WINDOWS_1252;
use std::{
    collections::HashMap,
    io::{Read, Write},
};
use tracing::{debug, trace, warn};

use crate::error::Result;

#[derive(Debug, Default)]
pub struct RawTable {
    /// Column labels, from the first row of the file, in file order.
    pub headers: Vec<String>,
    /// Each data row, keyed by column label.
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn has_column(&self, label: &str) -> bool {
        self.headers.iter().any(|h| h == label)
    }
}

/// Read a comma-delimited stream whose first row is the header.
///
/// Every data row must carry exactly as many fields as the header; a ragged
/// row or broken quoting aborts the read. Fields that are not valid UTF-8
/// are decoded as Windows-1252 instead.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = decode_record(rdr.byte_headers()?, 0);
    trace!(columns = headers.len(), "read header");

    let mut rows = Vec::new();
    for (i, result) in rdr.byte_records().enumerate() {
        let record = result?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(decode_record(&record, i + 1))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "read table");
    Ok(RawTable { headers, rows })
}

/// `row` is 0 for the header, otherwise the 1-based data row.
fn decode_record(record: &ByteRecord, row: usize) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(field, bytes)| match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                warn!(row, field, "field is not UTF-8, decoding as Windows-1252");
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                text.into_owned()
            }
        })
        .collect()
}

/// Thin wrapper over a CSV writer: one header, then rows in the same shape.
pub struct TableWriter<W: Write> {
    inner: Writer<W>,
    rows: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: WriterBuilder::new().has_headers(false).from_writer(writer),
            rows: 0,
        }
    }

    pub fn write_header(&mut self, headers: &[String]) -> Result<()> {
        // an empty record would come out as `""`, which reads back as one column
        if !headers.is_empty() {
            self.inner.write_record(headers)?;
        }
        Ok(())
    }

    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush everything buffered and report how many data rows went out.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        debug!(rows = self.rows, "wrote table");
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WtrError;

    #[test]
    fn reads_header_and_keyed_rows() {
        let text = "Licence Number,NGR,Frequency\n0001,SU 123 456,1.5\n0002,\"TQ, 1\",2\n";
        let table = read_table(text.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Licence Number", "NGR", "Frequency"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["NGR"], "SU 123 456");
        assert_eq!(table.rows[1]["NGR"], "TQ, 1");
        assert!(table.has_column("Frequency"));
        assert!(!table.has_column("OS Easting"));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let text = "a,b,c\n1,2,3\n4,5\n";
        let err = read_table(text.as_bytes()).unwrap_err();
        assert!(matches!(err, WtrError::Csv(_)), "got {err:?}");
    }

    #[test]
    fn latin1_fields_are_decoded_not_rejected() {
        let bytes: &[u8] = b"Licence Number,Soci\xE9t\xE9\n1,Caf\xE9 Radio\n2,Zed\n";
        let table = read_table(bytes).unwrap();

        assert_eq!(table.headers, vec!["Licence Number", "Soci\u{e9}t\u{e9}"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Soci\u{e9}t\u{e9}"], "Caf\u{e9} Radio");
        assert_eq!(table.rows[1]["Soci\u{e9}t\u{e9}"], "Zed");
    }

    #[test]
    fn utf8_fields_are_kept_as_is() {
        let table = read_table("Company\nCaf\u{e9} \u{20ac}\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0]["Company"], "Caf\u{e9} \u{20ac}");
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = read_table("".as_bytes()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn writer_quotes_embedded_delimiters() {
        let mut buf = Vec::new();
        {
            let mut w = TableWriter::new(&mut buf);
            w.write_header(&["a".to_string(), "b".to_string()]).unwrap();
            w.write_row(["x,y", "z"]).unwrap();
            assert_eq!(w.finish().unwrap(), 1);
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\n\"x,y\",z\n");
    }
}
