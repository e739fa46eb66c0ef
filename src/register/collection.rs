// src/register/collection.rs

use std::{
    borrow::Cow,
    collections::BTreeSet,
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info, instrument};

use super::{
    filter::{matches_all, Predicate},
    record::Record,
};
use crate::{
    error::{Result, WtrError},
    schema::{FieldSchema, Revision},
    table::{read_table, TableWriter},
};

/// A loaded register: the header it was read with, and its records.
///
/// The header fixes which columns are written back and in what order; it
/// never changes. `filter` hands out new collections that share the header
/// and the records. `filter_in_place` takes `&mut self`, so a collection
/// being shrunk cannot be read from anywhere else at the same time.
#[derive(Debug, Clone)]
pub struct Collection {
    header: Arc<[String]>,
    schema: Arc<FieldSchema>,
    rows: Vec<Arc<Record>>,
}

impl Collection {
    pub fn new(header: Vec<String>, schema: Arc<FieldSchema>, rows: Vec<Record>) -> Self {
        Self {
            header: header.into(),
            schema,
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    /// Read a register in the layout of `revision`.
    pub fn read_csv<R: Read>(reader: R, revision: Revision) -> Result<Self> {
        Self::read_csv_with_schema(reader, Arc::new(revision.schema()))
    }

    /// Open and read a register file from disk.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_path<P: AsRef<Path>>(path: P, revision: Revision) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WtrError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_csv(BufReader::new(file), revision)
    }

    /// Read a register. Extension columns are looked for once, in the header;
    /// a value in one of them that does not parse fails the whole load.
    #[instrument(level = "debug", skip_all, fields(revision = %schema.revision()))]
    pub fn read_csv_with_schema<R: Read>(reader: R, schema: Arc<FieldSchema>) -> Result<Self> {
        let table = read_table(reader)?;

        let present = schema.present_extensions(&table.headers);
        debug!(?present, "extension columns");

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, columns)| Record::from_columns(columns, &schema, &present, i + 1).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        info!(
            rows = rows.len(),
            columns = table.headers.len(),
            "loaded register"
        );
        Ok(Self {
            header: table.headers.into(),
            schema,
            rows,
        })
    }

    /// Write the header, then one line per record with exactly the header's columns.
    #[instrument(level = "debug", skip_all, fields(rows = self.rows.len(), columns = self.header.len()))]
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = TableWriter::new(writer);
        out.write_header(&self.header)?;

        let mut line: Vec<Cow<'_, str>> = Vec::with_capacity(self.header.len());
        for record in &self.rows {
            line.clear();
            line.extend(
                self.header
                    .iter()
                    .map(|label| record.render(&self.schema, label)),
            );
            out.write_row(line.iter().map(|v| &**v))?;
        }

        out.finish()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// True when both collections hold the very same header.
    pub fn shares_header(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.header, &other.header)
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Arc<Record>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| &**r)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct licensee companies, sorted.
    pub fn companies(&self) -> Vec<String> {
        self.iter()
            .map(Record::company)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// A new collection with the records every predicate accepts, in their
    /// load order. The receiver is left as it was.
    pub fn filter(&self, predicates: &[Predicate<'_>]) -> Collection {
        let rows: Vec<Arc<Record>> = self
            .rows
            .iter()
            .filter(|r| matches_all(r, predicates))
            .cloned()
            .collect();
        debug!(kept = rows.len(), of = self.rows.len(), "filtered");

        Collection {
            header: Arc::clone(&self.header),
            schema: Arc::clone(&self.schema),
            rows,
        }
    }

    /// As `filter`, but drops rejected records from this collection.
    /// Collections obtained earlier from `filter` keep their rows.
    pub fn filter_in_place(&mut self, predicates: &[Predicate<'_>]) -> &mut Self {
        let before = self.rows.len();
        self.rows.retain(|r| matches_all(r, predicates));
        debug!(kept = self.rows.len(), of = before, "filtered in place");
        self
    }
}
