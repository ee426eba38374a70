//! Flat-file CSV persistence for the ledger.
//!
//! File layout (UTF-8, header required):
//! date,type,category,amount,comment
//! 2025-01-02,expense,food,12.50,lunch
//!
//! Columns are located by header name. A row with any of date/type/category/
//! amount missing or blank is skipped; a row that has them all but cannot be
//! parsed fails the whole load.

use csv::{StringRecord, Terminator, WriterBuilder};
use finlog_core::{Kind, Transaction, normalize_category, parse_iso_date};
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::TransactionStore;
use crate::error::StoreError;

pub const HEADER: [&str; 5] = ["date", "type", "category", "amount", "comment"];

/// Column index of each known field in the file being read
#[derive(Debug, Default)]
struct ColumnIndex {
    date: Option<usize>,
    kind: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    comment: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut idx = ColumnIndex::default();
        for (i, h) in headers.iter().enumerate() {
            match h.trim().to_ascii_lowercase().as_str() {
                "date" => idx.date = Some(i),
                "type" => idx.kind = Some(i),
                "category" => idx.category = Some(i),
                "amount" => idx.amount = Some(i),
                "comment" => idx.comment = Some(i),
                _ => {}
            }
        }
        idx
    }
}

/// The ledger file at a fixed path
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and a header-only file if nothing is there
    /// yet. A zero-byte file also gets the header, otherwise the first
    /// appended row would be read back as the header.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        self.ensure_parent()?;
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 || !meta.is_file() => return Ok(()),
            Ok(_) => info!("writing header to empty {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => info!("creating {}", self.path.display()),
            Err(e) => return Err(self.io_err("stat", e)),
        }
        let file = File::create(&self.path).map_err(|e| self.io_err("create", e))?;
        let mut wtr = writer(file);
        wtr.write_record(HEADER).map_err(|e| self.csv_err(e))?;
        wtr.flush().map_err(|e| self.io_err("write", e))?;
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                action: "create directory",
                path: dir.to_path_buf(),
                source,
            }),
            _ => Ok(()),
        }
    }

    fn parse_row(&self, idx: &ColumnIndex, record: &StringRecord, line: u64) -> Result<Option<Transaction>, StoreError> {
        let field = move |i: Option<usize>| i.and_then(|i| record.get(i)).map(str::trim).filter(|s| !s.is_empty());

        let (Some(date), Some(kind), Some(category), Some(amount)) =
            (field(idx.date), field(idx.kind), field(idx.category), field(idx.amount))
        else {
            debug!("{}:{line}: incomplete row skipped", self.path.display());
            return Ok(None);
        };

        let date =
            parse_iso_date(date).ok_or_else(|| self.parse_err(line, "date", date, "expected YYYY-MM-DD"))?;
        let kind: Kind = kind.parse().map_err(|e| self.parse_err(line, "type", kind, e))?;
        let amount = parse_stored_amount(amount).map_err(|e| self.parse_err(line, "amount", amount, e))?;
        let comment = idx.comment.and_then(|i| record.get(i)).unwrap_or("");

        Ok(Some(Transaction::new(date, kind, normalize_category(category), amount, comment)))
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transactions.csv".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    /// True when the file is non-empty and its last byte is not a newline
    fn lacks_trailing_newline(&self) -> Result<bool, StoreError> {
        let mut file = File::open(&self.path).map_err(|e| self.io_err("open", e))?;
        let len = file.metadata().map_err(|e| self.io_err("stat", e))?.len();
        if len == 0 {
            return Ok(false);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(|e| self.io_err("read", e))?;
        file.read_exact(&mut last).map_err(|e| self.io_err("read", e))?;
        Ok(last[0] != b'\n')
    }

    /// Header plus every row into `tmp`, synced to disk
    fn write_temp(&self, tmp: &Path, txns: &[Transaction]) -> Result<(), StoreError> {
        let file = File::create(tmp).map_err(|source| StoreError::Io {
            action: "create",
            path: tmp.to_path_buf(),
            source,
        })?;

        let mut wtr = writer(file);
        wtr.write_record(HEADER).map_err(|e| self.csv_err(e))?;
        for t in txns {
            wtr.write_record(to_row(t)).map_err(|e| self.csv_err(e))?;
        }
        let file = wtr.into_inner().map_err(|e| self.io_err("write", e.into_error()))?;
        file.sync_all().map_err(|e| self.io_err("sync", e))?;
        Ok(())
    }

    fn discard_temp(&self, tmp: &Path) {
        match fs::remove_file(tmp) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => warn!("could not remove {}: {e}", tmp.display()),
            _ => {}
        }
    }

    fn io_err(&self, action: &'static str, source: io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }

    fn csv_err(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_err(&self, line: u64, field: &'static str, value: &str, reason: impl Into<String>) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            line,
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl TransactionStore for CsvStore {
    fn load(&self) -> Result<Vec<Transaction>, StoreError> {
        self.ensure_exists()?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;

        let idx = ColumnIndex::from_headers(rdr.headers().map_err(|e| self.csv_err(e))?);
        if idx.date.is_none() || idx.kind.is_none() || idx.category.is_none() || idx.amount.is_none() {
            warn!("{}: header lacks a required column, rows will be skipped", self.path.display());
        }

        let mut txns = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_err(e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);
            if let Some(t) = self.parse_row(&idx, &record, line)? {
                txns.push(t);
            }
        }

        debug!("loaded {} transactions from {}", txns.len(), self.path.display());
        Ok(txns)
    }

    fn append(&self, t: &Transaction) -> Result<(), StoreError> {
        self.ensure_exists()?;
        let needs_newline = self.lacks_trailing_newline()?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err("open", e))?;
        if needs_newline {
            warn!("{} did not end with a newline, adding one", self.path.display());
            file.write_all(b"\n").map_err(|e| self.io_err("write", e))?;
        }

        let mut wtr = writer(file);
        wtr.write_record(to_row(t)).map_err(|e| self.csv_err(e))?;
        wtr.flush().map_err(|e| self.io_err("write", e))?;
        Ok(())
    }

    fn save_all(&self, txns: &[Transaction]) -> Result<(), StoreError> {
        self.ensure_exists()?;

        let tmp = self.temp_path();
        if let Err(e) = self.write_temp(&tmp, txns) {
            self.discard_temp(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            self.discard_temp(&tmp);
            return Err(self.io_err("replace", e));
        }
        info!("rewrote {} with {} transactions", self.path.display(), txns.len());
        Ok(())
    }
}

fn writer<W: Write>(w: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w)
}

fn to_row(t: &Transaction) -> [String; 5] {
    [
        t.date().format("%Y-%m-%d").to_string(),
        t.kind().as_str().to_string(),
        t.category().to_string(),
        format!("{:.2}", t.amount()),
        t.comment().to_string(),
    ]
}

fn parse_stored_amount(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| "not a number".to_string())?;
    if !value.is_finite() || value <= 0.0 {
        return Err("must be a positive number".to_string());
    }
    Ok(value)
}
