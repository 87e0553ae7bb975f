//! Запись извлечённых записей в CSV или JSON Lines.
//!
//! Предоставляет [`RecordWriter`] для записи любых `Serialize`-значений
//! в любой тип, реализующий [`Write`].

use std::{
    io::{BufWriter, Write},
    marker::PhantomData,
};

use serde::Serialize;

use crate::error::WriteError;

/// Shorthand Result type for writer operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Marker type for CSV output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

/// Marker type for JSON Lines output (one JSON value per line).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLines;

/// Trait for streaming serialization of records.
///
/// Implemented by marker types (`Csv`, `JsonLines`).
pub trait RecordFormat {
    /// Writes a single record.
    fn write_one<W: Write, T: Serialize>(writer: &mut W, record: &T) -> Result<()>;

    /// Writes a header if the format requires one.
    ///
    /// Default implementation is a no-op.
    fn write_header<W: Write>(_writer: &mut W, _columns: &[&str]) -> Result<()> {
        Ok(())
    }
}

impl RecordFormat for Csv {
    fn write_one<W: Write, T: Serialize>(writer: &mut W, record: &T) -> Result<()> {
        let mut csv_writer = ::csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        csv_writer.serialize(record)?;
        csv_writer.flush()?;
        Ok(())
    }

    fn write_header<W: Write>(writer: &mut W, columns: &[&str]) -> Result<()> {
        let mut csv_writer = ::csv::WriterBuilder::new().from_writer(writer);
        csv_writer.write_record(columns)?;
        csv_writer.flush()?;
        Ok(())
    }
}

impl RecordFormat for JsonLines {
    fn write_one<W: Write, T: Serialize>(writer: &mut W, record: &T) -> Result<()> {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Format enum for runtime format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// CSV with a header row.
    Csv,
    /// JSON Lines.
    JsonLines,
}

impl OutputFormat {
    /// Determines format from file extension.
    ///
    /// ```
    /// use sqldump::writer::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_extension("CSV"), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_extension("jsonl"), Some(OutputFormat::JsonLines));
    /// assert_eq!(OutputFormat::from_extension("sql"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Потоковый writer для записей.
///
/// # Пример
///
/// ```ignore
/// use sqldump::writer::{Csv, RecordWriter};
/// use sqldump::FileRecord;
///
/// let mut writer = RecordWriter::<_, Csv>::new(std::io::stdout());
/// writer.write_header(&FileRecord::COLUMNS)?;
/// for file in files {
///     writer.write(&file)?;
/// }
/// writer.flush()?;
/// ```
pub struct RecordWriter<W: Write, F: RecordFormat> {
    inner: BufWriter<W>,
    _format: PhantomData<F>,
    /// Счётчик записанных записей.
    records_written: usize,
    /// Флаг: записан ли заголовок.
    header_written: bool,
}

impl<W: Write, F: RecordFormat> RecordWriter<W, F> {
    /// Создаёт новый writer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            _format: PhantomData,
            records_written: 0,
            header_written: false,
        }
    }

    /// Записывает заголовок формата (если он есть). Повторные вызовы ничего не делают.
    pub fn write_header(&mut self, columns: &[&str]) -> Result<()> {
        if !self.header_written {
            F::write_header(&mut self.inner, columns)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Записывает одну запись.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        F::write_one(&mut self.inner, record)?;
        self.records_written += 1;
        Ok(())
    }

    /// Принудительно сбрасывает буфер.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Возвращает количество записанных записей.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;
    use crate::record::{FileRecord, FileStatus, ObjectType};

    fn sample_file() -> FileRecord {
        FileRecord {
            id: 112,
            status: FileStatus::New,
            unique_name: "0197836aba9ad1edf126c3bff2e39218.jpg".to_string(),
            object_id: 112,
            object_type: ObjectType::Product,
            created_at: civil::datetime(2010, 10, 18, 21, 0, 12, 0),
            updated_at: civil::datetime(2010, 10, 18, 21, 19, 31, 0),
        }
    }

    #[test]
    fn test_csv_with_header() {
        let mut output = Vec::new();
        {
            let mut writer = RecordWriter::<_, Csv>::new(&mut output);
            writer.write_header(&FileRecord::COLUMNS).unwrap();
            writer.write_header(&FileRecord::COLUMNS).unwrap();
            writer.write(&sample_file()).unwrap();
            writer.flush().unwrap();
        }

        let result = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "id,status,unique_name,object_id,object_type,created_at,updated_at");
        assert_eq!(
            lines[1],
            "112,1,0197836aba9ad1edf126c3bff2e39218.jpg,112,5,2010-10-18T21:00:12,2010-10-18T21:19:31"
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut output = Vec::new();
        {
            let mut writer = RecordWriter::<_, Csv>::new(&mut output);
            writer.write(&vec!["1", "gertuves 395, 396.jpg"]).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(output).unwrap().trim_end(), "1,\"gertuves 395, 396.jpg\"");
    }

    #[test]
    fn test_json_lines_ignore_header() {
        let mut output = Vec::new();
        {
            let mut writer = RecordWriter::<_, JsonLines>::new(&mut output);
            writer.write_header(&FileRecord::COLUMNS).unwrap();
            writer.write(&sample_file()).unwrap();
            writer.write(&vec!["a", "b"]).unwrap();
            writer.flush().unwrap();
        }

        let result = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"id\":112,\"status\":1,"));
        assert_eq!(lines[1], "[\"a\",\"b\"]");
    }

    #[test]
    fn test_records_written_counter() {
        let mut output = Vec::new();
        let mut writer = RecordWriter::<_, JsonLines>::new(&mut output);

        assert_eq!(writer.records_written(), 0);
        writer.write(&sample_file()).unwrap();
        assert_eq!(writer.records_written(), 1);
        writer.write(&sample_file()).unwrap();
        assert_eq!(writer.records_written(), 2);
    }
}
