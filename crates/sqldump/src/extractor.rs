//! Потоковое извлечение записей из строк дампа.
//!
//! Предоставляет [`RowExtractor`] — итератор, который читает строки
//! из любого источника, реализующего [`Read`], и превращает каждую
//! строку-кортеж в запись.

use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Read},
    marker::PhantomData,
};

use tracing::{debug, error, trace};

use crate::{
    error::{ExtractError, render_fields},
    options::ExtractOptions,
    record::{FileRecord, FromFields},
    splitter::split_fields,
};

/// Потоковый извлекатель записей.
///
/// На каждую строку: обрезка пробелов, пропуск пустых строк и
/// комментариев, обрезка `(`, `)`, `,`, `;` по краям, разбиение на поля
/// и отображение полей в `T`.
///
/// Первая же ошибка завершает извлечение: итератор отдаёт
/// `Some(Err(_))`, после чего возвращает только `None`.
///
/// # Type Parameters
///
/// - `R`: источник строк (реализует [`Read`])
/// - `T`: тип записи (реализует [`FromFields`]), по умолчанию [`FileRecord`]
///
/// # Пример
///
/// ```
/// use std::io::Cursor;
///
/// use sqldump::extractor::RowExtractor;
/// use sqldump::record::FileRecord;
///
/// let dump = "-- files\n\
///     (112, 1, 0, 'A8011204.jpg', '0197836aba9ad1edf126c3bff2e39218.jpg', 1, NULL, 112, 5, '2010-10-18 21:19:31', '2010-10-18 21:00:12'),\n";
///
/// let mut extractor = RowExtractor::<_, FileRecord>::new(Cursor::new(dump));
/// let file = extractor.next().unwrap().unwrap();
/// assert_eq!(file.id, 112);
/// assert!(extractor.next().is_none());
/// assert_eq!(extractor.lines_skipped(), 1);
/// ```
pub struct RowExtractor<R, T = FileRecord> {
    inner: BufReader<R>,
    options: ExtractOptions,
    /// Байты текущей строки.
    buf: Vec<u8>,
    /// Текущая строка после декодирования.
    line: String,
    /// Сколько строк прочитано из источника.
    lines_read: usize,
    /// Счётчик извлечённых записей.
    records_read: usize,
    /// Счётчик пропущенных строк.
    lines_skipped: usize,
    /// Флаг достижения EOF или ошибки.
    finished: bool,
    _record: PhantomData<T>,
}

impl<R: Read, T: FromFields> RowExtractor<R, T> {
    /// Создаёт извлекатель с настройками по умолчанию.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ExtractOptions::default())
    }

    /// Создаёт извлекатель с указанными настройками.
    pub fn with_options(reader: R, options: ExtractOptions) -> Self {
        Self {
            inner: BufReader::new(reader),
            options,
            buf: Vec::new(),
            line: String::new(),
            lines_read: 0,
            records_read: 0,
            lines_skipped: 0,
            finished: false,
            _record: PhantomData,
        }
    }

    /// Количество успешно извлечённых записей.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Количество пропущенных строк (пустые, комментарии, операторы).
    #[must_use]
    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }

    /// Количество прочитанных строк.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Получает ссылку на внутренний reader.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Извлекает внутренний reader.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn fail(&mut self, err: ExtractError) -> Option<Result<T, ExtractError>> {
        self.finished = true; // Остановка при ошибке
        error!(
            line = err.line(),
            raw = err.raw(),
            fields = %render_fields(err.fields()),
            "{}",
            err.kind()
        );
        Some(Err(err))
    }
}

impl<R: Read, T: FromFields> Iterator for RowExtractor<R, T> {
    type Item = Result<T, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buf.clear();
            let line_no = self.lines_read;
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    debug!(
                        records = self.records_read,
                        skipped = self.lines_skipped,
                        lines = self.lines_read,
                        "end of dump"
                    );
                    return None;
                }
                Ok(_) => self.lines_read += 1,
                Err(e) => {
                    let raw = String::from_utf8_lossy(&self.buf).into_owned();
                    return self.fail(ExtractError::io(line_no, raw, e));
                }
            }

            // Невалидный UTF-8 (например, Latin-1) заменяется на U+FFFD
            self.line.clear();
            let decoded = String::from_utf8_lossy(&self.buf);
            if matches!(decoded, Cow::Owned(_)) {
                debug!(line = line_no, "invalid UTF-8 replaced");
            }
            self.line.push_str(&decoded);

            let raw = self.line.trim_end_matches(['\r', '\n']);
            let Some(row) = self.options.clean_line(raw) else {
                let reason = self.options.skip_reason(raw).map_or("", |r| r.as_str());
                trace!(line = line_no, reason, "skipping line");
                self.lines_skipped += 1;
                continue;
            };

            let fields = match split_fields(row) {
                Ok(fields) => fields,
                Err(e) => {
                    let err = ExtractError::new(line_no, raw, row, Vec::new(), e);
                    return self.fail(err);
                }
            };

            match T::from_fields(&fields) {
                Ok(record) => {
                    self.records_read += 1;
                    return Some(Ok(record));
                }
                Err(e) => {
                    let err = ExtractError::new(line_no, raw, row, fields, e);
                    return self.fail(err);
                }
            }
        }
        None
    }
}

/// Извлекает все записи `files` из источника.
///
/// Останавливается на первой ошибке; частичный результат не возвращается.
///
/// ```
/// use std::io::Cursor;
///
/// let dump = "(550, 1, 0, 'Daily_Mini.jpg', '976414e4073ce80a15d4702f969596bf.jpg', 1, NULL, 550, 6, '2010-10-18 08:56:44', '0000-00-00 00:00:00');\n";
/// let files = sqldump::extract_files(Cursor::new(dump)).unwrap();
/// assert_eq!(files[0].id, 550);
/// ```
pub fn extract_files<R: Read>(reader: R) -> Result<Vec<FileRecord>, ExtractError> {
    RowExtractor::<_, FileRecord>::new(reader).collect()
}
