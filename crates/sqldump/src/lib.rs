//! Потоковый разбор строк SQL-дампа `INSERT ... VALUES (...)`.
//!
//! Крейт превращает строки дампа (по одному кортежу `VALUES` на строку)
//! в типизированные записи без полноценной SQL-грамматики:
//!
//! - [`splitter`] — конечный автомат, разбивающий одну строку на поля
//!   (голые `123` / `NULL` и строки в `'...'` / `"..."` с `\`-экранированием);
//! - [`extractor`] — ленивый итератор по строкам источника: пропуск
//!   комментариев и пустых строк, разбиение, отображение в запись;
//! - [`record`] — запись таблицы `files` и позиционная схема полей;
//! - [`writer`] — вывод записей в CSV или JSON Lines.
//!
//! # Быстрый старт
//!
//! ```
//! use std::io::Cursor;
//!
//! use sqldump::prelude::*;
//!
//! let dump = "\
//! -- Dumping data for table `files`
//! (112, 1, 0, 'A8011204.jpg', '0197836aba9ad1edf126c3bff2e39218.jpg', 1, NULL, 112, 5, '2010-10-18 21:19:31', '2010-10-18 21:00:12'),
//! (550, 1, 0, 'Daily_Mini.jpg', '976414e4073ce80a15d4702f969596bf.jpg', 1, NULL, 550, 6, '2010-10-18 08:56:44', '0000-00-00 00:00:00');
//! ";
//!
//! let files: Vec<FileRecord> = RowExtractor::new(Cursor::new(dump))
//!     .collect::<Result<_, ExtractError>>()
//!     .unwrap();
//!
//! assert_eq!(files.len(), 2);
//! assert_eq!(files[0].object_type, ObjectType::Product);
//! assert_eq!(files[1].created_at, ZERO_TIMESTAMP);
//! ```

pub mod error;
pub mod extractor;
pub mod options;
pub mod record;
pub mod splitter;
pub mod writer;

pub use error::{ExtractError, ParseError, ParseResult, WriteError};
pub use extractor::{RowExtractor, extract_files};
pub use record::{FileRecord, FileStatus, FromFields, ObjectType};

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        error::{ExtractError, ParseError, ParseResult, WriteError},
        extractor::{RowExtractor, extract_files},
        options::ExtractOptions,
        record::{FieldLayout, FileRecord, FileStatus, FromFields, ObjectType, ZERO_TIMESTAMP},
        splitter::{join_quoted, split_fields},
        writer::{Csv, JsonLines, OutputFormat, RecordFormat, RecordWriter},
    };
}
