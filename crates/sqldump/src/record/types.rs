//! Запись таблицы `files` и её перечисления.

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{FieldLayout, FromFields, parse_nullable_int, parse_timestamp, unquote};
use crate::error::{ParseError, ParseResult};

/// Статус файла (`status_id`).
///
/// Декодирование из числа не падает: неизвестные коды сохраняются
/// в [`FileStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum FileStatus {
    /// Статус не задан (`0` или `NULL`).
    Unset,
    /// Новый файл.
    New,
    /// Любой другой код.
    Other(i64),
}

impl FileStatus {
    /// Числовой код статуса.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Unset => 0,
            Self::New => 1,
            Self::Other(code) => *code,
        }
    }

    /// Строковое представление статуса.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "UNSET",
            Self::New => "NEW",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<i64> for FileStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Unset,
            1 => Self::New,
            other => Self::Other(other),
        }
    }
}

impl From<FileStatus> for i64 {
    fn from(status: FileStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{}({code})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Тип объекта-владельца файла (`object_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ObjectType {
    /// Тип не задан (`0` или `NULL`).
    Unset,
    /// Файл принадлежит товару.
    Product,
    /// Любой другой код.
    Other(i64),
}

impl ObjectType {
    /// Числовой код типа.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Unset => 0,
            Self::Product => 5,
            Self::Other(code) => *code,
        }
    }

    /// Строковое представление типа.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "UNSET",
            Self::Product => "PRODUCT",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<i64> for ObjectType {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Unset,
            5 => Self::Product,
            other => Self::Other(other),
        }
    }
}

impl From<ObjectType> for i64 {
    fn from(t: ObjectType) -> Self {
        t.code()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{}({code})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Запись таблицы `files`.
///
/// # Пример
///
/// ```
/// use sqldump::record::{FileRecord, FileStatus, FromFields, ObjectType};
/// use sqldump::splitter::split_fields;
///
/// let fields = split_fields(
///     "112, 1, 0, 'A8011204.jpg', '0197836aba9ad1edf126c3bff2e39218.jpg', 1, NULL, 112, 5, \
///      '2010-10-18 21:19:31', '2010-10-18 21:00:12'",
/// )
/// .unwrap();
/// let file = FileRecord::from_fields(&fields).unwrap();
///
/// assert_eq!(file.id, 112);
/// assert_eq!(file.status, FileStatus::New);
/// assert_eq!(file.object_type, ObjectType::Product);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Идентификатор файла.
    pub id: i64,
    /// Статус файла.
    pub status: FileStatus,
    /// Имя файла в хранилище.
    pub unique_name: String,
    /// Идентификатор объекта-владельца.
    pub object_id: i64,
    /// Тип объекта-владельца.
    pub object_type: ObjectType,
    /// Время создания; [`ZERO_TIMESTAMP`](super::ZERO_TIMESTAMP), если в дампе нулевая дата.
    pub created_at: DateTime,
    /// Время последнего изменения.
    pub updated_at: DateTime,
}

impl FileRecord {
    /// Имена столбцов в порядке сериализации.
    pub const COLUMNS: [&'static str; 7] =
        ["id", "status", "unique_name", "object_id", "object_type", "created_at", "updated_at"];

    /// Строит запись по произвольной схеме.
    ///
    /// `NULL` в целых полях даёт `0`, нераспознанные даты —
    /// [`ZERO_TIMESTAMP`](super::ZERO_TIMESTAMP).
    pub fn from_fields_with(fields: &[String], layout: &FieldLayout) -> ParseResult<Self> {
        let required = layout.required_fields();
        if fields.len() < required {
            return Err(ParseError::MissingField { required, found: fields.len() });
        }

        let int = |name: &'static str, index: usize| -> ParseResult<i64> {
            Ok(parse_nullable_int(&fields[index], name, index)?.unwrap_or_default())
        };

        Ok(Self {
            id: int("id", layout.id)?,
            status: FileStatus::from(int("status", layout.status)?),
            unique_name: unquote(&fields[layout.unique_name]).to_string(),
            object_id: int("object_id", layout.object_id)?,
            object_type: ObjectType::from(int("object_type", layout.object_type)?),
            created_at: parse_timestamp(&fields[layout.created_at]),
            updated_at: parse_timestamp(&fields[layout.updated_at]),
        })
    }
}

impl FromFields for FileRecord {
    fn from_fields(fields: &[String]) -> ParseResult<Self> {
        Self::from_fields_with(fields, &FieldLayout::FILES)
    }
}
