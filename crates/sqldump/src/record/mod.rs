//! Отображение массива полей в типизированные записи.
//!
//! Splitter ничего не знает о схеме: он возвращает поля в порядке
//! появления. Смысл позиций задаёт вызывающая сторона через
//! [`FromFields`] и [`FieldLayout`].

mod fields;
mod layout;
mod types;

pub use fields::{ZERO_TIMESTAMP, parse_nullable_int, parse_timestamp, unquote};
pub use layout::FieldLayout;
pub use types::{FileRecord, FileStatus, ObjectType};

use crate::error::ParseResult;

/// Построение записи из массива полей одной строки.
pub trait FromFields: Sized {
    /// Отображает поля в запись.
    ///
    /// # Ошибки
    ///
    /// [`ParseError::MissingField`](crate::ParseError::MissingField), если полей
    /// меньше, чем нужно, и
    /// [`ParseError::InvalidInteger`](crate::ParseError::InvalidInteger) для
    /// нечисловых целых полей.
    fn from_fields(fields: &[String]) -> ParseResult<Self>;
}

/// Сырые поля без отображения.
impl FromFields for Vec<String> {
    fn from_fields(fields: &[String]) -> ParseResult<Self> {
        Ok(fields.to_vec())
    }
}
