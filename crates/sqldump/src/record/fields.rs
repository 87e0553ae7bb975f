//! Преобразование отдельных полей.

use jiff::civil::{self, DateTime};

use crate::error::{ParseError, ParseResult};

/// Символы, срезаемые со строковых полей.
const FIELD_QUOTES: &[char] = &[' ', '\''];

/// Формат дат в дампах MySQL.
const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Нулевая метка времени, подставляется вместо нераспознанных дат
/// (например, `0000-00-00 00:00:00`).
pub const ZERO_TIMESTAMP: DateTime = civil::datetime(1, 1, 1, 0, 0, 0, 0);

/// Срезает пробелы и одинарные кавычки с обоих концов поля.
///
/// ```
/// assert_eq!(sqldump::record::unquote(" 'a.jpg' "), "a.jpg");
/// ```
#[must_use]
pub fn unquote(field: &str) -> &str {
    field.trim_matches(FIELD_QUOTES)
}

/// Разбирает целое поле; `NULL` в любом регистре даёт `None`.
///
/// `field` и `index` нужны только для текста ошибки.
///
/// ```
/// use sqldump::record::parse_nullable_int;
///
/// assert_eq!(parse_nullable_int(" 42 ", "id", 0).unwrap(), Some(42));
/// assert_eq!(parse_nullable_int("Null", "id", 0).unwrap(), None);
/// assert!(parse_nullable_int("4x", "id", 0).is_err());
/// ```
pub fn parse_nullable_int(
    value: &str,
    field: &'static str,
    index: usize,
) -> ParseResult<Option<i64>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("NULL") {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ParseError::InvalidInteger { field, index, value: value.to_string() })
}

/// Разбирает дату-время; при ошибке возвращает [`ZERO_TIMESTAMP`].
///
/// Принимает формат дампа (`2010-10-18 21:19:31`) и ISO 8601
/// (`2010-10-18T21:19:31`).
#[must_use]
pub fn parse_timestamp(field: &str) -> DateTime {
    let value = unquote(field);
    DateTime::strptime(SQL_DATETIME_FORMAT, value)
        .or_else(|_| value.parse::<DateTime>())
        .unwrap_or(ZERO_TIMESTAMP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_strips_spaces_and_single_quotes_only() {
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("  'abc' "), "abc");
        assert_eq!(unquote("\"abc\""), "\"abc\"");
        assert_eq!(unquote("a b"), "a b");
    }

    #[test]
    fn nullable_int_accepts_null_in_any_case() {
        for null in ["NULL", "null", "Null", "  nUlL "] {
            assert_eq!(parse_nullable_int(null, "status", 1).unwrap(), None);
        }
    }

    #[test]
    fn nullable_int_parses_numbers() {
        assert_eq!(parse_nullable_int("112", "id", 0).unwrap(), Some(112));
        assert_eq!(parse_nullable_int(" 7 ", "id", 0).unwrap(), Some(7));
        assert_eq!(parse_nullable_int("-3", "id", 0).unwrap(), Some(-3));
    }

    #[test]
    fn nullable_int_rejects_garbage() {
        let err = parse_nullable_int("NUL", "object_id", 7).unwrap_err();
        match err {
            ParseError::InvalidInteger { field, index, value } => {
                assert_eq!(field, "object_id");
                assert_eq!(index, 7);
                assert_eq!(value, "NUL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn timestamp_in_dump_format() {
        assert_eq!(
            parse_timestamp("2010-10-18 21:19:31"),
            civil::datetime(2010, 10, 18, 21, 19, 31, 0)
        );
    }

    #[test]
    fn timestamp_in_iso_format() {
        assert_eq!(
            parse_timestamp("'2015-04-21T06:31:44'"),
            civil::datetime(2015, 4, 21, 6, 31, 44, 0)
        );
    }

    #[test]
    fn zero_date_becomes_sentinel() {
        assert_eq!(parse_timestamp("0000-00-00 00:00:00"), ZERO_TIMESTAMP);
        assert_eq!(parse_timestamp("NULL"), ZERO_TIMESTAMP);
        assert_eq!(parse_timestamp(""), ZERO_TIMESTAMP);
    }
}
