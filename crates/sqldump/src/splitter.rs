//! Разбиение одной строки `VALUES (...)` на поля.
//!
//! Строка сканируется слева направо конечным автоматом с двумя
//! состояниями: поиск начала поля и чтение поля. Поле бывает *голым*
//! (цифры или литерал `NULL`) или *в кавычках* (`'...'` / `"..."`).
//! Обратный слэш перед кавычкой не даёт ей закрыть поле и сам
//! остаётся в значении.

use crate::error::{ParseError, ParseResult};

/// Режим чтения текущего поля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMode {
    /// Поле без кавычек, заканчивается запятой или концом строки.
    Bare,
    /// Поле в кавычках, заканчивается той же неэкранированной кавычкой.
    Quoted {
        /// Кавычка, которая закроет поле.
        delimiter: char,
        /// Позиция открывающей кавычки.
        opened_at: usize,
    },
}

/// Состояние автомата.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingField,
    InsideField(FieldMode),
}

/// Разбивает очищенную строку на поля в порядке появления.
///
/// Голые поля обрезаются от пробелов, поля в кавычках возвращаются
/// как есть, без самих кавычек. Лишние запятые между полями
/// игнорируются.
///
/// # Ошибки
///
/// - [`ParseError::MalformedField`] — символ не может начинать поле;
/// - [`ParseError::UnterminatedQuote`] — строка закончилась внутри кавычек.
///
/// # Примеры
///
/// ```
/// use sqldump::splitter::split_fields;
///
/// let fields = split_fields("12615, 'juosta.jpg', NULL").unwrap();
/// assert_eq!(fields, vec!["12615", "juosta.jpg", "NULL"]);
///
/// // Запятые внутри кавычек — часть значения
/// assert_eq!(split_fields("'1,2,3.jpg'").unwrap(), vec!["1,2,3.jpg"]);
///
/// // Идентификатор без кавычек не может начинать поле
/// assert!(split_fields("1, abc").is_err());
/// ```
pub fn split_fields(row: &str) -> ParseResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut buffer = String::new();
    let mut state = State::SeekingField;
    // Only one character of lookback: `\\'` is treated as an escaped quote.
    let mut escaped = false;

    for (position, c) in row.chars().enumerate() {
        state = match state {
            State::SeekingField => seek_field(c, position, escaped, &mut buffer)?,
            State::InsideField(FieldMode::Quoted { delimiter, .. })
                if c == delimiter && !escaped =>
            {
                fields.push(std::mem::take(&mut buffer));
                State::SeekingField
            }
            State::InsideField(FieldMode::Bare) if c == ',' => {
                fields.push(buffer.trim().to_string());
                buffer.clear();
                State::SeekingField
            }
            inside @ State::InsideField(_) => {
                buffer.push(c);
                inside
            }
        };

        escaped = c == '\\';
    }

    match state {
        State::InsideField(FieldMode::Quoted { delimiter, opened_at }) => {
            Err(ParseError::UnterminatedQuote { position: opened_at, quote: delimiter })
        }
        _ => {
            if !buffer.is_empty() {
                fields.push(buffer.trim().to_string());
            }
            Ok(fields)
        }
    }
}

/// Обрабатывает символ в состоянии поиска начала поля.
fn seek_field(c: char, position: usize, escaped: bool, buffer: &mut String) -> ParseResult<State> {
    match c {
        c if c.is_whitespace() => Ok(State::SeekingField),
        '\'' | '"' if !escaped => {
            Ok(State::InsideField(FieldMode::Quoted { delimiter: c, opened_at: position }))
        }
        // Bare fields are numbers or the NULL literal.
        c if c.is_ascii_digit() || c == 'n' || c == 'N' => {
            buffer.push(c);
            Ok(State::InsideField(FieldMode::Bare))
        }
        ',' => Ok(State::SeekingField),
        character => Err(ParseError::MalformedField { position, character }),
    }
}

/// Собирает поля обратно в строку, заключая каждое в одинарные кавычки.
///
/// Значения не экранируются: поле, уже содержащее `\'`, остаётся
/// корректным, так как слэш сохранён при разбиении. Обратная операция
/// к [`split_fields`] для строк из полей в кавычках.
///
/// ```
/// use sqldump::splitter::{join_quoted, split_fields};
///
/// let fields = split_fields("'1', '23.jpg'").unwrap();
/// assert_eq!(join_quoted(&fields), "'1', '23.jpg'");
/// ```
pub fn join_quoted<S: AsRef<str>>(fields: &[S]) -> String {
    fields.iter().map(|f| format!("'{}'", f.as_ref())).collect::<Vec<_>>().join(", ")
}
