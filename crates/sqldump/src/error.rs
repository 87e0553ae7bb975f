//! Модуль ошибок разбора SQL-дампа.

use std::fmt::Write as _;

use thiserror::Error;

/// Ошибка разбора одной строки дампа.
///
/// Покрывает ошибки токенизации строки на поля ([`split_fields`]) и
/// отображения массива полей в запись ([`FromFields`]).
///
/// [`split_fields`]: crate::splitter::split_fields
/// [`FromFields`]: crate::record::FromFields
#[derive(Debug, Error)]
pub enum ParseError {
    // === I/O ошибки ===
    /// Ошибка ввода/вывода при чтении источника строк.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Ошибки токенизации ===
    /// Символ стоит там, где ожидается начало поля.
    #[error("SQL field has incorrect symbol `{character}` at position {position}")]
    MalformedField {
        /// Позиция символа в строке (0-based, в символах).
        position: usize,
        /// Сам символ.
        character: char,
    },

    /// Строка закончилась внутри поля в кавычках.
    #[error("Unterminated {quote} quoted field starting at position {position}")]
    UnterminatedQuote {
        /// Позиция открывающей кавычки (0-based, в символах).
        position: usize,
        /// Открывающая кавычка.
        quote: char,
    },

    // === Ошибки отображения в запись ===
    /// Полей меньше, чем требует схема.
    #[error("Missing fields: schema requires {required}, got {found}")]
    MissingField {
        /// Сколько полей требует схема.
        required: usize,
        /// Сколько полей получено.
        found: usize,
    },

    /// Целочисленное поле не является ни числом, ни `NULL`.
    #[error("Invalid integer for {field} (field #{index}): '{value}'")]
    InvalidInteger {
        /// Имя атрибута записи.
        field: &'static str,
        /// Индекс поля в строке.
        index: usize,
        /// Фактическое значение.
        value: String,
    },
}

impl ParseError {
    /// Позиция символа, на котором обнаружена ошибка, если она известна.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedField { position, .. } | Self::UnterminatedQuote { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

/// Удобный alias для Result с ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

/// Фатальная ошибка извлечения записей из потока строк.
///
/// Оборачивает [`ParseError`] контекстом, нужным для диагностики:
/// номер строки, исходный текст строки, очищенная строка, которая
/// передавалась на разбиение, и массив полей, если разбиение успело пройти.
#[derive(Debug, Error)]
#[error("Error parsing line #{line}: {source}")]
pub struct ExtractError {
    line: usize,
    raw: String,
    row: String,
    fields: Vec<String>,
    #[source]
    source: ParseError,
}

impl ExtractError {
    pub(crate) fn new(
        line: usize,
        raw: impl Into<String>,
        row: impl Into<String>,
        fields: Vec<String>,
        source: ParseError,
    ) -> Self {
        Self { line, raw: raw.into(), row: row.into(), fields, source }
    }

    pub(crate) fn io(line: usize, raw: impl Into<String>, err: std::io::Error) -> Self {
        Self::new(line, raw, String::new(), Vec::new(), ParseError::Io(err))
    }

    /// Номер строки во входном потоке (0-based).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Исходный текст строки (без перевода строки).
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Строка после обрезки разделителей — то, что получил splitter.
    #[must_use]
    pub fn row(&self) -> &str {
        &self.row
    }

    /// Поля строки. Пусто, если ошибка случилась до или во время разбиения.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Причина ошибки.
    #[must_use]
    pub fn kind(&self) -> &ParseError {
        &self.source
    }

    /// Извлекает причину ошибки.
    pub fn into_kind(self) -> ParseError {
        self.source
    }

    /// Многострочный отчёт для вывода пользователю.
    ///
    /// ```text
    /// Error parsing line #3: SQL field has incorrect symbol `x` at position 5
    /// 1, 2, x, 4
    ///       ^
    /// ```
    ///
    /// Для ошибок отображения вместо указателя выводится массив полей
    /// в виде `index: `value``.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{self}");
        if !self.row.is_empty() {
            let _ = writeln!(out, "{}", self.row);
        }
        if let Some(pos) = self.source.position() {
            let _ = writeln!(out, "{:>width$}", "^", width = pos + 1);
        }
        if !self.fields.is_empty() {
            let _ = writeln!(out, "Split SQL:");
            out.push_str(&render_fields(&self.fields));
        }
        out
    }
}

/// Рендерит массив полей построчно: `index:  `value``.
pub(crate) fn render_fields(fields: &[String]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        let _ = writeln!(out, "{i}:  `{field}`");
    }
    out
}

/// Ошибка записи результата.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации в CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Ошибка сериализации в JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_points_at_malformed_character() {
        let err = ExtractError::new(
            3,
            "(1, 2, x, 4),",
            "1, 2, x, 4",
            Vec::new(),
            ParseError::MalformedField { position: 6, character: 'x' },
        );

        let report = err.report();
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("Error parsing line #3"));
        assert_eq!(lines[1], "1, 2, x, 4");
        assert_eq!(lines[2], "      ^");
    }

    #[test]
    fn report_lists_split_fields() {
        let err = ExtractError::new(
            0,
            "(abc),",
            "'abc'",
            vec!["abc".to_string()],
            ParseError::MissingField { required: 11, found: 1 },
        );

        let report = err.report();
        assert!(report.contains("Split SQL:"));
        assert!(report.contains("0:  `abc`"));
        assert!(!report.contains('^'));
    }

    #[test]
    fn io_error_keeps_line_number() {
        let err = ExtractError::io(7, "(1, 2", std::io::Error::other("boom"));
        assert_eq!(err.line(), 7);
        assert_eq!(err.raw(), "(1, 2");
        assert!(matches!(err.kind(), ParseError::Io(_)));
        assert!(matches!(err.into_kind(), ParseError::Io(e) if e.to_string() == "boom"));
    }
}
