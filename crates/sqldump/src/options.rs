//! Настройки извлечения строк.

/// Символы, обрамляющие строку кортежа: `(f1, f2),` или `(f1, f2);`.
pub const ROW_DELIMITERS: &[char] = &['(', ')', ',', ';'];

/// Ключевые слова, с которых начинаются строки-операторы в дампе.
const STATEMENT_KEYWORDS: &[&str] = &[
    "INSERT", "REPLACE", "CREATE", "DROP", "LOCK", "UNLOCK", "SET", "USE", "ALTER", "START",
    "COMMIT",
];

/// Настройки [`RowExtractor`](crate::extractor::RowExtractor).
///
/// # Пример
///
/// ```
/// use sqldump::options::ExtractOptions;
///
/// let options = ExtractOptions::default().min_line_len(8).skip_statements(true);
/// assert_eq!(options.clean_line("  (1, 2),\n"), None);
/// assert_eq!(options.clean_line("(10, 20),"), Some("10, 20"));
/// assert_eq!(options.clean_line("INSERT INTO `files` VALUES"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    min_line_len: usize,
    skip_statements: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { min_line_len: 10, skip_statements: false }
    }
}

impl ExtractOptions {
    /// Строки длиной (в символах, после обрезки пробелов) не больше
    /// этого порога пропускаются.
    #[must_use]
    pub fn min_line_len(mut self, len: usize) -> Self {
        self.min_line_len = len;
        self
    }

    /// Пропускать строки-операторы (`INSERT INTO ...`, `LOCK TABLES ...`, `/*!...*/`).
    #[must_use]
    pub fn skip_statements(mut self, skip: bool) -> Self {
        self.skip_statements = skip;
        self
    }

    /// Текущий порог длины строки.
    #[must_use]
    pub fn line_len_threshold(&self) -> usize {
        self.min_line_len
    }

    /// Пропускаются ли строки-операторы.
    #[must_use]
    pub fn skips_statements(&self) -> bool {
        self.skip_statements
    }

    /// Определяет, почему строку нужно пропустить, если нужно.
    #[must_use]
    pub fn skip_reason(&self, line: &str) -> Option<SkipReason> {
        let line = line.trim();
        if line.chars().count() <= self.min_line_len {
            Some(SkipReason::TooShort)
        } else if line.starts_with(['-', '#']) {
            Some(SkipReason::Comment)
        } else if self.skip_statements && is_statement(line) {
            Some(SkipReason::Statement)
        } else {
            None
        }
    }

    /// Очищает строку: обрезает пробелы и разделители кортежа.
    ///
    /// Возвращает `None` для строк, которые нужно пропустить.
    #[must_use]
    pub fn clean_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.skip_reason(line).is_some() {
            return None;
        }
        Some(line.trim().trim_matches(ROW_DELIMITERS))
    }
}

/// Причина пропуска строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Пустая или слишком короткая строка.
    TooShort,
    /// Комментарий (`--` или `#`).
    Comment,
    /// Оператор SQL, а не кортеж значений.
    Statement,
}

impl SkipReason {
    /// Строковое представление для логов.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "too short",
            Self::Comment => "comment",
            Self::Statement => "statement",
        }
    }
}

fn is_statement(line: &str) -> bool {
    if line.starts_with("/*") {
        return true;
    }
    let word: String = line.chars().take_while(char::is_ascii_alphabetic).collect();
    STATEMENT_KEYWORDS.iter().any(|kw| word.eq_ignore_ascii_case(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_short_lines() {
        let options = ExtractOptions::default();
        assert_eq!(options.skip_reason(""), Some(SkipReason::TooShort));
        assert_eq!(options.skip_reason(" "), Some(SkipReason::TooShort));
        assert_eq!(options.skip_reason("(1, 2, 3),"), Some(SkipReason::TooShort));
        assert_eq!(options.skip_reason("(1, 2, 34),"), None);
    }

    #[test]
    fn threshold_counts_characters_not_bytes() {
        let options = ExtractOptions::default().min_line_len(3);
        assert_eq!(options.skip_reason("'ąčę'"), None);
        assert_eq!(options.skip_reason("'ą'"), Some(SkipReason::TooShort));
    }

    #[test]
    fn skips_comments() {
        let options = ExtractOptions::default();
        assert_eq!(options.skip_reason("-- Should be skipped"), Some(SkipReason::Comment));
        assert_eq!(options.skip_reason("#Should be skipped"), Some(SkipReason::Comment));
        assert_eq!(options.skip_reason("   # indented comment"), Some(SkipReason::Comment));
    }

    #[test]
    fn statements_are_only_skipped_when_enabled() {
        let line = "INSERT INTO `files` (`id`, `status_id`) VALUES";
        assert_eq!(ExtractOptions::default().skip_reason(line), None);

        let options = ExtractOptions::default().skip_statements(true);
        assert_eq!(options.skip_reason(line), Some(SkipReason::Statement));
        assert_eq!(options.skip_reason("LOCK TABLES `files` WRITE;"), Some(SkipReason::Statement));
        assert_eq!(options.skip_reason("/*!40000 ALTER TABLE `files` */;"), Some(SkipReason::Statement));
        assert_eq!(options.skip_reason("set names utf8mb4;"), Some(SkipReason::Statement));
        assert_eq!(options.skip_reason("(1, 2, 0, 'a.jpg'),"), None);
    }

    #[test]
    fn getters_reflect_builder() {
        let options = ExtractOptions::default();
        assert_eq!(options.line_len_threshold(), 10);
        assert!(!options.skips_statements());

        let options = options.min_line_len(3).skip_statements(true);
        assert_eq!(options.line_len_threshold(), 3);
        assert!(options.skips_statements());
    }

    #[test]
    fn null_row_is_not_a_statement() {
        let options = ExtractOptions::default().skip_statements(true);
        assert_eq!(options.skip_reason("NULL, NULL, 'abc.jpg'"), None);
    }

    #[test]
    fn clean_line_trims_row_delimiters() {
        let options = ExtractOptions::default();
        assert_eq!(
            options.clean_line("  (550, 1, 'Daily_Mini.jpg');  "),
            Some("550, 1, 'Daily_Mini.jpg'")
        );
        assert_eq!(options.clean_line("11087, 2, NULL, 'a.jpg'"), Some("11087, 2, NULL, 'a.jpg'"));
        assert_eq!(options.clean_line("-- (1, 2, 3, 4, 5),"), None);
    }
}
