//! Позиционная схема таблицы `files`.

/// Индексы полей записи [`FileRecord`](super::FileRecord) в строке дампа.
///
/// Неиспользуемые столбцы (оригинальное имя файла, флаги и т.п.) просто
/// не упоминаются в схеме.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub id: usize,
    pub status: usize,
    pub unique_name: usize,
    pub object_id: usize,
    pub object_type: usize,
    pub updated_at: usize,
    pub created_at: usize,
}

impl FieldLayout {
    /// Схема из 11 столбцов:
    /// `id, status_id, _, name, unique_name, _, _, object_id, object_type, updated_at, created_at`.
    pub const FILES: Self = Self {
        id: 0,
        status: 1,
        unique_name: 4,
        object_id: 7,
        object_type: 8,
        updated_at: 9,
        created_at: 10,
    };

    /// Минимальное число полей в строке для этой схемы.
    ///
    /// ```
    /// use sqldump::record::FieldLayout;
    ///
    /// assert_eq!(FieldLayout::FILES.required_fields(), 11);
    /// ```
    #[must_use]
    pub fn required_fields(&self) -> usize {
        [
            self.id,
            self.status,
            self.unique_name,
            self.object_id,
            self.object_type,
            self.updated_at,
            self.created_at,
        ]
        .into_iter()
        .max()
        .map_or(0, |max| max + 1)
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::FILES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_layout_requires_highest_index() {
        let layout = FieldLayout {
            id: 0,
            status: 1,
            unique_name: 2,
            object_id: 3,
            object_type: 4,
            updated_at: 6,
            created_at: 5,
        };
        assert_eq!(layout.required_fields(), 7);
    }
}
