/// Слог или слово караоке с длительностью подсветки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KaraokeWord {
    /// Текст слога без изменений
    pub text: String,
    /// Длительность в миллисекундах
    pub duration_ms: i64,
}

impl KaraokeWord {
    /// Создает новый слог
    pub fn new(text: impl Into<String>, duration_ms: i64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
        }
    }
}

/// Строка диалога: границы строки и слоги в порядке следования
///
/// Начало каждого слога не хранится: оно равно началу строки плюс
/// сумма длительностей предыдущих слогов.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    /// Время начала строки в миллисекундах
    pub start_ms: i64,
    /// Время окончания строки в миллисекундах
    pub end_ms: i64,
    /// Слоги
    pub words: Vec<KaraokeWord>,
}

impl DialogueLine {
    /// Создает новую строку диалога
    pub fn new(start_ms: i64, end_ms: i64, words: Vec<KaraokeWord>) -> Self {
        Self {
            start_ms,
            end_ms,
            words,
        }
    }

    /// Длительность строки. Для некорректного входа может быть отрицательной.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Слово QRC с собственным абсолютным временем начала
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrcWordTag {
    /// Текст слова, включая хвостовые пробелы
    pub text: String,
    /// Время начала в миллисекундах
    pub start_ms: i64,
    /// Длительность в миллисекундах
    pub duration_ms: i64,
}

impl QrcWordTag {
    pub fn new(text: impl Into<String>, start_ms: i64, duration_ms: i64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            duration_ms,
        }
    }

    /// Время окончания слова
    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.duration_ms
    }
}

/// Строка QRC: заголовок `[start,duration]` и слова
///
/// Все значения времени читаются как `u32`, поэтому суммы не переполняют `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QrcLine {
    pub start_ms: i64,
    pub duration_ms: i64,
    pub words: Vec<QrcWordTag>,
    /// Текст после последнего тега времени, не привязанный ни к одному слову
    pub trailing_text: String,
}

impl QrcLine {
    /// Время окончания строки
    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_line_duration() {
        let line = DialogueLine::new(1000, 2500, vec![KaraokeWord::new("Hi", 500)]);
        assert_eq!(line.duration_ms(), 1500);

        let reversed = DialogueLine::new(2000, 1000, Vec::new());
        assert_eq!(reversed.duration_ms(), -1000);
    }

    #[test]
    fn test_qrc_end_times() {
        let word = QrcWordTag::new("there ", 500, 300);
        assert_eq!(word.end_ms(), 800);

        let line = QrcLine {
            start_ms: 0,
            duration_ms: 1000,
            words: vec![word],
            trailing_text: String::new(),
        };
        assert_eq!(line.end_ms(), 1000);
        assert_eq!(QrcLine::default().end_ms(), 0);
    }
}
