use thiserror::Error;

/// Типы ошибок, которые могут возникнуть при конвертации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Ошибка ввода/вывода
    Io,
    /// Неверная временная метка ASS
    MalformedTimestamp,
    /// Строка Dialogue без обязательных полей
    MalformedDialogue,
    /// Строка QRC без заголовка `[start,duration]`
    MalformedHeader,
    /// Заголовок QRC без закрывающей скобки
    MissingCloseBracket,
    /// Тег времени слова QRC вне диапазона
    MalformedWordTag,
    /// Отрицательное время или длительность
    InvalidDuration,
    /// Неверные параметры
    InvalidParameters,
}

/// Ошибки, которые могут возникнуть при конвертации
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ошибка ввода/вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Неверная временная метка: {0}")]
    MalformedTimestamp(String),

    #[error("Неверная строка Dialogue: {0}")]
    MalformedDialogue(String),

    #[error("Неверный заголовок QRC: {0}")]
    MalformedHeader(String),

    #[error("В заголовке QRC нет закрывающей скобки: {0}")]
    MissingCloseBracket(String),

    #[error("Неверный тег времени слова QRC: {0}")]
    MalformedWordTag(String),

    #[error("Недопустимая длительность: {0}")]
    InvalidDuration(String),

    #[error("Неверные параметры: {0}")]
    InvalidParameters(String),

    #[error("Ошибка логирования: {0}")]
    LoggedError(String),
}

impl Error {
    /// Создает новую ошибку указанного типа с сообщением
    pub fn new(error_type: ErrorType, message: &str) -> Self {
        match error_type {
            ErrorType::Io => Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message)),
            ErrorType::MalformedTimestamp => Self::MalformedTimestamp(message.to_string()),
            ErrorType::MalformedDialogue => Self::MalformedDialogue(message.to_string()),
            ErrorType::MalformedHeader => Self::MalformedHeader(message.to_string()),
            ErrorType::MissingCloseBracket => Self::MissingCloseBracket(message.to_string()),
            ErrorType::MalformedWordTag => Self::MalformedWordTag(message.to_string()),
            ErrorType::InvalidDuration => Self::InvalidDuration(message.to_string()),
            ErrorType::InvalidParameters => Self::InvalidParameters(message.to_string()),
        }
    }

    /// Ошибка относится к одной строке: строку пропускаем, конвертация продолжается
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedTimestamp(_)
                | Self::MalformedDialogue(_)
                | Self::MalformedHeader(_)
                | Self::MissingCloseBracket(_)
                | Self::MalformedWordTag(_)
                | Self::InvalidDuration(_)
        )
    }
}

/// Результат с обработкой ошибок
pub type Result<T> = std::result::Result<T, Error>;
