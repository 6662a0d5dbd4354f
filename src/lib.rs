pub mod error;
pub mod logging;
pub mod timecode;
pub mod models;
pub mod ass;
pub mod qrc;
pub mod convert;

pub use error::{Error, Result, ErrorType};
pub use logging::{
    setup_logging, setup_test_logging, log_error, log_conversion_started, log_conversion_finished
};
pub use timecode::{format_timestamp, parse_timestamp};
pub use models::{DialogueLine, KaraokeWord, QrcLine, QrcWordTag};
pub use ass::AssLineParser;
pub use qrc::QrcLineParser;
pub use convert::{
    AssToQrcConverter, QrcToAssConverter, ConversionStats, Direction, LineConverter
};

use std::io::{BufRead, Write};
use std::path::Path;

/// Настройки конвертации
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Уровень логирования
    pub log_level: log::LevelFilter,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            log_level: log::LevelFilter::Info,
        }
    }
}

/// Основной интерфейс конвертации между ASS и QRC
pub struct KaraokeConverter {
    options: ConvertOptions,
}

impl KaraokeConverter {
    /// Создает новый экземпляр с заданными настройками
    pub fn new(options: ConvertOptions) -> Self {
        #[cfg(test)]
        {
            setup_test_logging(options.log_level);
        }
        #[cfg(not(test))]
        {
            setup_logging(options.log_level);
        }

        log::debug!("Создан новый экземпляр KaraokeConverter с настройками: {:?}", options);

        Self { options }
    }

    /// Устанавливает уровень логирования
    pub fn with_log_level(mut self, level: log::LevelFilter) -> Self {
        self.options.log_level = level;
        log::set_max_level(level);
        log::debug!("Установлен уровень логирования: {}", level);
        self
    }

    /// Текущие настройки
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Конвертирует файл в выбранном направлении
    ///
    /// Ошибки отдельных строк приводят к пропуску строки. Ошибка ввода/вывода
    /// прерывает конвертацию, а частично записанный выходной файл остается как есть.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        direction: Direction,
        input: P,
        output: Q,
    ) -> Result<ConversionStats> {
        let input = input.as_ref();
        let output = output.as_ref();
        log_conversion_started(direction, Some((input, output)));

        let result = direction.convert_file(input, output);
        self.report(direction, result)
    }

    /// Конвертирует поток в выбранном направлении
    pub fn convert<R: BufRead, W: Write>(
        &self,
        direction: Direction,
        reader: R,
        writer: W,
    ) -> Result<ConversionStats> {
        log_conversion_started(direction, None);
        let result = direction.convert(reader, writer);
        self.report(direction, result)
    }

    fn report(&self, direction: Direction, result: Result<ConversionStats>) -> Result<ConversionStats> {
        match result {
            Ok(stats) => {
                log_conversion_finished(direction, &stats);
                Ok(stats)
            }
            Err(e) => {
                let _ = log_error::<(), _>(&e, &format!("Ошибка конвертации {}", direction));
                Err(e)
            }
        }
    }
}

impl Default for KaraokeConverter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}
