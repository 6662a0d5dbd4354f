use log::{debug, error, info, trace, warn, LevelFilter, Log, Record};
use env_logger::Builder;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Once;

use crate::convert::{ConversionStats, Direction};
use crate::error::Error;

static INIT: Once = Once::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Пишет запись лога в формате `<время> [LEVEL] - сообщение`
fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record) -> io::Result<()> {
    writeln!(
        out,
        "{} [{}] - {}",
        chrono::Local::now().format(TIME_FORMAT),
        record.level(),
        record.args()
    )
}

/// Логгер для тестов: stdout перехватывается test harness
struct TestLogger {
    level: LevelFilter,
}

impl Log for TestLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = write_record(&mut io::stdout().lock(), record);
        }
    }

    fn flush(&self) {}
}

/// Настраивает логирование для библиотеки и CLI
///
/// `RUST_LOG` переопределяет переданный уровень. Повторный вызов не меняет
/// уже установленный логгер.
pub fn setup_logging(level: LevelFilter) {
    let mut builder = Builder::new();

    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| write_record(buf, record));

    if builder.try_init().is_ok() {
        debug!("Логирование настроено с уровнем: {}", level);
    }
}

/// Настраивает логирование для тестов
pub fn setup_test_logging(level: LevelFilter) {
    INIT.call_once(|| {
        if log::set_boxed_logger(Box::new(TestLogger { level })).is_ok() {
            log::set_max_level(level);
        }
    });
}

/// Логирует ошибку и возвращает её
pub fn log_error<T, E: std::fmt::Display>(err: E, message: &str) -> Result<T, Error> {
    let error_message = format!("{}: {}", message, err);
    error!("{}", error_message);
    Err(Error::LoggedError(error_message))
}

/// Логирует начало конвертации; для потоков пути не указываются
pub fn log_conversion_started(direction: Direction, paths: Option<(&Path, &Path)>) {
    match paths {
        Some((input, output)) => info!(
            "Начало конвертации {}: {} -> {}",
            direction,
            input.display(),
            output.display()
        ),
        None => info!("Начало конвертации {}", direction),
    }
}

/// Логирует итог конвертации
pub fn log_conversion_finished(direction: Direction, stats: &ConversionStats) {
    if stats.lines_skipped > 0 {
        warn!("Пропущено строк с ошибками: {}", stats.lines_skipped);
    }
    info!("Конвертация {} завершена: {}", direction, stats);
}

/// Логирует строку, которую формат не считает событием
pub fn log_ignored_line(line_number: usize) {
    trace!("Строка {} не является событием", line_number);
}

/// Логирует пропущенную строку входного файла
pub fn log_skipped_line(line_number: usize, reason: &Error) {
    debug!("Строка {} пропущена: {}", line_number, reason);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use log::Level;

    #[test]
    fn test_write_record_format() {
        let mut buf = Vec::new();
        write_record(
            &mut buf,
            &Record::builder()
                .args(format_args!("Строка 3 пропущена"))
                .level(Level::Warn)
                .build(),
        )
        .unwrap();

        // Время в начале меняется, проверяем только хвост записи
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with(" [WARN] - Строка 3 пропущена\n"));
        assert_eq!(line.len(), "2024-01-01 00:00:00".len() + " [WARN] - Строка 3 пропущена\n".len());
    }

    #[test]
    fn test_log_error_wraps_message() {
        let result: Result<(), Error> = log_error("disk full", "Не удалось записать файл");

        match result {
            Err(Error::LoggedError(msg)) => {
                assert_eq!(msg, "Не удалось записать файл: disk full");
            }
            _ => panic!("Expected LoggedError"),
        }
    }

    #[test]
    fn test_helpers_do_not_panic() {
        setup_test_logging(LevelFilter::Trace);

        let stats = ConversionStats {
            lines_read: 3,
            lines_written: 1,
            lines_ignored: 1,
            lines_skipped: 1,
        };
        log_conversion_started(Direction::AssToQrc, None);
        log_conversion_started(
            Direction::QrcToAss,
            Some((Path::new("song.qrc"), Path::new("song.ass"))),
        );
        log_ignored_line(1);
        log_skipped_line(2, &Error::new(ErrorType::MalformedHeader, "[ti:Title]"));
        log_conversion_finished(Direction::QrcToAss, &stats);
    }
}
