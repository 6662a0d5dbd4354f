pub mod ass_to_qrc;
pub mod qrc_to_ass;

pub use ass_to_qrc::AssToQrcConverter;
pub use qrc_to_ass::QrcToAssConverter;

use crate::error::{Error, Result};
use crate::logging::{log_ignored_line, log_skipped_line};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Направление конвертации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ASS с тегами `\k` в QRC
    AssToQrc,
    /// QRC в ASS с тегами `\k`
    QrcToAss,
}

impl Direction {
    /// Определяет направление по расширениям входного и выходного файлов
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Self> {
        let input_ext = extension(input.as_ref());
        let output_ext = extension(output.as_ref());

        // Расширение входного файла важнее выходного
        match (input_ext.as_deref(), output_ext.as_deref()) {
            (Some("ass"), out) if out != Some("ass") => Ok(Self::AssToQrc),
            (Some("qrc"), out) if out != Some("qrc") => Ok(Self::QrcToAss),
            (Some("ass"), _) | (Some("qrc"), _) => Err(Error::InvalidParameters(format!(
                "Input and output have the same format: {}",
                output.as_ref().display()
            ))),
            (_, Some("qrc")) => Ok(Self::AssToQrc),
            (_, Some("ass")) => Ok(Self::QrcToAss),
            _ => Err(Error::InvalidParameters(format!(
                "Cannot infer direction from {} and {}",
                input.as_ref().display(),
                output.as_ref().display()
            ))),
        }
    }

    /// Конвертирует поток в выбранном направлении
    pub fn convert<R: BufRead, W: Write>(self, reader: R, writer: W) -> Result<ConversionStats> {
        match self {
            Self::AssToQrc => convert_stream::<AssToQrcConverter, _, _>(reader, writer),
            Self::QrcToAss => convert_stream::<QrcToAssConverter, _, _>(reader, writer),
        }
    }

    /// Конвертирует файл в выбранном направлении
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(self, input: P, output: Q) -> Result<ConversionStats> {
        match self {
            Self::AssToQrc => convert_file::<AssToQrcConverter, _, _>(input, output),
            Self::QrcToAss => convert_file::<QrcToAssConverter, _, _>(input, output),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "ass2qrc" | "ass-to-qrc" => Ok(Self::AssToQrc),
            "2" | "qrc2ass" | "qrc-to-ass" => Ok(Self::QrcToAss),
            other => Err(Error::InvalidParameters(format!("Unknown direction: {}", other))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssToQrc => write!(f, "ASS -> QRC"),
            Self::QrcToAss => write!(f, "QRC -> ASS"),
        }
    }
}

/// Статистика одной конвертации
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Прочитано строк
    pub lines_read: usize,
    /// Записано сконвертированных строк, без заголовка
    pub lines_written: usize,
    /// Строк, не относящихся к событиям (комментарии, стили, секции)
    pub lines_ignored: usize,
    /// Строк с ошибками разбора
    pub lines_skipped: usize,
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} written, {} ignored, {} skipped",
            self.lines_read, self.lines_written, self.lines_ignored, self.lines_skipped
        )
    }
}

/// Метка порядка байтов, которую нужно убрать из первой строки
const UTF8_BOM: char = '\u{FEFF}';

/// Построчный конвертер одного направления
pub trait LineConverter {
    /// Строки, которые пишутся в начало выходного потока
    const HEADER: &'static [&'static str] = &[];

    /// Конвертирует одну строку
    ///
    /// `Ok(None)` означает строку, которую формат не считает событием.
    /// Восстановимые ошибки приводят к пропуску строки.
    fn convert_line_str(line: &str) -> Result<Option<String>>;
}

/// Конвертирует поток построчно
///
/// Ошибки отдельных строк пропускаются, ошибки ввода/вывода прерывают
/// конвертацию. Уже записанные строки при этом остаются в выходном потоке.
pub fn convert_stream<C: LineConverter, R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
) -> Result<ConversionStats> {
    let mut stats = ConversionStats::default();

    for header_line in C::HEADER {
        writeln!(writer, "{}", header_line)?;
    }

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        stats.lines_read += 1;

        // BOM допустим только перед первой строкой
        let text = if index == 0 {
            line.strip_prefix(UTF8_BOM).unwrap_or(&line)
        } else {
            &line
        };

        match C::convert_line_str(text) {
            Ok(Some(converted)) => {
                writeln!(writer, "{}", converted)?;
                stats.lines_written += 1;
            }
            Ok(None) => {
                log_ignored_line(index + 1);
                stats.lines_ignored += 1;
            }
            Err(e) if e.is_recoverable() => {
                log_skipped_line(index + 1, &e);
                stats.lines_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Конвертирует файл в файл
///
/// Выходной файл создается или перезаписывается. Оба файла закрываются
/// при выходе из функции, в том числе при ошибке.
pub fn convert_file<C: LineConverter, P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<ConversionStats> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    convert_stream::<C, _, _>(reader, writer)
}

/// Конвертирует текст целиком в памяти
pub fn convert_str<C: LineConverter>(content: &str) -> Result<String> {
    let mut output = Vec::new();
    convert_stream::<C, _, _>(content.as_bytes(), &mut output)?;
    String::from_utf8(output).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
