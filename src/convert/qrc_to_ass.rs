use crate::convert::{self, ConversionStats, LineConverter};
use crate::error::Result;
use crate::models::QrcLine;
use crate::qrc::QrcLineParser;
use crate::timecode::format_timestamp;
use std::io::{BufRead, Write};
use std::path::Path;

/// Заголовок секции событий ASS
pub const EVENTS_HEADER: [&str; 2] = [
    "[Events]",
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text",
];

/// Текст тега-заполнителя для паузы между словами
const GAP_FILLER_TEXT: &str = " ";

/// Конвертер QRC -> ASS
///
/// QRC хранит абсолютное начало каждого слова, а `\k` в ASS только
/// накапливает длительности. Паузу между концом слова и началом следующего
/// (или концом строки для последнего слова) передаем отдельным тегом
/// `{\kN} ` с пробелом вместо текста.
pub struct QrcToAssConverter;

impl QrcToAssConverter {
    /// Сериализует строку QRC в строку `Dialogue:`
    pub fn convert_line(line: &QrcLine) -> Result<String> {
        let end_ms = line.end_ms();
        let mut text = String::with_capacity(
            line.trailing_text.len() + line.words.iter().map(|w| w.text.len() + 20).sum::<usize>(),
        );

        for (i, word) in line.words.iter().enumerate() {
            text.push_str(&format!("{{\\k{}}}{}", word.duration_ms / 10, word.text.trim_end()));

            let next_start = line.words.get(i + 1).map_or(end_ms, |next| next.start_ms);
            let segment_end = word.end_ms();
            if next_start > segment_end {
                text.push_str(&format!("{{\\k{}}}{}", (next_start - segment_end) / 10, GAP_FILLER_TEXT));
            }
        }
        text.push_str(&line.trailing_text);

        Ok(format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}",
            format_timestamp(line.start_ms)?,
            format_timestamp(end_ms)?,
            text
        ))
    }

    /// Конвертирует поток QRC в поток ASS
    pub fn convert<R: BufRead, W: Write>(reader: R, writer: W) -> Result<ConversionStats> {
        convert::convert_stream::<Self, _, _>(reader, writer)
    }

    /// Конвертирует файл QRC в файл ASS
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConversionStats> {
        convert::convert_file::<Self, _, _>(input, output)
    }

    /// Конвертирует текст QRC в текст ASS
    pub fn convert_str(content: &str) -> Result<String> {
        convert::convert_str::<Self>(content)
    }
}

impl LineConverter for QrcToAssConverter {
    const HEADER: &'static [&'static str] = &EVENTS_HEADER;

    fn convert_line_str(line: &str) -> Result<Option<String>> {
        let parsed = QrcLineParser::parse_line(line)?;
        Self::convert_line(&parsed).map(Some)
    }
}
