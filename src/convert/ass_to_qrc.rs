use crate::ass::AssLineParser;
use crate::convert::{self, ConversionStats, LineConverter};
use crate::error::Result;
use crate::models::DialogueLine;
use std::io::{BufRead, Write};
use std::path::Path;

/// Конвертер ASS -> QRC
///
/// Каждая строка `Dialogue:` превращается в одну строку QRC. Начало каждого
/// слова вычисляется накопительно от начала строки, поэтому паузы между
/// словами в результате не появляются.
pub struct AssToQrcConverter;

impl AssToQrcConverter {
    /// Сериализует строку диалога в формат QRC
    pub fn convert_line(line: &DialogueLine) -> String {
        let mut result = String::with_capacity(
            16 + line.words.iter().map(|w| w.text.len() + 16).sum::<usize>(),
        );

        result.push_str(&format!("[{},{}]", line.start_ms, line.duration_ms()));

        let mut cursor = line.start_ms;
        for word in &line.words {
            result.push_str(&format!("{}({},{})", word.text, cursor, word.duration_ms));
            cursor += word.duration_ms;
        }

        result
    }

    /// Конвертирует поток ASS в поток QRC
    pub fn convert<R: BufRead, W: Write>(reader: R, writer: W) -> Result<ConversionStats> {
        convert::convert_stream::<Self, _, _>(reader, writer)
    }

    /// Конвертирует файл ASS в файл QRC
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConversionStats> {
        convert::convert_file::<Self, _, _>(input, output)
    }

    /// Конвертирует текст ASS в текст QRC
    pub fn convert_str(content: &str) -> Result<String> {
        convert::convert_str::<Self>(content)
    }
}

impl LineConverter for AssToQrcConverter {
    fn convert_line_str(line: &str) -> Result<Option<String>> {
        Ok(AssLineParser::parse_line(line)?.map(|dialogue| Self::convert_line(&dialogue)))
    }
}
