use crate::error::{Error, Result};
use crate::models::{QrcLine, QrcWordTag};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+),([0-9]+)$").expect("valid QRC header regex"));

// Текст слова не может содержать открывающую круглую скобку
static WORD_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^(]*)\(([0-9]+),([0-9]+)\)").expect("valid QRC word tag regex")
});

/// Парсер строк QRC вида `[start,duration]word(start,duration)...`
pub struct QrcLineParser;

impl QrcLineParser {
    /// Парсит одну строку QRC
    ///
    /// Строки без заголовка `[start,duration]` в начале (метаданные вроде
    /// `[ti:...]`, пустые строки) возвращают ошибку, которую вызывающий код
    /// обрабатывает пропуском строки.
    pub fn parse_line(line: &str) -> Result<QrcLine> {
        let (start_ms, duration_ms, segments) = Self::parse_header(line)?;
        let mut words = Vec::new();
        let mut last_end = 0;

        for captures in WORD_TAG_REGEX.captures_iter(segments) {
            let start = Self::parse_value(&captures[2], || Error::MalformedWordTag(line.to_string()))?;
            let duration = Self::parse_value(&captures[3], || Error::MalformedWordTag(line.to_string()))?;

            words.push(QrcWordTag::new(&captures[1], start, duration));
            if let Some(whole) = captures.get(0) {
                last_end = whole.end();
            }
        }

        Ok(QrcLine {
            start_ms,
            duration_ms,
            words,
            trailing_text: segments[last_end..].to_string(),
        })
    }

    /// Разбирает заголовок строки и возвращает начало, длительность и
    /// часть строки после первой `]`
    fn parse_header(line: &str) -> Result<(i64, i64, &str)> {
        let rest = line
            .strip_prefix('[')
            .ok_or_else(|| Error::MalformedHeader(line.to_string()))?;
        let close = rest
            .find(']')
            .ok_or_else(|| Error::MissingCloseBracket(line.to_string()))?;

        let captures = HEADER_REGEX
            .captures(&rest[..close])
            .ok_or_else(|| Error::MalformedHeader(line.to_string()))?;

        let start_ms = Self::parse_value(&captures[1], || Error::MalformedHeader(line.to_string()))?;
        let duration_ms = Self::parse_value(&captures[2], || Error::MalformedHeader(line.to_string()))?;

        Ok((start_ms, duration_ms, &rest[close + 1..]))
    }

    fn parse_value(digits: &str, error: impl FnOnce() -> Error) -> Result<i64> {
        digits.parse::<u32>().map(i64::from).map_err(|_| error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_words() {
        let line = QrcLineParser::parse_line("[0,1000]Hi(0,200)there(500,300)").unwrap();

        assert_eq!(line.start_ms, 0);
        assert_eq!(line.duration_ms, 1000);
        assert_eq!(line.end_ms(), 1000);
        assert_eq!(
            line.words,
            vec![QrcWordTag::new("Hi", 0, 200), QrcWordTag::new("there", 500, 300)]
        );
        assert_eq!(line.trailing_text, "");
    }

    #[test]
    fn test_parse_keeps_trailing_spaces() {
        let line = QrcLineParser::parse_line("[1000,900]Hello (1000,400)world (1400,500)").unwrap();

        assert_eq!(line.words[0].text, "Hello ");
        assert_eq!(line.words[1].text, "world ");
    }

    #[test]
    fn test_parse_trailing_text() {
        let line = QrcLineParser::parse_line("[0,500]a(0,100)b(100,100) tail").unwrap();

        assert_eq!(line.words.len(), 2);
        assert_eq!(line.trailing_text, " tail");
    }

    #[test]
    fn test_parse_header_only() {
        let line = QrcLineParser::parse_line("[2500,1500]").unwrap();

        assert_eq!(line.start_ms, 2500);
        assert_eq!(line.end_ms(), 4000);
        assert!(line.words.is_empty());
        assert!(line.trailing_text.is_empty());
    }

    #[test]
    fn test_word_text_excludes_open_paren() {
        let line = QrcLineParser::parse_line("[0,300]a(b(0,100)c(100,200)").unwrap();

        assert_eq!(
            line.words,
            vec![QrcWordTag::new("b", 0, 100), QrcWordTag::new("c", 100, 200)]
        );
    }

    #[test]
    fn test_missing_close_bracket() {
        assert!(matches!(
            QrcLineParser::parse_line("[0,1000Hi(0,200)"),
            Err(Error::MissingCloseBracket(_))
        ));
    }

    #[test]
    fn test_malformed_header() {
        for line in ["", "Hi(0,200)", "[ti:Title]", "[0,]Hi(0,200)", " [0,100]Hi(0,100)", "[-5,100]x(0,1)"] {
            assert!(
                matches!(QrcLineParser::parse_line(line), Err(Error::MalformedHeader(_))),
                "line {:?} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_out_of_range_values() {
        assert!(matches!(
            QrcLineParser::parse_line("[99999999999,100]x(0,100)"),
            Err(Error::MalformedHeader(_))
        ));
        assert!(matches!(
            QrcLineParser::parse_line("[0,100]x(99999999999,100)"),
            Err(Error::MalformedWordTag(_))
        ));
    }
}
