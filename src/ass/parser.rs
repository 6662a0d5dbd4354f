use crate::error::{Error, Result};
use crate::models::{DialogueLine, KaraokeWord};
use crate::timecode::parse_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

/// Префикс строк событий, которые содержат текст
pub const DIALOGUE_PREFIX: &str = "Dialogue:";

static DIALOGUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Dialogue:\s*[0-9]+,([^,]*),([^,]*),").expect("valid dialogue regex")
});

// Текст слога тянется до следующей фигурной скобки или конца строки
static KARAOKE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\k([0-9]+)\}([^{]*)").expect("valid karaoke tag regex")
});

/// Парсер строк `Dialogue:` с тегами караоке `\k`
pub struct AssLineParser;

impl AssLineParser {
    /// Парсит одну строку ASS
    ///
    /// Возвращает `Ok(None)` для строк, которые не являются диалогом
    /// (`Comment:`, `Style:`, заголовки секций), и ошибку для строк `Dialogue:`,
    /// из которых не удалось извлечь время.
    pub fn parse_line(line: &str) -> Result<Option<DialogueLine>> {
        if !line.starts_with(DIALOGUE_PREFIX) {
            return Ok(None);
        }

        let captures = DIALOGUE_REGEX
            .captures(line)
            .ok_or_else(|| Error::MalformedDialogue(line.to_string()))?;

        let start_ms = parse_timestamp(&captures[1])?;
        let end_ms = parse_timestamp(&captures[2])?;
        let words = Self::parse_karaoke_tags(line)?;

        Ok(Some(DialogueLine::new(start_ms, end_ms, words)))
    }

    /// Извлекает пары `{\kN}TEXT` в порядке следования
    ///
    /// `N` задан в сантисекундах, в результате длительность в миллисекундах.
    pub fn parse_karaoke_tags(line: &str) -> Result<Vec<KaraokeWord>> {
        KARAOKE_TAG_REGEX
            .captures_iter(line)
            .map(|captures| -> Result<KaraokeWord> {
                let centiseconds: u32 = captures[1]
                    .parse()
                    .map_err(|_| Error::MalformedDialogue(format!("Invalid \\k value: {}", &captures[1])))?;

                Ok(KaraokeWord::new(&captures[2], i64::from(centiseconds) * 10))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_word() {
        let line = r"Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\k50}Hello";
        let dialogue = AssLineParser::parse_line(line).unwrap().unwrap();

        assert_eq!(dialogue.start_ms, 1000);
        assert_eq!(dialogue.end_ms, 2000);
        assert_eq!(dialogue.words, vec![KaraokeWord::new("Hello", 500)]);
    }

    #[test]
    fn test_parse_keeps_word_text_verbatim() {
        let line = r"Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,{\k20}Hi {\k30}there ";
        let dialogue = AssLineParser::parse_line(line).unwrap().unwrap();

        assert_eq!(
            dialogue.words,
            vec![KaraokeWord::new("Hi ", 200), KaraokeWord::new("there ", 300)]
        );
    }

    #[test]
    fn test_parse_word_stops_at_next_brace() {
        let line = r"Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,{\k20}a\Nb{\i1}c{\k10}d";
        let dialogue = AssLineParser::parse_line(line).unwrap().unwrap();

        assert_eq!(
            dialogue.words,
            vec![KaraokeWord::new(r"a\Nb", 200), KaraokeWord::new("d", 100)]
        );
    }

    #[test]
    fn test_parse_without_karaoke_tags() {
        let line = "Dialogue: 0,0:00:03.50,0:00:04.00,Default,,0,0,0,,plain text";
        let dialogue = AssLineParser::parse_line(line).unwrap().unwrap();

        assert_eq!(dialogue.start_ms, 3500);
        assert_eq!(dialogue.end_ms, 4000);
        assert!(dialogue.words.is_empty());
    }

    #[test]
    fn test_non_dialogue_lines_are_ignored() {
        for line in [
            "[Events]",
            "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text",
            r"Comment: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\k50}Hello",
            "",
            r" Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\k50}Hello",
        ] {
            assert_eq!(AssLineParser::parse_line(line).unwrap(), None);
        }
    }

    #[test]
    fn test_malformed_dialogue_lines() {
        assert!(matches!(
            AssLineParser::parse_line("Dialogue: broken"),
            Err(Error::MalformedDialogue(_))
        ));
        assert!(matches!(
            AssLineParser::parse_line("Dialogue: 0,0:00:01,0:00:02.00,Default,,0,0,0,,x"),
            Err(Error::MalformedTimestamp(_))
        ));
        assert!(matches!(
            AssLineParser::parse_line(r"Dialogue: 0,0:00:01.00,0:00:02.00,,{\k99999999999}x"),
            Err(Error::MalformedDialogue(_))
        ));
    }
}
