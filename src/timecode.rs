//! Преобразование временных меток ASS (`H:MM:SS.CC`) в миллисекунды и обратно.
//!
//! Точность формата ASS 10 мс: остаток меньше сантисекунды при форматировании
//! отбрасывается.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;
const MS_PER_CENTISECOND: i64 = 10;

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+):([0-9]{2}):([0-9]{2})\.([0-9]{2})$").expect("valid timestamp regex")
});

/// Парсит временную метку `H:MM:SS.CC` и возвращает время в миллисекундах
pub fn parse_timestamp(s: &str) -> Result<i64> {
    let captures = TIMESTAMP_REGEX
        .captures(s)
        .ok_or_else(|| Error::MalformedTimestamp(s.to_string()))?;

    let component = |index: usize| -> Result<i64> {
        captures[index]
            .parse::<i64>()
            .map_err(|_| Error::MalformedTimestamp(s.to_string()))
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;
    let centiseconds = component(4)?;

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes * MS_PER_MINUTE))
        .and_then(|ms| ms.checked_add(seconds * MS_PER_SECOND))
        .and_then(|ms| ms.checked_add(centiseconds * MS_PER_CENTISECOND))
        .ok_or_else(|| Error::MalformedTimestamp(s.to_string()))
}

/// Форматирует миллисекунды как `H:MM:SS.CC`
///
/// Час не дополняется нулями, как в файлах Aegisub.
pub fn format_timestamp(ms: i64) -> Result<String> {
    if ms < 0 {
        return Err(Error::InvalidDuration(format!("{} мс", ms)));
    }

    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let centiseconds = (ms % MS_PER_SECOND) / MS_PER_CENTISECOND;

    Ok(format!(
        "{}:{:02}:{:02}.{:02}",
        hours, minutes, seconds, centiseconds
    ))
}
