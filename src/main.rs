use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use karaoke_convert::{ConvertOptions, Direction, KaraokeConverter};

/// CLI обертка для Direction
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDirection {
    /// ASS с тегами \k в QRC
    AssToQrc,
    /// QRC в ASS с тегами \k
    QrcToAss,
}

impl From<CliDirection> for Direction {
    fn from(direction: CliDirection) -> Self {
        match direction {
            CliDirection::AssToQrc => Direction::AssToQrc,
            CliDirection::QrcToAss => Direction::QrcToAss,
        }
    }
}

/// CLI обертка для уровня логирования
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Конвертирует караоке-тайминг между ASS (\k) и QRC
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Входной файл (.ass или .qrc), по умолчанию stdin
    input: Option<PathBuf>,

    /// Выходной файл (.qrc или .ass), по умолчанию stdout
    output: Option<PathBuf>,

    /// Направление конвертации; без флага определяется по расширениям
    #[arg(short, long, value_enum)]
    direction: Option<CliDirection>,

    /// Уровень логирования
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: CliLogLevel,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) => eprintln!("{}", summary),
        Err(e) => {
            eprintln!("Ошибка: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let direction = match cli.direction {
        Some(direction) => direction.into(),
        None => Direction::from_paths(
            cli.input.clone().unwrap_or_default(),
            cli.output.clone().unwrap_or_default(),
        )
        .context("Укажите направление через --direction")?,
    };

    let converter = KaraokeConverter::new(ConvertOptions {
        log_level: cli.log_level.into(),
    });

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Не удалось открыть {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Не удалось создать {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let stats = converter
        .convert(direction, reader, writer)
        .with_context(|| format!("Конвертация {} не удалась", direction))?;

    Ok(format!(
        "{} завершено: записано строк {}, пропущено {}",
        direction,
        stats.lines_written,
        stats.lines_skipped
    ))
}
