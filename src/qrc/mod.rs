pub mod parser;

pub use parser::QrcLineParser;
