//! Error types for the hizuke library
//!
//! Messages are the ones shown to the user, so they are written in Japanese.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hizuke library
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing was selected before generating
    #[error("カレンダーから日付を選択してください。")]
    EmptyInput,

    /// Start date is after the end date
    #[error("開始日は終了日以前の日付を指定してください。({start} > {end})")]
    InvalidRange { start: String, end: String },

    /// Unparseable date text, or one that does not round-trip (e.g. 2024/02/30)
    #[error("日付の形式が正しくありません: {0} (YYYY/MM/DD)")]
    InvalidDateFormat(String),

    /// Unknown weekday name or index
    #[error("曜日の指定が正しくありません: {0}")]
    InvalidWeekday(String),

    /// Nothing (or only the placeholder) in the copy source
    #[error("コピーするテキストがありません。")]
    NothingToCopy,

    /// Clipboard backend failure
    #[error("コピーに失敗しました。({0})")]
    Clipboard(String),

    /// Unknown selection mode name
    #[error("モードの指定が正しくありません: {0} (range / multiple / weekly)")]
    InvalidMode(String),

    /// Unknown copy target name
    #[error("コピー対象の指定が正しくありません: {0} (display / tokens / combined)")]
    InvalidCopyTarget(String),

    /// Unrecognised session command
    #[error("不明なコマンドです: {0}")]
    UnknownCommand(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a validation notice that leaves application state untouched
    pub fn is_notice(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
