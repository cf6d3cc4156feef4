use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("リスナーエラー: {0}")]
    Listener(String),

    #[error("システム {0} の結果ファイルがありません")]
    NoResultFile(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] inspection_common::Error),
}

pub type Result<T> = std::result::Result<T, InspectionError>;
