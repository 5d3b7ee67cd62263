use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum IngredientAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("成分辞書の読み込みに失敗: {0}")]
    DictionaryLoad(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("スキャンテキストが指定されていません。ファイルまたは--textで指定してください")]
    NoText,

    #[error("履歴ファイルの保存に失敗: {0}")]
    HistorySave(String),

    #[error("AI呼び出しエラー: {0}")]
    AiCall(String),
}

pub type Result<T> = std::result::Result<T, IngredientAiError>;
