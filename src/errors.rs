use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug)]
pub enum AppError {
    /// 認証情報ストア関連エラー
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// GitHub API関連エラー
    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),

    /// Markdownレンダリング関連エラー
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// 設定関連エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 汎用エラー
    #[error("{message}")]
    Generic { message: String },
}

/// 認証情報ストア関連エラー
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Keyring操作エラー
    #[error("Keyring error: {source}")]
    KeyringError {
        #[source]
        source: keyring::Error,
    },

    /// JSONパースエラー
    #[error("JSON parsing error: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// 汎用認証情報エラー
    #[error("{reason}")]
    Generic { reason: String },
}

/// GitHub API関連エラー
#[derive(Error, Debug)]
pub enum GitHubError {
    /// ネットワークエラー
    #[error("Network error: {source}")]
    NetworkError {
        #[source]
        source: reqwest::Error,
    },

    /// JSONパースエラー
    #[error("Response parsing failed: {source}")]
    ParseError {
        #[source]
        source: serde_json::Error,
    },

    /// 認証エラー
    #[error("Authentication failed. Please check your access token.")]
    AuthenticationError,

    /// リソースが見つからない
    #[error("Resource not found: {resource_type} {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// サーバーエラー
    #[error("GitHub server error: {status} {message}")]
    ServerError { status: u16, message: String },

    /// APIレスポンスエラー
    #[error("API response error: {message}")]
    ApiError { message: String },

    /// コンテンツのデコードエラー
    #[error("Content decoding failed: {reason}")]
    ContentDecodeError { reason: String },

    /// 汎用GitHubエラー
    #[error("{message}")]
    Generic { message: String },
}

/// Markdownレンダリング関連エラー
#[derive(Error, Debug)]
pub enum RenderError {
    /// ネットワークエラー
    #[error("Network error: {source}")]
    NetworkError {
        #[source]
        source: reqwest::Error,
    },

    /// サーバーエラー
    #[error("Render server error: {status} {message}")]
    ServerError { status: u16, message: String },
}

/// 設定関連エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 設定ファイル読み込みエラー
    #[error("Failed to load config file: {source}")]
    LoadError {
        #[source]
        source: std::io::Error,
    },

    /// 設定ファイルパースエラー
    #[error("Failed to parse config file: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    /// 設定バリデーションエラー
    #[error("Configuration validation failed: {reason}")]
    ValidationError { reason: String },

    /// 設定ファイル書き込みエラー
    #[error("Failed to write config file: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for GitHubError {
    fn from(error: reqwest::Error) -> Self {
        GitHubError::NetworkError { source: error }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::GitHub(GitHubError::NetworkError { source: error })
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(error: serde_json::Error) -> Self {
        GitHubError::ParseError { source: error }
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(error: serde_json::Error) -> Self {
        CredentialError::JsonError { source: error }
    }
}

impl From<keyring::Error> for CredentialError {
    fn from(error: keyring::Error) -> Self {
        CredentialError::KeyringError { source: error }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::LoadError { source: error }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::ParseError { source: error }
    }
}
