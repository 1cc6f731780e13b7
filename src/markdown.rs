use crate::config::RenderConfig;
use crate::errors::{AppError, RenderError};
use reqwest::Client;
use std::time::Duration;

/// Markdownレンダリングクライアント
///
/// 生のMarkdownテキストをHTMLフラグメントに変換する
pub struct MarkdownClient {
    client: Client,
    config: RenderConfig,
}

impl MarkdownClient {
    /// 新しいレンダリングクライアントを作成
    pub fn new(config: RenderConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(format!("gh-explorer/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| RenderError::NetworkError { source: e })?;

        Ok(MarkdownClient { client, config })
    }

    /// MarkdownテキストをHTMLに変換
    ///
    /// トークンがある場合は `token <value>` 形式の認証ヘッダを付ける
    pub async fn render(&self, markdown: &str, token: Option<&str>) -> Result<String, AppError> {
        let url = format!("{}/markdown/raw", self.config.base_url);

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .body(markdown.to_string());

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("token {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RenderError::NetworkError { source: e })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RenderError::ServerError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response
            .text()
            .await
            .map_err(|e| RenderError::NetworkError { source: e }.into())
    }
}
