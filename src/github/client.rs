use crate::config::GitHubConfig;
use crate::errors::{AppError, GitHubError};
use crate::github::types::*;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// GitHub APIクライアント
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// 新しいGitHubクライアントを作成
    pub fn new(config: GitHubConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(format!("gh-explorer/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| GitHubError::NetworkError { source: e })?;

        Ok(GitHubClient { client, config })
    }

    /// APIベースURLを取得
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// リクエストを構築（認証ヘッダの有無はここだけで分岐する）
    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        builder
    }

    /// OAuth codeをアクセストークンに交換
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let url = format!("{}/login/oauth/access_token", self.config.oauth_base_url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "client_id": self.config.client_id,
                "client_secret": self.config.client_secret,
                "code": code,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let token_response: AccessTokenResponse = response.json().await?;
        if token_response.access_token.is_empty() {
            // 交換失敗は200 + errorボディで返ってくる
            tracing::warn!(
                "OAuth code exchange rejected: {}",
                token_response.error.as_deref().unwrap_or("unknown error")
            );
            return Err(GitHubError::AuthenticationError.into());
        }

        Ok(token_response.access_token)
    }

    /// 認証済みユーザーのプロファイルを取得
    pub async fn authenticated_user(&self, token: &str) -> Result<UserProfile, AppError> {
        let url = format!("{}/user", self.api_base_url());

        let response = self.request(Method::GET, &url, Some(token)).send().await?;

        match response.status() {
            status if status.is_success() => {
                let profile: UserProfile = response.json().await?;
                Ok(profile)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::AuthenticationError.into()),
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// 期間内に作成されたリポジトリをスター数順で取得（トレンドの近似）
    pub async fn trending_repositories(
        &self,
        language: Option<&str>,
        since: TrendingSince,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, AppError> {
        let query = Self::trending_query(language, since);
        let url = format!("{}/search/repositories", self.api_base_url());

        let response = self
            .request(Method::GET, &url, token)
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", "30"),
            ])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let results: SearchResults<Repository> = response.json().await?;
                Ok(results.items)
            }
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// トレンド検索クエリを構築
    fn trending_query(language: Option<&str>, since: TrendingSince) -> String {
        let created = (Utc::now() - chrono::Duration::days(since.days())).format("%Y-%m-%d");
        let mut query = format!("created:>{}", created);
        if let Some(language) = language {
            query.push_str(&format!(" language:{}", language));
        }
        query
    }

    /// リポジトリを検索
    pub async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        token: Option<&str>,
    ) -> Result<SearchResults<Repository>, AppError> {
        let url = format!("{}/search/repositories", self.api_base_url());
        let page = page.to_string();

        let response = self
            .request(Method::GET, &url, token)
            .query(&[("q", query), ("page", page.as_str()), ("per_page", "30")])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let results: SearchResults<Repository> = response.json().await?;
                Ok(results)
            }
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// ユーザーを検索
    pub async fn search_users(
        &self,
        query: &str,
        page: u32,
        token: Option<&str>,
    ) -> Result<SearchResults<User>, AppError> {
        let url = format!("{}/search/users", self.api_base_url());
        let page = page.to_string();

        let response = self
            .request(Method::GET, &url, token)
            .query(&[("q", query), ("page", page.as_str()), ("per_page", "30")])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let results: SearchResults<User> = response.json().await?;
                Ok(results)
            }
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// スター状態を確認（204: スター済み、404: 未スター）
    ///
    /// このエンドポイントではステータスコード自体が結果なので、
    /// そのまま返す
    pub async fn star_status(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<StatusCode, AppError> {
        let url = format!("{}/user/starred/{}/{}", self.api_base_url(), owner, repo);

        let response = self.request(Method::GET, &url, Some(token)).send().await?;
        Ok(response.status())
    }

    /// リポジトリにスターを付ける
    pub async fn star_repository(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<StatusCode, AppError> {
        let url = format!("{}/user/starred/{}/{}", self.api_base_url(), owner, repo);

        // PUTは空ボディでContent-Length: 0が必要
        let response = self
            .request(Method::PUT, &url, Some(token))
            .body("")
            .send()
            .await?;
        Ok(response.status())
    }

    /// リポジトリのスターを外す
    pub async fn unstar_repository(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<StatusCode, AppError> {
        let url = format!("{}/user/starred/{}/{}", self.api_base_url(), owner, repo);

        let response = self.request(Method::DELETE, &url, Some(token)).send().await?;
        Ok(response.status())
    }

    /// READMEコンテンツを取得
    pub async fn readme(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<RepositoryContent, AppError> {
        let url = format!("{}/repos/{}/{}/readme", self.api_base_url(), owner, repo);

        let response = self.request(Method::GET, &url, token).send().await?;

        match response.status() {
            status if status.is_success() => {
                let content: RepositoryContent = response.json().await?;
                Ok(content)
            }
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "readme".to_string(),
                resource_id: format!("{}/{}", owner, repo),
            }
            .into()),
            StatusCode::UNAUTHORIZED => Err(GitHubError::AuthenticationError.into()),
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// ユーザープロファイルを取得
    pub async fn user_profile(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<UserProfile, AppError> {
        let url = format!("{}/users/{}", self.api_base_url(), username);

        let response = self.request(Method::GET, &url, token).send().await?;

        match response.status() {
            status if status.is_success() => {
                let profile: UserProfile = response.json().await?;
                Ok(profile)
            }
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "user".to_string(),
                resource_id: username.to_string(),
            }
            .into()),
            StatusCode::UNAUTHORIZED => Err(GitHubError::AuthenticationError.into()),
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// 現在のユーザーが指定ユーザーをフォローしているかを確認（204: フォロー中）
    pub async fn following_status(
        &self,
        username: &str,
        token: &str,
    ) -> Result<StatusCode, AppError> {
        let url = format!("{}/user/following/{}", self.api_base_url(), username);

        let response = self.request(Method::GET, &url, Some(token)).send().await?;
        Ok(response.status())
    }

    /// フォロワー一覧を取得
    pub async fn followers(
        &self,
        username: &str,
        page: u32,
        token: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        let url = format!("{}/users/{}/followers", self.api_base_url(), username);
        self.user_list(&url, page, token).await
    }

    /// フォロー中一覧を取得
    pub async fn following(
        &self,
        username: &str,
        page: u32,
        token: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        let url = format!("{}/users/{}/following", self.api_base_url(), username);
        self.user_list(&url, page, token).await
    }

    /// ユーザーリスト形式のエンドポイントを取得
    async fn user_list(
        &self,
        url: &str,
        page: u32,
        token: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        let page = page.to_string();

        let response = self
            .request(Method::GET, url, token)
            .query(&[("page", page.as_str()), ("per_page", "30")])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let users: Vec<User> = response.json().await?;
                Ok(users)
            }
            StatusCode::FORBIDDEN => Err(self.handle_forbidden(response).await),
            _ => Err(self.handle_error_response(response).await),
        }
    }

    /// 403レスポンスを処理（認証エラーとその他を区別する）
    async fn handle_forbidden(&self, response: Response) -> AppError {
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return GitHubError::NetworkError { source: e }.into(),
        };

        if text.contains("Bad credentials") || text.contains("Invalid token") {
            GitHubError::AuthenticationError.into()
        } else {
            GitHubError::ApiError { message: text }.into()
        }
    }

    /// エラーレスポンスを処理
    async fn handle_error_response(&self, response: Response) -> AppError {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        GitHubError::ServerError {
            status: status.as_u16(),
            message: text,
        }
        .into()
    }
}
