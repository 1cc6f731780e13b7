use crate::cache;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::errors::AppError;
use crate::github::client::GitHubClient;
use crate::github::types::{Repository, SearchResults, TrendingSince, User, UserProfile};
use crate::markdown::MarkdownClient;
use reqwest::StatusCode;
use std::path::PathBuf;

/// Coordinates the GitHub API, the markdown renderer and the local
/// credential store behind a single interface.
///
/// Every operation is a short sequential chain of at most two remote
/// calls. The credential store is the single source of truth for
/// "signed in or not" and is re-read immediately before each call that
/// has an authenticated variant.
pub struct DataManager {
    github: GitHubClient,
    markdown: MarkdownClient,
    credentials: CredentialStore,
    cache_dir: PathBuf,
}

impl DataManager {
    pub fn new(config: &Config, credentials: CredentialStore) -> Result<Self, AppError> {
        Ok(DataManager {
            github: GitHubClient::new(config.github.clone())?,
            markdown: MarkdownClient::new(config.render.clone())?,
            credentials,
            cache_dir: config.cache_dir(),
        })
    }

    /// The stored access token, or None when the user is not signed in.
    fn stored_token(&self) -> Option<String> {
        self.credentials.access_token()
    }

    /// Exchanges an OAuth authorization code for an access token, stores
    /// the token, then fetches and caches the signed-in user's identity.
    pub async fn sign_in(&self, code: &str) -> Result<UserProfile, AppError> {
        let token = self.github.exchange_code(code).await?;
        self.credentials.put_access_token(&token)?;

        let profile = self.github.authenticated_user(&token).await?;
        tracing::debug!("saving signed-in user {}", profile.login);
        self.credentials.put_user_login(&profile.login)?;
        self.credentials.put_user_email(profile.email.as_deref())?;
        self.credentials
            .put_user_avatar(profile.avatar_url.as_deref())?;

        Ok(profile)
    }

    /// Repositories popular over the given window, optionally filtered by
    /// language.
    pub async fn trending(
        &self,
        language: Option<&str>,
        since: TrendingSince,
    ) -> Result<Vec<Repository>, AppError> {
        self.github.trending_repositories(language, since, None).await
    }

    pub async fn search_repositories(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults<Repository>, AppError> {
        self.github.search_repositories(query, page, None).await
    }

    pub async fn search_users(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults<User>, AppError> {
        self.github.search_users(query, page, None).await
    }

    /// Raw status of the star check, or None when not signed in.
    pub async fn is_repository_starred(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<StatusCode>, AppError> {
        match self.stored_token() {
            Some(token) => Ok(Some(self.github.star_status(owner, repo, &token).await?)),
            None => Ok(None),
        }
    }

    /// Stars a repository. None when not signed in.
    pub async fn star_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<StatusCode>, AppError> {
        match self.stored_token() {
            Some(token) => Ok(Some(self.github.star_repository(owner, repo, &token).await?)),
            None => Ok(None),
        }
    }

    /// Removes a star from a repository. None when not signed in.
    pub async fn unstar_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<StatusCode>, AppError> {
        match self.stored_token() {
            Some(token) => Ok(Some(self.github.unstar_repository(owner, repo, &token).await?)),
            None => Ok(None),
        }
    }

    /// Fetches a repository README, renders it to HTML and prefixes the
    /// stylesheet link. Without a stylesheet the result is None, never the
    /// bare HTML; callers rely on that.
    pub async fn rendered_readme(
        &self,
        owner: &str,
        repo: &str,
        css_file: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        let content = self
            .github
            .readme(owner, repo, self.stored_token().as_deref())
            .await?;
        let markdown = content.decode()?;
        let html = self
            .markdown
            .render(&markdown, self.stored_token().as_deref())
            .await?;

        Ok(wrap_with_stylesheet(&html, css_file))
    }

    /// Fetches a user profile. When signed in, additionally resolves
    /// whether the current user follows them; only a 204 from the follow
    /// check sets the flag.
    pub async fn user_profile(&self, username: &str) -> Result<UserProfile, AppError> {
        let mut profile = self
            .github
            .user_profile(username, self.stored_token().as_deref())
            .await?;

        if let Some(token) = self.stored_token() {
            let status = self.github.following_status(username, &token).await?;
            profile.followed = status == StatusCode::NO_CONTENT;
        }

        Ok(profile)
    }

    pub async fn following(&self, username: &str, page: u32) -> Result<Vec<User>, AppError> {
        self.github
            .following(username, page, self.stored_token().as_deref())
            .await
    }

    pub async fn followers(&self, username: &str, page: u32) -> Result<Vec<User>, AppError> {
        self.github
            .followers(username, page, self.stored_token().as_deref())
            .await
    }

    /// Clears stored credentials and sweeps leftover web-view caches.
    /// Best effort; nothing is reported when files survive.
    pub fn clear_cached_state(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("Failed to clear stored credentials: {:?}", e);
        }

        cache::clear_webview_dirs(&self.cache_dir);
    }
}

/// Prefixes the rendered fragment with a stylesheet link. No stylesheet,
/// no document.
fn wrap_with_stylesheet(html: &str, css_file: Option<&str>) -> Option<String> {
    css_file.map(|css| {
        format!(
            "<link rel='stylesheet' type='text/css' href='{}' />{}",
            css, html
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_manager(dir: &TempDir) -> DataManager {
        let store = CredentialStore {
            keyring_entry: None,
            file_path: dir.path().join("credentials.json"),
        };
        let mut config = Config::default();
        config.cache.root = Some(
            dir.path()
                .join("app")
                .join("cache")
                .to_string_lossy()
                .into_owned(),
        );
        DataManager::new(&config, store).unwrap()
    }

    fn store_for(dir: &TempDir) -> CredentialStore {
        CredentialStore {
            keyring_entry: None,
            file_path: dir.path().join("credentials.json"),
        }
    }

    #[test]
    fn test_wrap_with_stylesheet() {
        let html = "<h1>Hello</h1>";

        assert_eq!(
            wrap_with_stylesheet(html, Some("github.css")),
            Some(
                "<link rel='stylesheet' type='text/css' href='github.css' /><h1>Hello</h1>"
                    .to_string()
            )
        );
    }

    // Documented quirk: without a stylesheet the rendered HTML is dropped
    // entirely instead of being returned unstyled.
    #[test]
    fn test_readme_without_stylesheet_yields_none() {
        assert_eq!(wrap_with_stylesheet("<h1>Hello</h1>", None), None);
    }

    #[tokio::test]
    async fn test_star_operations_without_token_yield_none() {
        let dir = TempDir::new().unwrap();
        let manager = test_manager(&dir);

        // 未サインインの場合はリモート呼び出しを行わない
        assert_eq!(
            manager.is_repository_starred("apple", "swift").await.unwrap(),
            None
        );
        assert_eq!(manager.star_repository("apple", "swift").await.unwrap(), None);
        assert_eq!(
            manager.unstar_repository("apple", "swift").await.unwrap(),
            None
        );
    }

    #[test]
    fn test_clear_cached_state() {
        let dir = TempDir::new().unwrap();

        // A token to clear, plus cache siblings to sweep
        store_for(&dir).put_access_token("gho_testtoken").unwrap();

        let app_dir = dir.path().join("app");
        fs::create_dir_all(app_dir.join("cache")).unwrap();
        fs::create_dir_all(app_dir.join("WebViewCache").join("nested")).unwrap();
        fs::write(app_dir.join("WebViewCache/nested/tile.bin"), "x").unwrap();
        fs::create_dir_all(app_dir.join("data")).unwrap();

        let manager = test_manager(&dir);
        manager.clear_cached_state();

        assert_eq!(store_for(&dir).access_token(), None);
        assert!(!app_dir.join("WebViewCache").exists());
        assert!(app_dir.join("data").exists());
        assert!(app_dir.join("cache").exists());
    }
}
