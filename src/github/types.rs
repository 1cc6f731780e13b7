use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::GitHubError;

/// OAuthトークン交換レスポンス
///
/// GitHubは交換失敗を200 + errorボディで返すため、エラーフィールドも持つ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// アクセストークン（失敗時は空）
    #[serde(default)]
    pub access_token: String,
    /// トークン種別（通常 "bearer"）
    #[serde(default)]
    pub token_type: String,
    /// 許可されたスコープ
    pub scope: Option<String>,
    /// エラーコード（交換失敗時のみ）
    pub error: Option<String>,
    /// エラー詳細（交換失敗時のみ）
    pub error_description: Option<String>,
}

/// GitHubユーザー情報（サマリー）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: u64,
    /// ユーザー名
    pub login: String,
    /// ユーザーアバターURL
    pub avatar_url: Option<String>,
    /// ユーザープロファイルURL
    pub html_url: String,
    /// アカウント種別（User / Organization）
    #[serde(default)]
    pub r#type: String,
    /// サイト管理者かどうか
    pub site_admin: Option<bool>,
}

/// GitHubユーザープロファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// ユーザーID
    pub id: u64,
    /// ユーザー名
    pub login: String,
    /// 表示名
    pub name: Option<String>,
    /// 公開メールアドレス
    pub email: Option<String>,
    /// ユーザーアバターURL
    pub avatar_url: Option<String>,
    /// ユーザープロファイルURL
    pub html_url: String,
    /// 自己紹介
    pub bio: Option<String>,
    /// 所属
    pub company: Option<String>,
    /// 所在地
    pub location: Option<String>,
    /// ブログURL
    pub blog: Option<String>,
    /// 公開リポジトリ数
    pub public_repos: Option<u32>,
    /// フォロワー数
    pub followers: Option<u32>,
    /// フォロー数
    pub following: Option<u32>,
    /// アカウント作成日時
    pub created_at: Option<DateTime<Utc>>,

    /// 現在のユーザーがフォローしているかどうか（フォローチェックの結果で設定）
    #[serde(skip)]
    pub followed: bool,
}

/// GitHubリポジトリ情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// リポジトリID
    pub id: u64,
    /// リポジトリ名
    pub name: String,
    /// リポジトリ名（owner/repo形式）
    pub full_name: String,
    /// リポジトリ所有者
    pub owner: User,
    /// リポジトリ説明
    pub description: Option<String>,
    /// リポジトリURL
    pub html_url: String,
    /// 主要言語
    pub language: Option<String>,
    /// スター数
    pub stargazers_count: Option<u64>,
    /// フォーク数
    pub forks_count: Option<u64>,
    /// フォークリポジトリかどうか
    #[serde(default)]
    pub fork: bool,
    /// プライベートリポジトリかどうか
    #[serde(default)]
    pub r#private: bool,
    /// デフォルトブランチ名
    pub default_branch: Option<String>,
    /// リポジトリ作成日時
    pub created_at: Option<DateTime<Utc>>,
    /// リポジトリ更新日時
    pub updated_at: Option<DateTime<Utc>>,
}

/// リポジトリコンテンツ（READMEなど、base64エンコードされた本文）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryContent {
    /// ファイル名
    pub name: String,
    /// リポジトリ内のパス
    pub path: String,
    /// エンコーディング（通常 "base64"）
    #[serde(default)]
    pub encoding: String,
    /// エンコードされた本文
    #[serde(default)]
    pub content: String,
    /// ファイルのHTML URL
    pub html_url: Option<String>,
    /// ダウンロードURL
    pub download_url: Option<String>,
}

impl RepositoryContent {
    /// base64本文をUTF-8テキストにデコード
    ///
    /// GitHubのコンテンツAPIはbase64を60桁で折り返すため、空白類を
    /// 取り除いてからデコードする
    pub fn decode(&self) -> Result<String, GitHubError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = general_purpose::STANDARD.decode(compact.as_bytes()).map_err(|e| {
            GitHubError::ContentDecodeError {
                reason: format!("invalid base64: {}", e),
            }
        })?;
        String::from_utf8(bytes).map_err(|e| GitHubError::ContentDecodeError {
            reason: format!("invalid UTF-8: {}", e),
        })
    }
}

/// 検索結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// ヒット件数
    pub total_count: u64,
    /// 検索が不完全かどうか
    #[serde(default)]
    pub incomplete_results: bool,
    /// 検索結果アイテム
    pub items: Vec<T>,
}

/// トレンド集計期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingSince {
    Daily,
    Weekly,
    Monthly,
}

impl TrendingSince {
    /// 期間を日数に変換
    pub fn days(&self) -> i64 {
        match self {
            TrendingSince::Daily => 1,
            TrendingSince::Weekly => 7,
            TrendingSince::Monthly => 30,
        }
    }

    /// 文字列からのパース（大文字小文字は無視）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "daily" => Some(TrendingSince::Daily),
            "weekly" => Some(TrendingSince::Weekly),
            "monthly" => Some(TrendingSince::Monthly),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrendingSince {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendingSince::Daily => write!(f, "daily"),
            TrendingSince::Weekly => write!(f, "weekly"),
            TrendingSince::Monthly => write!(f, "monthly"),
        }
    }
}
