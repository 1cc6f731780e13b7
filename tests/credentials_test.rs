use gh_explorer::credentials::{CredentialStore, StoredCredentials};
use secrecy::{ExposeSecret, SecretString};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> CredentialStore {
    // No keyring in the test environment; exercise the file fallback
    CredentialStore {
        keyring_entry: None,
        file_path: dir.path().join("credentials.json"),
    }
}

#[test]
fn test_credential_store_full_flow() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    // Nothing stored yet
    assert!(store.load().unwrap().is_none());
    assert_eq!(store.access_token(), None);

    // Sign-in writes the token, then the identity piece by piece
    store.put_access_token("gho_integration").unwrap();
    store.put_user_login("octocat").unwrap();
    store.put_user_email(Some("octocat@github.com")).unwrap();
    store
        .put_user_avatar(Some("https://avatars.githubusercontent.com/u/1"))
        .unwrap();

    assert_eq!(store.access_token(), Some("gho_integration".to_string()));

    let creds = store.load().unwrap().unwrap();
    assert_eq!(creds.access_token.expose_secret(), "gho_integration");
    assert_eq!(creds.login.as_deref(), Some("octocat"));
    assert_eq!(creds.email.as_deref(), Some("octocat@github.com"));
    assert_eq!(
        creds.avatar_url.as_deref(),
        Some("https://avatars.githubusercontent.com/u/1")
    );

    // Clearing removes everything
    store.clear().unwrap();
    assert_eq!(store.access_token(), None);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_saved_empty_token_is_treated_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    let creds = StoredCredentials {
        access_token: SecretString::new(String::new()),
        login: Some("octocat".to_string()),
        email: None,
        avatar_url: None,
    };
    store.save(&creds).unwrap();

    // Identity survives but the token reads as absent
    assert_eq!(store.access_token(), None);
    assert_eq!(
        store.load().unwrap().unwrap().login.as_deref(),
        Some("octocat")
    );
}

#[test]
fn test_clear_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.clear().unwrap();
    store.put_access_token("gho_integration").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();

    assert_eq!(store.access_token(), None);
}
