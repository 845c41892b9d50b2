use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::error::AuthError;
use super::token::Token;

const DEFAULT_TOKEN_FILE: &str = ".fbtoken";

/// Storage abstraction for the persisted bearer token.
///
/// `load` never fails: anything that prevents reading a token is reported as
/// "no token" so the caller falls through to a fresh authorization.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<Token>;
    fn save(&self, token: &Token) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Single-file token store: one line holding the bearer string.
///
/// # Example
/// ```no_run
/// use graphpub::auth::{FileTokenStore, Token, TokenStore};
///
/// let store = FileTokenStore::new("/tmp/.fbtoken");
/// store.save(&Token::new("access"))?;
/// assert_eq!(store.load().map(|t| t.access_token).as_deref(), Some("access"));
/// # Ok::<(), graphpub::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn new_default() -> Self {
        Self::new(Self::default_path())
    }

    /// `~/.fbtoken`, or `.fbtoken` in the working directory without a home.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(DEFAULT_TOKEN_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time of the token file, if it exists.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<Token> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No token file");
                return None;
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Unreadable token file");
                return None;
            }
        };
        let access_token = raw.trim_end_matches(['\r', '\n']);
        if access_token.is_empty() {
            return None;
        }
        Some(Token::new(access_token))
    }

    fn save(&self, token: &Token) -> Result<(), AuthError> {
        Self::ensure_parent(&self.path)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path)?;
        file.write_all(token.access_token.as_bytes())?;
        file.flush()?;

        tracing::debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::FileAccess(err.to_string())),
        }
    }
}
