//! Cookie session settings read from the environment.
//!
//! | Variable                  | Values                      | Debug default |
//! |---------------------------|-----------------------------|---------------|
//! | `SESSION_KEY_FILE`        | path                        | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE`   | `1`/`0`/`true`/`false`/…    | `true`        |
//! | `SESSION_SAMESITE`        | `Strict`/`Lax`/`None`       | `Lax`         |
//! | `SESSION_ALLOW_EPHEMERAL` | boolean                     | `false`       |
//!
//! Debug builds warn and fall back to the defaults above; release builds
//! refuse to start unless every toggle is set to a valid value.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Minimum key file length in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// How strictly settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Warn and fall back to defaults.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    ///
    /// ```
    /// use apptrack::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_lenient(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    /// Signing and encryption key.
    pub key: Key,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
}

/// Reasons session settings are rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    /// A toggle is unset in a release build.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A toggle holds an unrecognised value in a release build.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// The key file could not be read and no fallback is allowed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file holds too few bytes.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// `SameSite=None` was requested for cookies without `Secure`.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys were requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Errors
/// Returns a [`SessionConfigError`] describing the first unusable setting.
/// Debug builds only fail for problems that have no safe default.
///
/// # Examples
/// ```
/// use apptrack::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key = tempfile::NamedTempFile::new()?;
/// std::fs::write(key.path(), [7_u8; 64])?;
/// let key_path = key.path().display().to_string();
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };

    let cookie_secure = toggles.read(COOKIE_SECURE_ENV, BOOL_EXPECTED, parse_bool, true)?;
    let same_site =
        toggles.read(SAMESITE_ENV, SAMESITE_EXPECTED, parse_same_site, SameSite::Lax)?;
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_lenient() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without SESSION_COOKIE_SECURE; browsers may drop the cookie");
    }

    let allow_ephemeral = toggles.read(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, parse_bool, false)?;
    if allow_ephemeral && !mode.is_lenient() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    let key_path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    let key = load_key(key_path, mode.is_lenient() || allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Applies the build mode's policy to each environment toggle.
struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    fn read<T>(
        &self,
        name: &'static str,
        expected: &'static str,
        parse: fn(&str) -> Option<T>,
        lenient_default: T,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            if self.mode.is_lenient() {
                warn!(variable = name, "not set; using development default");
                return Ok(lenient_default);
            }
            return Err(SessionConfigError::MissingEnv { name });
        };
        if let Some(parsed) = parse(&value) {
            return Ok(parsed);
        }
        if self.mode.is_lenient() {
            warn!(variable = name, value = %value, "unrecognised; using development default");
            return Ok(lenient_default);
        }
        Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        })
    }
}

fn load_key(path: PathBuf, allow_fallback: bool) -> Result<Key, SessionConfigError> {
    let failure = match std::fs::read(&path).map(Zeroizing::new) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => return Ok(Key::derive_from(&bytes)),
        Ok(bytes) => SessionConfigError::KeyTooShort {
            path,
            length: bytes.len(),
            min_len: SESSION_KEY_MIN_LEN,
        },
        Err(source) => SessionConfigError::KeyRead { path, source },
    };
    if !allow_fallback {
        return Err(failure);
    }
    warn!(error = %failure, "using temporary session key; sessions will not survive a restart");
    Ok(Key::generate())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
