//! Platform identity and middleware path resolution.
//!
//! The platform is always an explicit value. Core logic never queries the
//! running operating system; the binary derives a [`Platform`] once and
//! injects it.

use std::fmt;
use std::str::FromStr;

/// Belgium eID middleware location on macOS.
pub const DARWIN_MIDDLEWARE_PATH: &str = "/Library/Belgium Identity Card/Pkcs11/libbeidpkcs11.dylib";

/// Belgium eID middleware location on Windows.
pub const WIN32_MIDDLEWARE_PATH: &str = "C:/Windows/System32/beidpkcs11.dll";

/// Belgium eID middleware location everywhere else.
pub const DEFAULT_MIDDLEWARE_PATH: &str = "/usr/lib/libbeidpkcs11.so";

/// Platform identifier, drawn from `{"darwin", "win32", <other>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Darwin,
    Win32,
    /// Any other identifier takes the generic (Linux-style) branch
    Other(String),
}

impl Platform {
    /// Parse a platform identifier (`darwin`, `win32`, anything else).
    pub fn from_id(id: &str) -> Self {
        match id {
            "darwin" => Platform::Darwin,
            "win32" => Platform::Win32,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Map a Rust target OS name (`std::env::consts::OS`) to a platform.
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "macos" => Platform::Darwin,
            "windows" => Platform::Win32,
            other => Platform::Other(other.to_string()),
        }
    }

    /// The identifier string for this platform.
    pub fn id(&self) -> &str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Win32 => "win32",
            Platform::Other(id) => id,
        }
    }

    /// Expected install location of the token middleware.
    ///
    /// Pure and infallible: the path is a best guess and may not exist.
    pub fn middleware_path(&self) -> &'static str {
        match self {
            Platform::Darwin => DARWIN_MIDDLEWARE_PATH,
            Platform::Win32 => WIN32_MIDDLEWARE_PATH,
            Platform::Other(_) => DEFAULT_MIDDLEWARE_PATH,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Platform::from_id(s))
    }
}
