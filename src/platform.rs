//! Platform detection and link capabilities.
use std::fmt;

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS, the BSDs and anything else with POSIX symlinks.
    Unix,
    /// Windows, where symlink creation must say whether the target is a directory.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (for testing).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Returns `true` on Windows.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// Whether creating a symlink to a directory needs an explicit
    /// "target is a directory" hint.
    #[must_use]
    pub const fn requires_directory_hint(&self) -> bool {
        self.is_windows()
    }

    const fn detect_os() -> Os {
        if cfg!(windows) { Os::Windows } else { Os::Unix }
    }
}
