//! Destination path expansion for link requests.
use std::path::{Path, PathBuf};

/// Expand a leading `~` in `destination` to `home`.
///
/// Only a bare `~` or `~/…` (`~\…` on Windows as well) is expanded;
/// `~user` forms and every other path are returned unchanged.
#[must_use]
pub fn expand_home(destination: &str, home: &Path) -> PathBuf {
    if destination == "~" {
        return home.to_path_buf();
    }
    let rest = destination.strip_prefix("~/").or_else(|| {
        if cfg!(windows) {
            destination.strip_prefix("~\\")
        } else {
            None
        }
    });
    rest.map_or_else(|| PathBuf::from(destination), |rest| home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_slash_expands_under_home() {
        let home = Path::new("/home/u");
        assert_eq!(expand_home("~/.bashrc", home), home.join(".bashrc"));
        assert_eq!(
            expand_home("~/.config/my_config_dir", home),
            home.join(".config/my_config_dir")
        );
    }

    #[test]
    fn bare_tilde_is_home() {
        assert_eq!(expand_home("~", Path::new("/home/u")), PathBuf::from("/home/u"));
    }

    #[test]
    fn other_paths_are_untouched() {
        let home = Path::new("/home/u");
        assert_eq!(expand_home("/etc/profile", home), PathBuf::from("/etc/profile"));
        assert_eq!(expand_home("~other/.bashrc", home), PathBuf::from("~other/.bashrc"));
        assert_eq!(expand_home("rel/~/x", home), PathBuf::from("rel/~/x"));
    }
}
