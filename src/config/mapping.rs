//! The declarative link mapping: named groups of `source = destination` pairs.
use serde::Deserialize;
use std::collections::BTreeMap;

/// Default file name of the mapping, looked up in the base directory.
pub const DEFAULT_FILE_NAME: &str = "dotlink.toml";

/// Example mapping shown when the real one is missing or malformed.
pub const FORMAT_EXAMPLE: &str = r#"[bashrc]
"bash/bashrc" = "~/.bashrc"              # File symlink

[config_directory]
".config" = "~/.config/my_config_dir"    # Directory symlink
"#;

/// All groups of a mapping file, keyed by group name.
///
/// Groups and entries are held in sorted maps, so iteration order is
/// deterministic regardless of the order in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    groups: BTreeMap<String, LinkGroup>,
}

/// One named group: source paths (relative to the base directory) mapped to
/// destination paths (possibly starting with `~`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LinkGroup {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    /// Parse a mapping from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not TOML or is not a table of tables
    /// of strings.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Iterate `(group name, group)` pairs.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &LinkGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the mapping has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(LinkGroup::len).sum()
    }
}

impl LinkGroup {
    /// Iterate `(source, destination)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, destination)| (source.as_str(), destination.as_str()))
    }

    /// Number of entries in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the group has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(&str, &[(&str, &str)]); N]> for Mapping {
    fn from(groups: [(&str, &[(&str, &str)]); N]) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(name, entries)| {
                    let entries = entries
                        .iter()
                        .map(|(s, d)| ((*s).to_string(), (*d).to_string()))
                        .collect();
                    (name.to_string(), LinkGroup { entries })
                })
                .collect(),
        }
    }
}

/// Text printed when the mapping cannot be used.
#[must_use]
pub fn guidance(file_name: &str) -> String {
    format!(
        "\nError: Could not find '{file_name}' or illegal format found.\n\
         Please create a '{file_name}' file in the base directory with the following format:\n\
         \n\
         Example of '{file_name}':\n\
         \n\
         {FORMAT_EXAMPLE}"
    )
}
