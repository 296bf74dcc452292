//! Non-fatal checks over a loaded mapping.
use std::collections::HashMap;
use std::path::Path;

use super::mapping::Mapping;

/// A validation warning detected during configuration loading.
///
/// Warnings never stop a run; each entry is still handed to the resolver,
/// which reports its own outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The group the entry belongs to.
    pub group: String,
    /// The source key (or group name) that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning from anything string-like.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check a mapping for entries that are likely mistakes.
///
/// Flags empty groups, empty source or destination strings, absolute
/// sources (which ignore the base directory when joined) and destinations
/// claimed by more than one entry.
#[must_use]
pub fn validate(mapping: &Mapping) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut claimed: HashMap<&str, (&str, &str)> = HashMap::new();

    for (group, links) in mapping.groups() {
        if links.is_empty() {
            warnings.push(ValidationWarning::new(group, group, "group has no entries"));
        }

        for (source, destination) in links.entries() {
            if source.trim().is_empty() {
                warnings.push(ValidationWarning::new(group, source, "source path is empty"));
            } else if Path::new(source).is_absolute() || source.starts_with('/') {
                warnings.push(ValidationWarning::new(
                    group,
                    source,
                    "source path should be relative to the base directory",
                ));
            }

            if destination.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    group,
                    source,
                    "destination path is empty",
                ));
                continue;
            }

            if let Some((other_group, other_source)) = claimed.get(destination) {
                warnings.push(ValidationWarning::new(
                    group,
                    source,
                    format!(
                        "destination {destination} is also claimed by {other_source} in [{other_group}]"
                    ),
                ));
            } else {
                claimed.insert(destination, (group, source));
            }
        }
    }

    warnings
}
