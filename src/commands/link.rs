//! Command: create every link described by the mapping file.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, LinkOpts};
use crate::config::{Config, DEFAULT_FILE_NAME, mapping};
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::resources::symlink::ConflictPolicy;
use crate::tasks::{Context, links};

/// Run the link command.
///
/// Individual skipped or failed links do not make the command fail; only a
/// missing or unusable mapping file (or a missing home directory) does.
///
/// # Errors
///
/// Returns an error if the mapping file cannot be located or loaded, or if
/// the home directory cannot be determined.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("dotlink {}", super::version::version()));
    log.debug(&format!("platform: {}", Platform::detect().os));

    let path = locate_config(global)?;
    let config = load(&path, log.as_ref())?;

    let ctx = Context::new(
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        conflict_policy(opts),
    )?;
    link_all(&config, &ctx);

    log.print_summary();
    let failed = log.failure_count();
    if failed > 0 {
        log.warn(&format!("{failed} link(s) failed; see messages above"));
    }
    Ok(())
}

/// Load the mapping at `path`, reporting validation warnings.
///
/// On failure the format guidance is logged before the error is returned.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or malformed.
pub fn load(path: &Path, log: &dyn Log) -> Result<Config> {
    log.stage("Loading configuration");
    let config = match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            log.error(&e.to_string());
            let file_name = path
                .file_name()
                .map_or_else(|| DEFAULT_FILE_NAME.into(), |n| n.to_string_lossy());
            for line in mapping::guidance(&file_name).lines() {
                log.info(line);
            }
            return Err(e).with_context(|| format!("load mapping: {}", path.display()));
        }
    };

    log.info(&format!(
        "loaded {} links in {} groups from {}",
        config.mapping.entry_count(),
        config.mapping.len(),
        config.path.display()
    ));
    log.debug(&format!("base directory: {}", config.base_dir.display()));

    let warnings = config.validate();
    if !warnings.is_empty() {
        log.warn(&format!(
            "found {} configuration warning(s):",
            warnings.len()
        ));
        for warning in &warnings {
            log.warn(&format!(
                "  [{}] {}: {}",
                warning.group, warning.item, warning.message
            ));
        }
    }
    Ok(config)
}

/// Link every entry of a loaded mapping.
pub fn link_all(config: &Config, ctx: &Context) {
    if ctx.dry_run {
        ctx.log.info("dry run: no changes will be made");
    }
    links::process(&config.mapping, &config.base_dir, ctx);
}

/// Path of the mapping file: `--config`, else `dotlink.toml` in the root.
///
/// # Errors
///
/// Returns an error if the root falls back to the current directory and it
/// cannot be read.
pub fn locate_config(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref path) = global.config {
        return Ok(path.clone());
    }
    Ok(resolve_root(global)?.join(DEFAULT_FILE_NAME))
}

/// Resolve the directory holding the mapping file from CLI arguments,
/// `DOTLINK_ROOT`, or the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }
    if let Ok(root) = std::env::var("DOTLINK_ROOT")
        && !root.is_empty()
    {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().context("cannot determine current directory")
}

fn conflict_policy(opts: &LinkOpts) -> ConflictPolicy {
    opts.on_conflict
        .map_or(ConflictPolicy::Ask, |choice| ConflictPolicy::Always(choice.into()))
}
