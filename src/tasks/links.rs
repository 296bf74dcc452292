//! Walk a mapping and resolve each entry into a link outcome.
use std::path::Path;

use super::Context;
use crate::config::Mapping;
use crate::resources::LinkOutcome;
use crate::resources::symlink::LinkRequest;

/// Link every entry of every group in `mapping`.
///
/// Sources are resolved against `base_dir`. A skipped or failed entry never
/// stops the walk; each outcome is recorded on the context's logger.
pub fn process(mapping: &Mapping, base_dir: &Path, ctx: &Context) {
    for (group, links) in mapping.groups() {
        ctx.log.stage(group);
        if links.is_empty() {
            ctx.log.debug(&format!("[{group}] has no entries"));
            continue;
        }
        for (source, destination) in links.entries() {
            resolve(ctx, source, destination, base_dir);
        }
    }
}

/// Resolve a single mapping entry and record its outcome.
pub fn resolve(ctx: &Context, source: &str, destination: &str, base_dir: &Path) -> LinkOutcome {
    let request = LinkRequest::new(base_dir, source, destination, &ctx.home);
    ctx.log.debug(&format!("resolving {}", request.description()));

    let outcome = ctx.resolver().resolve(&request);
    let detail = outcome.detail();
    ctx.log
        .record_link(&request.description(), outcome.status(), detail.as_deref());
    outcome
}
