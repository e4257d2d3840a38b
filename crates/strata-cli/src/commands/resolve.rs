//! `strata resolve` command implementation.
//!
//! Resolves a request path against the catalog and reports both the access
//! verdict and the status the store would answer with.

use strata_core::error::{StrataError, StrataResult};
use strata_store::SessionAccess;

use super::CommandContext;

/// Execute the `strata resolve` command
pub async fn execute(
    path: String,
    authenticated: bool,
    grants: Vec<String>,
    ctx: &CommandContext,
) -> StrataResult<()> {
    let access = build_access(authenticated, &grants)?;

    // One resolution drives both lines of output, so the printed verdict
    // can never disagree with the served status.
    let verdict = ctx.store.resolve(&path, &access).await?;
    let response = ctx.store.respond(&verdict, &path, &access).await?;

    println!("verdict: {}", verdict);
    println!("status: {}", response.status);

    Ok(())
}

/// Build per-request access state from CLI flags
pub(crate) fn build_access(authenticated: bool, grants: &[String]) -> StrataResult<SessionAccess> {
    let access = if authenticated {
        SessionAccess::authenticated()
    } else {
        SessionAccess::anonymous()
    };

    for pair in grants {
        let (filename, hash) = pair.split_once('=').ok_or_else(|| StrataError::ConfigValidation {
            field: "grant".to_string(),
            reason: format!("expected FILE=HASH, got '{}'", pair),
        })?;
        access.grants().grant(filename, hash);
    }

    Ok(access)
}
