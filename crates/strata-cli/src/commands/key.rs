//! `strata key` command implementation.
//!
//! Prints the canonical storage key for a filename and content hash.

use strata_core::error::StrataResult;
use strata_resolver::KeyBuilder;

use super::CommandContext;

/// Execute the `strata key` command
pub fn execute(
    filename: String,
    hash: String,
    variant: Option<String>,
    ctx: &CommandContext,
) -> StrataResult<()> {
    let key = ctx
        .store
        .keys()
        .build_key(&filename, &hash, variant.as_deref());
    println!("{}", key);
    Ok(())
}
