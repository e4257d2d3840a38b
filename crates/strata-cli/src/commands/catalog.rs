//! `strata catalog` subcommands.
//!
//! Maintain the version catalog and keep the blob trees in step with it:
//! new drafts land in the protected tree, publication promotes the live
//! blob into the public tree, retirement demotes it back.

use camino::Utf8PathBuf;
use strata_core::error::{StrataError, StrataResult};
use strata_core::types::version::short_hash;
use strata_resolver::KeyBuilder;
use strata_store::{content_digest, Visibility};
use tracing::info;

use crate::CatalogAction;
use super::CommandContext;

/// Execute a `strata catalog` subcommand
pub async fn execute(action: CatalogAction, ctx: &CommandContext) -> StrataResult<()> {
    match action {
        CatalogAction::Add { filename, file } => add(filename, file, ctx).await,
        CatalogAction::Publish { filename } => publish(filename, ctx),
        CatalogAction::Unpublish { filename } => unpublish(filename, ctx),
        CatalogAction::Archive { filename } => archive(filename, ctx),
        CatalogAction::List { filename, json } => list(filename, json, ctx),
    }
}

/// Record a new draft version from a local file
async fn add(filename: String, file: Utf8PathBuf, ctx: &CommandContext) -> StrataResult<()> {
    let content = tokio::fs::read(&file)
        .await
        .map_err(|e| StrataError::io(format!("Failed to read {}", file), e))?;

    let hash = content_digest(&content);
    let version_id = ctx.store.repo().record(&filename, &hash);
    let key = ctx.store.keys().build_key(&filename, &hash, None);
    ctx.store.blobs().put(&key, &content, Visibility::Protected)?;
    ctx.save_catalog()?;

    info!("recorded draft {:?} v{}", filename, version_id);
    println!("recorded {} v{} ({})", filename, version_id, short_hash(&hash));
    Ok(())
}

/// Promote the newest draft of a file to the live stage
fn publish(filename: String, ctx: &CommandContext) -> StrataResult<()> {
    let previous = ctx.store.repo().live_version(&filename);

    let Some(version) = ctx.store.repo().publish(&filename) else {
        println!("no draft versions recorded for {}", filename);
        return Ok(());
    };

    // The public tree holds exactly the live content. Drop the blob of a
    // superseded live version before promoting the new one.
    if let Some(previous) = previous {
        if previous.content_hash != version.content_hash {
            let old_key = ctx
                .store
                .keys()
                .build_key(&filename, &previous.content_hash, None);
            ctx.store.blobs().remove(&old_key, Visibility::Public)?;
        }
    }

    let key = ctx
        .store
        .keys()
        .build_key(&filename, &version.content_hash, None);
    if ctx.store.blobs().contains(&key, Visibility::Protected) {
        ctx.store.blobs().promote(&key)?;
    }
    ctx.save_catalog()?;

    info!("published {:?} v{}", filename, version.version_id);
    println!("published {} v{} -> {}", filename, version.version_id, key);
    Ok(())
}

/// Take a file off the live stage, keeping its history
fn unpublish(filename: String, ctx: &CommandContext) -> StrataResult<()> {
    let Some(live) = ctx.store.repo().live_version(&filename) else {
        println!("{} has no live version", filename);
        return Ok(());
    };

    ctx.store.repo().unpublish(&filename);
    let key = ctx
        .store
        .keys()
        .build_key(&filename, &live.content_hash, None);
    if ctx.store.blobs().contains(&key, Visibility::Public) {
        ctx.store.blobs().demote(&key)?;
    }
    ctx.save_catalog()?;

    info!("unpublished {:?} v{}", filename, live.version_id);
    println!("unpublished {} v{}", filename, live.version_id);
    Ok(())
}

/// Remove a file, its version history, and every stored blob
fn archive(filename: String, ctx: &CommandContext) -> StrataResult<()> {
    let Some(record) = ctx.store.repo().get(&filename) else {
        println!("unknown file {}", filename);
        return Ok(());
    };

    for version in &record.versions {
        let key = ctx
            .store
            .keys()
            .build_key(&filename, &version.content_hash, None);
        ctx.store.blobs().remove(&key, Visibility::Public)?;
        ctx.store.blobs().remove(&key, Visibility::Protected)?;
    }

    ctx.store.repo().archive(&filename);
    ctx.save_catalog()?;

    info!("archived {:?}", filename);
    println!("archived {}", filename);
    Ok(())
}

/// List catalog records, one file or all of them
fn list(filename: Option<String>, json: bool, ctx: &CommandContext) -> StrataResult<()> {
    let names = match filename {
        Some(name) => vec![name],
        None => ctx.store.repo().filenames(),
    };

    if json {
        let mut entries = serde_json::Map::new();
        for name in &names {
            if let Some(record) = ctx.store.repo().get(name) {
                entries.insert(
                    name.clone(),
                    serde_json::to_value(&record).map_err(|e| StrataError::SnapshotParse {
                        message: format!("Failed to serialize record: {}", e),
                    })?,
                );
            }
        }
        println!("{}", serde_json::Value::Object(entries));
        return Ok(());
    }

    for name in &names {
        let Some(record) = ctx.store.repo().get(name) else {
            println!("unknown file {}", name);
            continue;
        };
        println!("{}", name);
        for version in &record.versions {
            let marker = if record.live == Some(version.version_id) {
                "live"
            } else if version.was_published {
                "retired"
            } else {
                "draft"
            };
            println!(
                "  v{} {} {}",
                version.version_id,
                short_hash(&version.content_hash),
                marker
            );
        }
    }
    Ok(())
}
