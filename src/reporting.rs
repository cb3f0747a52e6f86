use crate::applier::BatchResult;
use crate::errors::ClipwriteError;
use crate::trie::{Trie, TrieNode};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Logs the outcome of a batch: failures first, then the written files as a tree.
///
/// With `dry_run` the summary describes the files that would have been written.
pub fn report(result: &BatchResult, dry_run: bool) {
    debug!("Reporting batch of {} outcomes", result.outcomes.len());
    for failure in result.failures() {
        error!(
            "Failed to write {}: {}",
            failure.relative_path,
            failure.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    if result.processed_count == 0 {
        if dry_run {
            warn!("No files would be written.");
        } else {
            warn!("No files were written.");
        }
        return;
    }

    let mut trie = Trie::new();
    for outcome in result.outcomes.iter().filter(|outcome| outcome.success) {
        trie.insert(Path::new(&outcome.relative_path), outcome.bytes_written);
    }

    if dry_run {
        info!(
            "Dry run: {} file(s) would be written, nothing was changed.",
            result.processed_count
        );
    } else {
        info!("Successfully processed {} file(s).", result.processed_count);
    }
    print_tree(trie.get_root(), "", true);
}

/// Logs a top-level failure the way a user should see it.
pub fn report_error(err: &ClipwriteError) {
    match err {
        ClipwriteError::EmptyInput => warn!("Clipboard is empty."),
        ClipwriteError::NoMatchFound => {
            info!("No valid code blocks with file paths found in clipboard.")
        }
        ClipwriteError::NoWorkspace(reason) => {
            error!("No workspace folder is open. ({})", reason)
        }
        other => error!("{}", other),
    }
}

pub fn print_json(result: &BatchResult) -> Result<(), ClipwriteError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{}", json);
    Ok(())
}

fn print_tree(node: &TrieNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "┗━━" } else { "┣━━" };

    let mut children: Vec<_> = node.children.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));

    for (i, (name, child)) in children.iter().enumerate() {
        let is_last_child = i == children.len() - 1;
        let new_prefix = format!("{}{}    ", prefix, if is_last_child { " " } else { "┃" });

        match child.byte_count {
            Some(bytes) if child.children.is_empty() => {
                info!(
                    "{}{} {} {} ({} bytes)",
                    prefix,
                    connector,
                    get_file_icon(Path::new(name.as_str())),
                    name,
                    bytes
                );
            }
            _ => {
                info!(
                    "{}{}📂 {} ({} bytes)",
                    prefix,
                    connector,
                    name,
                    child.calculate_total_bytes()
                );
                print_tree(child, &new_prefix, is_last_child);
            }
        }
    }
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") | Some("pyi") => "🐍",
        Some("js") | Some("mjs") | Some("cjs") => "🟨",
        Some("ts") | Some("tsx") => "🔷",
        Some("jsx") => "⚛️",
        Some("html") | Some("htm") => "🌐",
        Some("css") | Some("scss") | Some("sass") => "🎨",
        Some("java") | Some("kt") | Some("kts") => "☕",
        Some("c") | Some("h") | Some("cpp") | Some("hpp") | Some("cc") => "🇨",
        Some("go") => "🐹",
        Some("rb") => "💎",
        Some("php") => "🐘",
        Some("swift") => "🕊️",
        Some("rs") => "🦀",
        Some("json") => "🔖",
        Some("yaml") | Some("yml") => "🗂️",
        Some("toml") | Some("ini") | Some("conf") => "⚙️",
        Some("lock") => "🔒",
        Some("md") | Some("markdown") => "📝",
        Some("sh") | Some("bash") | Some("zsh") => "🐚",
        _ => "📄",
    }
}
