use clipwrite::errors::ClipwriteError;
use clipwrite::extractor::{extract_blocks, CodeBlock, Extractor};
use clipwrite::paste::{paste_from_source, BasicClipboardPaster, ClipboardPaster, PasteConfig};
use clipwrite::reporting::{report, report_error};
use clipwrite::source::{resolve_workspace_root, FileSource, StaticText, TextSource};
use std::path::Path;
use tempfile::tempdir;
use tokio::fs;
use tracing_test::traced_test;

fn config_for(root: &Path) -> PasteConfig {
    PasteConfig {
        root: Some(root.to_path_buf()),
        ..PasteConfig::default()
    }
}

#[tokio::test]
async fn test_paste_single_typescript_block() {
    let dir = tempdir().unwrap();
    let paster = BasicClipboardPaster::new(config_for(dir.path()));

    let result = paster
        .paste_text("```ts\n// src/a.ts\nconsole.log(1)\n```")
        .await
        .unwrap_or_else(|e| panic!("Paste failed: {:?}", e));

    assert_eq!(result.processed_count, 1);
    let content = fs::read_to_string(dir.path().join("src/a.ts")).await.unwrap();
    assert_eq!(content, "console.log(1)\n");
}

#[tokio::test]
async fn test_paste_two_blocks_into_new_directories() {
    let dir = tempdir().unwrap();
    let text = r#"Sure! Here are the files:

```rust
// crates/core/src/lib.rs
pub fn answer() -> u32 {
    42
}
```

And the web client:

```typescript
// web/src/api/client.ts
export const answer = () => 42;
```
"#;

    let paster = BasicClipboardPaster::new(config_for(dir.path()));
    let result = paster.paste_text(text).await.unwrap();

    assert_eq!(result.processed_count, 2);
    assert_eq!(result.outcomes.len(), extract_blocks(text).len());
    assert_eq!(
        fs::read_to_string(dir.path().join("crates/core/src/lib.rs"))
            .await
            .unwrap(),
        "pub fn answer() -> u32 {\n    42\n}\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("web/src/api/client.ts"))
            .await
            .unwrap(),
        "export const answer = () => 42;\n"
    );
}

#[tokio::test]
async fn test_paste_text_without_blocks_reports_no_match() {
    let dir = tempdir().unwrap();
    let paster = BasicClipboardPaster::new(config_for(dir.path()));

    assert!(extract_blocks("hello world").is_empty());
    let result = paster.paste_text("hello world").await;
    assert!(
        matches!(result, Err(ClipwriteError::NoMatchFound)),
        "Expected NoMatchFound, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_paste_whitespace_only_text_is_empty_input() {
    let dir = tempdir().unwrap();
    let paster = BasicClipboardPaster::new(config_for(dir.path()));

    for text in ["", "   ", "\n\t\r\n"] {
        let result = paster.paste_text(text).await;
        assert!(
            matches!(result, Err(ClipwriteError::EmptyInput)),
            "Expected EmptyInput for {:?}, got {:?}",
            text,
            result
        );
    }
}

#[tokio::test]
async fn test_paste_without_workspace_is_rejected() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let paster = BasicClipboardPaster::new(config_for(&missing));

    let result = paster.paste_text("```\n// a.txt\na\n```").await;
    assert!(matches!(result, Err(ClipwriteError::NoWorkspace(_))));
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_paste_continues_past_failing_block() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("locked"), "file, not dir").await.unwrap();
    let text = "```\n// locked/a.txt\na\n```\n```\n// free/b.txt\nb\n```\n";

    let paster = BasicClipboardPaster::new(config_for(dir.path()));
    let result = paster.paste_text(text).await.unwrap();

    assert_eq!(result.outcomes.len(), 2);
    assert_eq!(result.processed_count, 1);
    assert!(!result.outcomes[0].success);
    assert!(result.outcomes[1].success);
    assert!(dir.path().join("free/b.txt").exists());
}

#[tokio::test]
async fn test_paste_dry_run_leaves_workspace_untouched() {
    let dir = tempdir().unwrap();
    let config = PasteConfig {
        dry_run: true,
        ..config_for(dir.path())
    };

    let result = BasicClipboardPaster::new(config)
        .paste_text("```\n// planned/a.txt\na\n```")
        .await
        .unwrap();

    assert_eq!(result.processed_count, 1);
    assert!(!dir.path().join("planned").exists());
}

#[tokio::test]
async fn test_paste_from_static_and_file_sources() {
    let dir = tempdir().unwrap();
    let text = "```sh\n// scripts/build.sh\necho build\n```";

    let mut source = StaticText(text.to_string());
    let result = paste_from_source(config_for(dir.path()), &mut source)
        .await
        .unwrap();
    assert_eq!(result.processed_count, 1);

    let input = dir.path().join("answer.md");
    fs::write(&input, text.replace("build.sh", "test.sh"))
        .await
        .unwrap();
    let mut file_source = FileSource::new(&input);
    assert!(file_source.read_text().await.unwrap().contains("scripts/test.sh"));
    let result = paste_from_source(config_for(dir.path()), &mut file_source)
        .await
        .unwrap();
    assert_eq!(result.processed_count, 1);

    assert!(dir.path().join("scripts/build.sh").exists());
    assert!(dir.path().join("scripts/test.sh").exists());
}

#[tokio::test]
async fn test_resolve_workspace_root_rejects_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "x").await.unwrap();

    assert!(matches!(
        resolve_workspace_root(Some(file)).await,
        Err(ClipwriteError::NoWorkspace(_))
    ));
    assert!(matches!(
        resolve_workspace_root(Some(dir.path().join("missing"))).await,
        Err(ClipwriteError::NoWorkspace(_))
    ));
    assert_eq!(
        resolve_workspace_root(Some(dir.path().to_path_buf()))
            .await
            .unwrap(),
        dir.path()
    );
}

#[tokio::test]
#[traced_test]
async fn test_report_logs_summary_and_failures() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blocked"), "").await.unwrap();
    let text = "```\n// src/a.rs\nfn a() {}\n```\n```\n// blocked/b.rs\nfn b() {}\n```\n```\n// src/c.rs\nfn c() {}\n```";

    let result = BasicClipboardPaster::new(config_for(dir.path()))
        .paste_text(text)
        .await
        .unwrap();
    report(&result, false);

    assert!(logs_contain("Successfully processed 2 file(s)."));
    assert!(logs_contain("Failed to write blocked/b.rs"));
    assert!(logs_contain("a.rs (10 bytes)"));
}

#[test]
#[traced_test]
fn test_report_error_messages() {
    report_error(&ClipwriteError::EmptyInput);
    report_error(&ClipwriteError::NoMatchFound);
    report_error(&ClipwriteError::NoWorkspace("gone".to_string()));

    assert!(logs_contain("Clipboard is empty."));
    assert!(logs_contain(
        "No valid code blocks with file paths found in clipboard."
    ));
    assert!(logs_contain("No workspace folder is open."));
}

#[tokio::test]
async fn test_batch_result_serializes_to_json() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blocked"), "").await.unwrap();
    let text = "```\n// ok.txt\nok\n```\n```\n// blocked/no.txt\nno\n```";

    let result = BasicClipboardPaster::new(config_for(dir.path()))
        .paste_text(text)
        .await
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["processed_count"], 1);
    assert_eq!(json["outcomes"][0]["relative_path"], "ok.txt");
    assert_eq!(json["outcomes"][0]["success"], true);
    assert!(json["outcomes"][0].get("error_message").is_none());
    assert_eq!(json["outcomes"][1]["success"], false);
    assert!(json["outcomes"][1]["error_message"].is_string());
}

#[tokio::test]
#[traced_test]
async fn test_report_dry_run_says_nothing_was_written() {
    let dir = tempdir().unwrap();
    let config = PasteConfig {
        dry_run: true,
        ..config_for(dir.path())
    };

    let result = BasicClipboardPaster::new(config)
        .paste_text("```\n// planned/a.txt\nabc\n```")
        .await
        .unwrap();
    report(&result, true);

    assert!(logs_contain("Dry run: 1 file(s) would be written, nothing was changed."));
    assert!(!logs_contain("Successfully processed"));
    assert!(!dir.path().join("planned").exists());
}

struct FixedExtractor;

impl Extractor for FixedExtractor {
    fn extract(&self, _text: &str) -> Vec<CodeBlock> {
        vec![CodeBlock::new("fixed/out.txt", "from a custom extractor\n")]
    }
}

#[tokio::test]
async fn test_paste_with_custom_extractor() {
    let dir = tempdir().unwrap();
    let paster =
        BasicClipboardPaster::new(config_for(dir.path())).with_extractor(Box::new(FixedExtractor));

    // No fenced blocks at all: the swapped-in extractor decides what gets written.
    let result = paster.paste_text("plain prose, no fences").await.unwrap();

    assert_eq!(result.processed_count, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("fixed/out.txt"))
            .await
            .unwrap(),
        "from a custom extractor\n"
    );
}
