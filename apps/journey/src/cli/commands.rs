//! # CLI Command Implementations

use crate::admin::authorize;
use crate::config::JourneyConfig;
use crate::store::JsonFileStore;
use crate::terminal;
use journey_core::{FeedbackStore, JourneyError, export_text, newest_first};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Validate output path for security.
///
/// The parent directory must exist; it is canonicalized so the returned path
/// has no `..` or symlinked components.
pub fn validate_output_path(path: &Path) -> Result<PathBuf, JourneyError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        JourneyError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(JourneyError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| JourneyError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// PLAY COMMAND
// =============================================================================

/// Run the journey in the terminal.
pub async fn cmd_play(config: &JourneyConfig) -> Result<(), JourneyError> {
    let store = JsonFileStore::new(&config.store_path);
    tracing::info!(
        event = "journey_started",
        store = %store.path().display(),
        "Starting journey"
    );
    terminal::run(config, store).await
}

// =============================================================================
// MESSAGES COMMANDS
// =============================================================================

/// Check the passphrase from `--key`, or ask for it on stdin.
pub fn authorize_viewer(config: &JourneyConfig, key: Option<String>) -> Result<(), JourneyError> {
    let provided = match key {
        Some(key) => key,
        None => read_passphrase()?,
    };
    authorize(&provided, &config.admin_key)
}

fn read_passphrase() -> Result<String, JourneyError> {
    print!("Enter admin key: ");
    std::io::stdout()
        .flush()
        .map_err(|e| JourneyError::IoError(e.to_string()))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| JourneyError::IoError(e.to_string()))?;
    Ok(line)
}

/// Print every message, newest first.
pub fn cmd_messages_list(config: &JourneyConfig, json_mode: bool) -> Result<(), JourneyError> {
    let store = JsonFileStore::new(&config.store_path);
    let records = store.records()?;

    if json_mode {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| JourneyError::SerializationError(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    println!("💌 Birthday Messages ({})", records.len());
    println!();
    if records.is_empty() {
        println!("No messages yet.");
        return Ok(());
    }

    for (i, m) in newest_first(&records).into_iter().enumerate() {
        println!("#{}  {}  ({})", records.len() - i, m.name, m.time);
        println!("    {}", m.message);
        println!(
            "    Reflection: {} | Memory: {} | Gallery: {}",
            m.quiz_answer, m.memory_choice, m.gallery_choice
        );
        println!();
    }
    Ok(())
}

/// Write the plain-text export.
pub fn cmd_messages_export(config: &JourneyConfig, output: &Path) -> Result<(), JourneyError> {
    let store = JsonFileStore::new(&config.store_path);
    let records = store.records()?;

    let Some(text) = export_text(&records) else {
        println!("No messages to download.");
        return Ok(());
    };

    let validated = validate_output_path(output)?;
    std::fs::write(&validated, text).map_err(|e| {
        JourneyError::IoError(format!("Cannot write '{}': {}", validated.display(), e))
    })?;

    tracing::info!(
        event = "messages_exported",
        count = records.len(),
        output = %validated.display(),
        "Messages exported"
    );
    println!("Exported {} messages to {}", records.len(), validated.display());
    Ok(())
}

/// Delete every stored message. Requires `--yes`.
pub fn cmd_messages_clear(config: &JourneyConfig, confirmed: bool) -> Result<(), JourneyError> {
    if !confirmed {
        println!("This deletes all messages. Run again with --yes to confirm.");
        return Ok(());
    }

    let mut store = JsonFileStore::new(&config.store_path);
    store.clear()?;
    println!("All messages cleared.");
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
