//! # Configuration
//!
//! Settings come only from command-line flags. Resolution collapses
//! defaults → CLI overrides into a `ResolvedConfig` with concrete values,
//! rejecting anything that would break the layout or the input loop.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::core::directory::DEFAULT_MAX_ENTRIES;
use crate::core::preview::DEFAULT_PREVIEW_BYTES;

// ============================================================================
// Defaults
// ============================================================================

pub const MIN_COLUMNS: u16 = 80;
pub const MIN_ROWS: u16 = 24;
pub const DEFAULT_POLL_MS: u64 = 1000;
/// Row of the divider between the logo block and the preview pane.
pub const DEFAULT_DIVIDER_ROW: u16 = 6;
pub const MIN_DIVIDER_ROW: u16 = 3;
/// Keeps at least one preview row on a minimum-size terminal.
pub const MAX_DIVIDER_ROW: u16 = MIN_ROWS - 4;

// ============================================================================
// Overrides (CLI flags, None = not given)
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub preview_bytes: Option<usize>,
    pub poll_ms: Option<u64>,
    pub divider_row: Option<u16>,
    pub max_entries: Option<usize>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub preview_bytes: usize,
    pub poll_interval: Duration,
    pub divider_row: u16,
    pub max_entries: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            preview_bytes: DEFAULT_PREVIEW_BYTES,
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            divider_row: DEFAULT_DIVIDER_ROW,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--preview-bytes must be at least 1")]
    ZeroPreviewBytes,
    #[error("--poll-ms must be at least 1")]
    ZeroPollInterval,
    #[error("--divider-row must be between {MIN_DIVIDER_ROW} and {MAX_DIVIDER_ROW}, got {0}")]
    DividerRowOutOfRange(u16),
    #[error("--max-entries must be at least 1")]
    ZeroMaxEntries,
}

/// Resolve the final config: defaults, then CLI overrides.
pub fn resolve(overrides: &Overrides) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let preview_bytes = overrides.preview_bytes.unwrap_or(defaults.preview_bytes);
    if preview_bytes == 0 {
        return Err(ConfigError::ZeroPreviewBytes);
    }

    let poll_interval = match overrides.poll_ms {
        Some(0) => return Err(ConfigError::ZeroPollInterval),
        Some(ms) => Duration::from_millis(ms),
        None => defaults.poll_interval,
    };

    let divider_row = overrides.divider_row.unwrap_or(defaults.divider_row);
    if !(MIN_DIVIDER_ROW..=MAX_DIVIDER_ROW).contains(&divider_row) {
        return Err(ConfigError::DividerRowOutOfRange(divider_row));
    }

    let max_entries = overrides.max_entries.unwrap_or(defaults.max_entries);
    if max_entries == 0 {
        return Err(ConfigError::ZeroMaxEntries);
    }

    let resolved = ResolvedConfig {
        preview_bytes,
        poll_interval,
        divider_row,
        max_entries,
    };
    debug!("Config: {:?}", resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&Overrides::default()).unwrap();
        assert_eq!(resolved, ResolvedConfig::default());
        assert_eq!(resolved.preview_bytes, 200);
        assert_eq!(resolved.poll_interval, Duration::from_secs(1));
        assert_eq!(resolved.divider_row, 6);
    }

    #[test]
    fn test_resolve_overrides_win() {
        let overrides = Overrides {
            preview_bytes: Some(4096),
            poll_ms: Some(250),
            divider_row: Some(8),
            max_entries: Some(10),
        };
        let resolved = resolve(&overrides).unwrap();
        assert_eq!(resolved.preview_bytes, 4096);
        assert_eq!(resolved.poll_interval, Duration::from_millis(250));
        assert_eq!(resolved.divider_row, 8);
        assert_eq!(resolved.max_entries, 10);
    }

    #[test]
    fn test_resolve_rejects_zero_values() {
        let zero_bytes = Overrides {
            preview_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(&zero_bytes), Err(ConfigError::ZeroPreviewBytes));

        let zero_poll = Overrides {
            poll_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(&zero_poll), Err(ConfigError::ZeroPollInterval));

        let zero_entries = Overrides {
            max_entries: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(&zero_entries), Err(ConfigError::ZeroMaxEntries));
    }

    #[test]
    fn test_resolve_rejects_divider_outside_layout() {
        for row in [0, 2, MAX_DIVIDER_ROW + 1] {
            let overrides = Overrides {
                divider_row: Some(row),
                ..Default::default()
            };
            assert_eq!(
                resolve(&overrides),
                Err(ConfigError::DividerRowOutOfRange(row))
            );
        }
    }
}
