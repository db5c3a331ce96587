//! # Preview Loading
//!
//! Reads the head of a file and turns it into display lines for the preview
//! pane. The read is bounded: at most `max_bytes` are ever pulled from the
//! file, however large it is. Any byte that is neither printable ASCII nor
//! whitespace rejects the whole preview; nothing partial is produced.
//!
//! Only regular files are opened. Opening a FIFO or a terminal device for
//! reading can block indefinitely, and the event loop is single-threaded.

use std::fs::{self, File, FileType};
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

/// Default number of bytes read for a preview.
pub const DEFAULT_PREVIEW_BYTES: usize = 200;

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("cannot open {name}: {reason}")]
    NotFound { name: String, reason: String },
    #[error("{name} is not a regular file ({kind})")]
    NotRegular { name: String, kind: &'static str },
    #[error("{name} is binary (byte 0x{byte:02x} at offset {offset})")]
    BinaryContent {
        name: String,
        offset: usize,
        byte: u8,
        /// Detected file type, e.g. `image/png (png)`.
        kind: Option<String>,
    },
}

/// Text ready to be written into the preview region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPreview {
    pub lines: Vec<String>,
    /// Lines or columns were cut to fit the region.
    pub truncated: bool,
    /// The file is longer than the byte cap.
    pub clipped: bool,
}

/// Size of the area a preview is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewBounds {
    pub rows: usize,
    pub columns: usize,
}

/// Loads `path` (displayed as `name`) for the preview pane.
pub fn load_preview(
    path: &Path,
    name: &str,
    max_bytes: usize,
    bounds: PreviewBounds,
) -> Result<RenderedPreview, PreviewError> {
    let not_found = |err: std::io::Error| {
        warn!("Preview of {name} failed: {err}");
        PreviewError::NotFound {
            name: name.to_string(),
            reason: err.to_string(),
        }
    };

    // Follows symlinks, so a link to a device is caught here too.
    let meta = fs::metadata(path).map_err(not_found)?;
    if !meta.is_file() {
        let kind = describe_file_type(meta.file_type());
        warn!("Refusing to preview {name}: {kind}");
        return Err(PreviewError::NotRegular {
            name: name.to_string(),
            kind,
        });
    }

    let mut file = File::open(path).map_err(not_found)?;
    let file_len = meta.len();

    let mut buffer = Vec::with_capacity(max_bytes);
    file.by_ref()
        .take(max_bytes as u64)
        .read_to_end(&mut buffer)
        .map_err(not_found)?;

    if let Some((offset, &byte)) = buffer
        .iter()
        .enumerate()
        .find(|&(_, &b)| !is_previewable_byte(b))
    {
        let kind = describe_kind(&buffer);
        warn!("Refusing to preview {name}: byte 0x{byte:02x} at offset {offset}");
        return Err(PreviewError::BinaryContent {
            name: name.to_string(),
            offset,
            byte,
            kind,
        });
    }

    // Every byte is ASCII at this point.
    let text = String::from_utf8_lossy(&buffer);
    let mut preview = layout_lines(&text, bounds);
    preview.clipped = file_len > max_bytes as u64;
    debug!(
        "Previewing {name}: {} bytes, {} lines",
        buffer.len(),
        preview.lines.len()
    );
    Ok(preview)
}

/// Printable ASCII or whitespace (space, tab, newline, CR, vertical tab, form feed).
pub fn is_previewable_byte(byte: u8) -> bool {
    byte.is_ascii_graphic() || byte.is_ascii_whitespace() || byte == 0x0b
}

/// Splits `text` on newlines and fits it into `bounds`. Lines are cut, never
/// wrapped, and lines past the last row are dropped.
pub fn layout_lines(text: &str, bounds: PreviewBounds) -> RenderedPreview {
    let mut preview = RenderedPreview::default();
    for (index, raw) in text.lines().enumerate() {
        if index >= bounds.rows {
            preview.truncated = true;
            break;
        }
        let expanded = expand_line(raw.trim_end_matches('\r'));
        if expanded.len() > bounds.columns {
            preview.truncated = true;
            preview
                .lines
                .push(expanded.chars().take(bounds.columns).collect());
        } else {
            preview.lines.push(expanded);
        }
    }
    preview
}

fn expand_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = TAB_WIDTH - out.len() % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', pad));
            }
            c if c.is_ascii_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

fn describe_file_type(file_type: FileType) -> &'static str {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_fifo() {
            return "named pipe";
        }
        if file_type.is_char_device() {
            return "character device";
        }
        if file_type.is_block_device() {
            return "block device";
        }
        if file_type.is_socket() {
            return "socket";
        }
    }
    if file_type.is_dir() {
        "directory"
    } else {
        "special file"
    }
}

fn describe_kind(buffer: &[u8]) -> Option<String> {
    infer::get(buffer).map(|kind| format!("{} ({})", kind.mime_type(), kind.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_dir;

    const BOUNDS: PreviewBounds = PreviewBounds {
        rows: 16,
        columns: 40,
    };

    #[test]
    fn test_text_file_splits_on_newlines() {
        let dir = fixture_dir(&[("notes.txt", b"first\nsecond\n\nfourth\n")]);
        let preview =
            load_preview(&dir.path().join("notes.txt"), "notes.txt", 200, BOUNDS).unwrap();
        assert_eq!(preview.lines, vec!["first", "second", "", "fourth"]);
        assert!(!preview.truncated);
        assert!(!preview.clipped);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = fixture_dir(&[]);
        let err = load_preview(&dir.path().join("nope"), "nope", 200, BOUNDS).unwrap_err();
        assert!(matches!(err, PreviewError::NotFound { ref name, .. } if name == "nope"));
    }

    #[test]
    fn test_directory_is_not_regular() {
        let dir = fixture_dir(&[]);
        fs::create_dir(dir.path().join("sub")).unwrap();
        let err = load_preview(&dir.path().join("sub"), "sub", 200, BOUNDS).unwrap_err();
        assert_eq!(
            err,
            PreviewError::NotRegular {
                name: "sub".into(),
                kind: "directory",
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_is_refused_without_blocking() {
        use std::process::Command;
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let dir = fixture_dir(&[]);
        let fifo = dir.path().join("pipe");
        let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        // Run on another thread so a regression fails the test instead of hanging it.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(load_preview(&fifo, "pipe", 200, BOUNDS));
        });
        let outcome = rx
            .recv_timeout(Duration::from_secs(3))
            .expect("opening a FIFO must not block");
        assert_eq!(
            outcome,
            Err(PreviewError::NotRegular {
                name: "pipe".into(),
                kind: "named pipe",
            })
        );
    }

    #[test]
    fn test_binary_byte_rejects_whole_preview() {
        let dir = fixture_dir(&[("mixed.bin", b"hello\nworld\x00tail")]);
        let err = load_preview(&dir.path().join("mixed.bin"), "mixed.bin", 200, BOUNDS)
            .unwrap_err();
        match err {
            PreviewError::BinaryContent { offset, byte, .. } => {
                assert_eq!(offset, 11);
                assert_eq!(byte, 0);
            }
            other => panic!("expected BinaryContent, got {other:?}"),
        }
    }

    #[test]
    fn test_non_ascii_utf8_counts_as_binary() {
        let dir = fixture_dir(&[("accent.txt", "caf\u{e9}".as_bytes())]);
        let err = load_preview(&dir.path().join("accent.txt"), "accent.txt", 200, BOUNDS)
            .unwrap_err();
        assert!(matches!(err, PreviewError::BinaryContent { offset: 3, .. }));
    }

    #[test]
    fn test_png_header_reports_kind() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let dir = fixture_dir(&[("pic.png", png)]);
        let err = load_preview(&dir.path().join("pic.png"), "pic.png", 200, BOUNDS).unwrap_err();
        match err {
            PreviewError::BinaryContent { kind, .. } => {
                let kind = kind.expect("png header should be recognised");
                assert!(kind.starts_with("image/"), "{kind}");
            }
            other => panic!("expected BinaryContent, got {other:?}"),
        }
    }

    #[test]
    fn test_read_stops_at_byte_cap() {
        // The NUL sits past the cap, so it is never read.
        let mut content = b"abcdefghij".to_vec();
        content.push(0);
        let dir = fixture_dir(&[("long.txt", &content)]);
        let preview = load_preview(&dir.path().join("long.txt"), "long.txt", 10, BOUNDS).unwrap();
        assert_eq!(preview.lines, vec!["abcdefghij"]);
        assert!(preview.clipped);
    }

    #[test]
    fn test_rows_beyond_region_are_dropped() {
        let text = (1..=20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let preview = layout_lines(&text, PreviewBounds { rows: 3, columns: 40 });
        assert_eq!(preview.lines, vec!["line 1", "line 2", "line 3"]);
        assert!(preview.truncated);
    }

    #[test]
    fn test_long_lines_are_cut_not_wrapped() {
        let preview = layout_lines("0123456789abcdef\nok", PreviewBounds { rows: 5, columns: 10 });
        assert_eq!(preview.lines, vec!["0123456789", "ok"]);
        assert!(preview.truncated);
    }

    #[test]
    fn test_tabs_and_carriage_returns() {
        let preview = layout_lines("a\tb\r\n\tc", BOUNDS);
        assert_eq!(preview.lines, vec!["a   b", "    c"]);
    }

    #[test]
    fn test_whitespace_bytes_are_previewable() {
        for byte in [b' ', b'\t', b'\n', b'\r', 0x0b, 0x0c] {
            assert!(is_previewable_byte(byte), "0x{byte:02x}");
        }
        for byte in [0x00, 0x07, 0x1b, 0x7f, 0x80, 0xff] {
            assert!(!is_previewable_byte(byte), "0x{byte:02x}");
        }
    }
}
