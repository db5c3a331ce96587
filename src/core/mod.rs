//! # Core Browser Logic
//!
//! This module contains Telecommander's state and data handling.
//! It knows nothing about escape sequences or raw mode.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SessionState         │
//!                    │  • Action + update()    │
//!                    │  • DirectoryListing     │
//!                    │  • preview loading      │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (VT100 via │
//!                         │ crossterm) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SessionState`, page/cursor/preview state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`directory`]: directory snapshot and pagination maths
//! - [`preview`]: bounded file reads for the preview pane
//! - [`config`]: CLI overrides resolved into `ResolvedConfig`

pub mod action;
pub mod config;
pub mod directory;
pub mod preview;
pub mod state;
