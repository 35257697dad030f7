//! # pkgrs UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Terminal interaction for commands. The archive engine itself never talks to
//! the operator; when it needs a decision (replace an existing unpack
//! destination?) it asks through the `ConfirmOverwrite` trait, and this module
//! supplies the terminal implementation.
//!
//! ## Architecture
//!
//! - **`prompts`**: `[y/N]` confirmation prompts built on `dialoguer`, plus
//!   `TerminalConfirm`, the `ConfirmOverwrite` implementation used by
//!   `package unpack --confirm` and `bundle extract --confirm`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::prompts::TerminalConfirm;
//!
//! let confirm = TerminalConfirm;
//! let options = UnpackOptions { confirm: Some(&confirm), ..Default::default() };
//! ```
//!
pub mod prompts;
