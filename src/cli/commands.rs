//! Command definitions for the Focustick CLI.
//!
//! Uses clap derive macro for argument parsing. Numeric bounds mirror the
//! engine's configuration bounds so most invalid input is rejected before a
//! request is ever sent.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{ConfigParams, DisplayStyle, TimerMode};

// ============================================================================
// CLI Structure
// ============================================================================

/// Focustick - A Pomodoro countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "focustick",
    version,
    about = "ポモドーロ・カウントダウンタイマーCLI",
    long_about = "ターミナル上で動作するシンプルなポモドーロタイマー。\n\
                  serveコマンドでデーモンを起動し、他のコマンドで操作します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer daemon in the foreground
    Serve(ServeArgs),

    /// Start or resume the countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Restore the current mode's full duration and stop
    Reset,

    /// Manually switch to a mode (focus / short_break / long_break)
    Switch {
        /// Target mode
        #[arg(value_parser = parse_mode)]
        mode: TimerMode,
    },

    /// Update the timer configuration
    Set(ConfigArgs),

    /// Show current timer status
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Configuration Arguments
// ============================================================================

/// Configuration options shared by `serve` and `set`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Focus duration in minutes (1-60)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub focus: Option<u32>,

    /// Short break duration in minutes (1-30)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub short_break: Option<u32>,

    /// Long break duration in minutes (1-60)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: Option<u32>,

    /// Focus periods before a long break (1-10)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub per_cycle: Option<u32>,

    /// Automatically start the next period on expiry (true/false)
    #[arg(long)]
    pub auto_advance: Option<bool>,

    /// Play a chime when a period expires (true/false)
    #[arg(long)]
    pub sound: Option<bool>,

    /// Display style (classic / animated)
    #[arg(long, value_parser = parse_display_style)]
    pub display: Option<DisplayStyle>,
}

impl ConfigArgs {
    /// Converts the arguments into a wire-format configuration patch.
    pub fn to_params(&self) -> ConfigParams {
        ConfigParams {
            focus_minutes: self.focus,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            focus_units_per_cycle: self.per_cycle,
            auto_advance: self.auto_advance,
            play_sound_on_expiry: self.sound,
            display_style: self.display,
        }
    }
}

// ============================================================================
// Serve Command Arguments
// ============================================================================

/// Arguments for the serve command
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Initial configuration overrides
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Socket path (default: ~/.focustick/focustick.sock)
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Audio file to use as the expiry chime
    #[arg(long)]
    pub sound_file: Option<PathBuf>,

    /// Run without audio output
    #[arg(long)]
    pub silent: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a mode name, rejecting anything outside the closed enumeration.
fn parse_mode(s: &str) -> Result<TimerMode, String> {
    s.parse::<TimerMode>().map_err(|e| e.to_string())
}

/// Parses a display style name.
fn parse_display_style(s: &str) -> Result<DisplayStyle, String> {
    s.parse()
}

// ============================================================================
// Tests
// ============================================================================
