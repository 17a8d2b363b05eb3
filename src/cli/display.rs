//! Display utilities for the Focustick CLI.
//!
//! This module provides formatted output for:
//! - Success messages
//! - Error messages
//! - Status display with the configured rendering style

use crate::types::{DisplayStyle, IpcResponse, ResponseData};

/// Width of the animated progress bar in characters.
const PROGRESS_BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for timer start.
    pub fn show_start_success(response: &IpcResponse) {
        println!("> {}", response.message);
        Self::show_remaining(&response.data);
    }

    /// Shows a success message for timer pause.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| {}", response.message);
        Self::show_remaining(&response.data);
    }

    /// Shows a success message for timer reset.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] {}", response.message);
        Self::show_remaining(&response.data);
    }

    /// Shows a success message for a mode switch.
    pub fn show_switch_success(response: &IpcResponse) {
        let mode = response
            .data
            .as_ref()
            .and_then(|d| d.mode.as_deref())
            .map(Self::mode_display_name)
            .unwrap_or("?");
        println!("> モードを切り替えました: {}", mode);
        Self::show_remaining(&response.data);
    }

    /// Shows a success message for a configuration update.
    pub fn show_set_success(response: &IpcResponse) {
        println!("* {}", response.message);
        Self::show_remaining(&response.data);
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("Focustick ステータス");
        println!("─────────────────────────────");

        let Some(data) = &response.data else {
            println!("タイマーは起動していません");
            return;
        };

        let mode = data.mode.as_deref().unwrap_or("unknown");
        println!("モード: {}", Self::mode_display_name(mode));

        if let Some(running) = data.running {
            println!("状態: {}", if running { "実行中" } else { "停止中" });
        }

        if let Some(remaining) = data.remaining_seconds {
            let (minutes, seconds) = Self::format_time(remaining);
            println!("残り時間: {}:{:02}", minutes, seconds);
        }

        if let Some(progress) = data.progress {
            match data.display_style {
                Some(DisplayStyle::Animated) => {
                    println!(
                        "進捗: {} {:3.0}%",
                        Self::render_progress_bar(progress, PROGRESS_BAR_WIDTH),
                        progress * 100.0
                    );
                }
                _ => {
                    println!("進捗: {:.0}%", progress * 100.0);
                }
            }
        }

        if let Some(units) = data.focus_units_completed {
            println!("サイクル内の集中回数: {}", units);
        }
        if let Some(cycles) = data.cycles_completed {
            println!("完了サイクル数: {}", cycles);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows the remaining time line if the response carries it.
    fn show_remaining(data: &Option<ResponseData>) {
        if let Some(data) = data {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  残り時間: {}:{:02}", minutes, seconds);
            }
        }
    }

    /// Maps a wire mode name to its display name.
    fn mode_display_name(mode: &str) -> &str {
        match mode {
            "focus" => "集中",
            "short_break" => "短い休憩",
            "long_break" => "長い休憩",
            other => other,
        }
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }

    /// Renders a textual progress bar for the animated style.
    fn render_progress_bar(progress: f64, width: usize) -> String {
        let clamped = progress.clamp(0.0, 1.0);
        let filled = (clamped * width as f64).round() as usize;
        let mut bar = String::with_capacity(width + 2);
        bar.push('[');
        for i in 0..width {
            bar.push(if i < filled { '█' } else { '░' });
        }
        bar.push(']');
        bar
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Format Time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(Display::format_time(0), (0, 0));
        }

        #[test]
        fn test_format_time_seconds_only() {
            assert_eq!(Display::format_time(45), (0, 45));
        }

        #[test]
        fn test_format_time_one_minute() {
            assert_eq!(Display::format_time(60), (1, 0));
        }

        #[test]
        fn test_format_time_mixed() {
            assert_eq!(Display::format_time(1500), (25, 0));
            assert_eq!(Display::format_time(1499), (24, 59));
        }
    }

    // ------------------------------------------------------------------------
    // Mode Display Name Tests
    // ------------------------------------------------------------------------

    mod mode_name_tests {
        use super::*;

        #[test]
        fn test_known_modes() {
            assert_eq!(Display::mode_display_name("focus"), "集中");
            assert_eq!(Display::mode_display_name("short_break"), "短い休憩");
            assert_eq!(Display::mode_display_name("long_break"), "長い休憩");
        }

        #[test]
        fn test_unknown_mode_passes_through() {
            assert_eq!(Display::mode_display_name("mystery"), "mystery");
        }
    }

    // ------------------------------------------------------------------------
    // Progress Bar Tests
    // ------------------------------------------------------------------------

    mod progress_bar_tests {
        use super::*;

        #[test]
        fn test_empty_bar() {
            let bar = Display::render_progress_bar(0.0, 10);
            assert_eq!(bar, "[░░░░░░░░░░]");
        }

        #[test]
        fn test_full_bar() {
            let bar = Display::render_progress_bar(1.0, 10);
            assert_eq!(bar, "[██████████]");
        }

        #[test]
        fn test_half_bar() {
            let bar = Display::render_progress_bar(0.5, 10);
            assert_eq!(bar, "[█████░░░░░]");
        }

        #[test]
        fn test_out_of_range_clamped() {
            assert_eq!(Display::render_progress_bar(-0.5, 4), "[░░░░]");
            assert_eq!(Display::render_progress_bar(1.5, 4), "[████]");
        }
    }

    // ------------------------------------------------------------------------
    // Output Smoke Tests
    // ------------------------------------------------------------------------

    mod output_tests {
        use super::*;

        fn sample_response(style: DisplayStyle) -> IpcResponse {
            IpcResponse::success(
                "タイマーを開始しました",
                Some(ResponseData {
                    mode: Some("focus".to_string()),
                    remaining_seconds: Some(1500),
                    progress: Some(0.0),
                    running: Some(true),
                    focus_units_completed: Some(0),
                    cycles_completed: Some(0),
                    display_style: Some(style),
                }),
            )
        }

        #[test]
        fn test_show_functions_do_not_panic() {
            let classic = sample_response(DisplayStyle::Classic);
            let animated = sample_response(DisplayStyle::Animated);

            Display::show_start_success(&classic);
            Display::show_pause_success(&classic);
            Display::show_reset_success(&classic);
            Display::show_switch_success(&classic);
            Display::show_set_success(&classic);
            Display::show_status(&classic);
            Display::show_status(&animated);
            Display::show_status(&IpcResponse::success("", None));
            Display::show_error("テストエラー");
        }
    }
}
