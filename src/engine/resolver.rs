//! Mode transition rules.
//!
//! The resolver is a pure function: given the mode that just expired, the
//! cycle counters, and the configuration, it computes the next mode and the
//! next counters. All rotation policy lives here; the engine only applies
//! the result.

use crate::types::{CycleState, TimerConfig, TimerMode};

// ============================================================================
// Transition
// ============================================================================

/// The resolver's output: the mode to enter and the updated counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Mode to enter next
    pub next_mode: TimerMode,
    /// Cycle counters after the transition
    pub next_cycle: CycleState,
}

// ============================================================================
// resolve
// ============================================================================

/// Computes the transition out of an expiring mode.
///
/// Rules:
/// - A completed focus period increments the in-cycle counter. When it
///   reaches `focus_units_per_cycle`, the cycle closes: next mode is a long
///   break, the in-cycle counter resets, and `cycles_completed` grows by 1.
///   Otherwise the next mode is a short break.
/// - Either break always leads back to focus, counters untouched.
///
/// With `focus_units_per_cycle = 1` every focus period closes a cycle, so a
/// short break never occurs. That configuration is valid.
pub fn resolve(current: TimerMode, cycle: CycleState, config: &TimerConfig) -> Transition {
    match current {
        TimerMode::Focus => {
            let completed = cycle.focus_units_completed + 1;
            if completed >= config.focus_units_per_cycle {
                Transition {
                    next_mode: TimerMode::LongBreak,
                    next_cycle: CycleState {
                        focus_units_completed: 0,
                        cycles_completed: cycle.cycles_completed + 1,
                    },
                }
            } else {
                Transition {
                    next_mode: TimerMode::ShortBreak,
                    next_cycle: CycleState {
                        focus_units_completed: completed,
                        cycles_completed: cycle.cycles_completed,
                    },
                }
            }
        }
        TimerMode::ShortBreak | TimerMode::LongBreak => Transition {
            next_mode: TimerMode::Focus,
            next_cycle: cycle,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
