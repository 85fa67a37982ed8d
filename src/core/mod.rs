//! Scheduling, timers and the display contract

mod display;
mod source_selection;
mod timer;
mod update_manager;

pub use display::{DisplaySurface, DisplayUpdate, ServiceRow};
pub use source_selection::{select_source, select_source_with, SourceSelection, StartupNotice};
pub use timer::{ManualTimerHost, TimerCallback, TimerHandle, TimerHost, TokioTimerHost};
pub use update_manager::{ScheduleState, SchedulerStats, UpdateScheduler};
