//! Display surface that draws the widget as text
//!
//! Stands in for a desktop window: each refresh prints the cost card,
//! budget bar and top services. Colors use 24-bit ANSI escapes when
//! enabled.

use crate::core::{DisplaySurface, DisplayUpdate};
use cost_widget_types::Color;
use log::{debug, warn};
use std::io::{self, Stdout, Write};

/// Width of the budget bar in characters
const BAR_WIDTH: usize = 24;

/// Column where service costs are right-aligned
const ROW_WIDTH: usize = 40;

pub struct TerminalDisplay<W: Write> {
    out: W,
    use_color: bool,
    position: (i32, i32),
    closed: bool,
}

impl TerminalDisplay<Stdout> {
    /// Draw to stdout, with color
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            position: (0, 0),
            closed: false,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the display and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b, _) = color.to_rgba8();
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
    }

    fn bar(fill: f64) -> String {
        let filled = ((fill * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }

    fn write_update(&mut self, update: &DisplayUpdate) -> io::Result<()> {
        let status_color = update.severity.color();
        let cost = self.paint(&update.cost_text, update.cost_color);
        let percentage = self.paint(&update.percentage_text, status_color);
        let bar = self.paint(&Self::bar(update.progress_fill), status_color);

        writeln!(self.out, "== Cloud Costs ==")?;
        writeln!(self.out, "Month-to-Date Spend  {}", cost)?;
        writeln!(self.out, "  {}", update.budget_text)?;
        writeln!(self.out, "Budget Usage  {} {}", bar, percentage)?;
        writeln!(self.out, "Top Services")?;
        if update.services.is_empty() {
            writeln!(self.out, "  (no spend yet this month)")?;
        }
        for row in &update.services {
            let label = format!("#{} {}", row.rank, row.name);
            let pad = ROW_WIDTH.saturating_sub(label.chars().count() + row.cost_text.len());
            writeln!(
                self.out,
                "  {}{}{}  ({} events)",
                label,
                " ".repeat(pad.max(1)),
                row.cost_text,
                row.activity_count
            )?;
        }
        writeln!(self.out, "Updated {}", update.updated_text)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySurface for TerminalDisplay<W> {
    fn render(&mut self, update: &DisplayUpdate) {
        if self.closed {
            debug!("Ignoring render on closed display");
            return;
        }
        if let Err(e) = self.write_update(update) {
            warn!("Failed to draw update: {}", e);
        }
    }

    fn reposition(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        debug!("Widget moved to ({}, {})", x, y);
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush display on close: {}", e);
        }
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        let heading = self.paint(&format!("!! {}", title), Color::STATUS_RED);
        let result =
            writeln!(self.out, "{}\n{}\n", heading, message).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to show error '{}': {}", title, e);
        }
    }
}
