//! Terminal rendering of the stopwatch screen.

use std::str::FromStr;

use lap_core::{format_clock, format_lap_label, Command, Control, Controls, LapRow, Stopwatch};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::config::ThemeConfig;

const BUTTON_WIDTH: u16 = 12;
const LAP_TEXT: Color = Color::White;
const DISABLED: Color = Color::DarkGray;
const STOP_FG: Color = Color::Rgb(0xE3, 0x39, 0x35);
const STOP_BG: Color = Color::Rgb(0x3C, 0x17, 0x15);
const GO_BG: Color = Color::Rgb(0x1B, 0x36, 0x1F);
const NEUTRAL_BG: Color = Color::Rgb(0x3D, 0x3D, 0x3D);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub fastest: Color,
    pub slowest: Color,
    pub accent: Color,
}

impl Theme {
    /// Colors are checked when the config is validated; anything
    /// unparseable here falls back to the built-in palette.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let fallback = Self::default();
        Self {
            fastest: Color::from_str(&config.fastest).unwrap_or(fallback.fastest),
            slowest: Color::from_str(&config.slowest).unwrap_or(fallback.slowest),
            accent: Color::from_str(&config.accent).unwrap_or(fallback.accent),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fastest: Color::Rgb(0x4B, 0xC0, 0x5F),
            slowest: Color::Rgb(0xCC, 0x35, 0x31),
            accent: Color::Rgb(0x50, 0xD1, 0x67),
        }
    }
}

/// Everything the screen shows, taken from the stopwatch at draw time.
pub struct StopwatchView<'a> {
    elapsed_ms: u64,
    rows: Vec<LapRow>,
    controls: Controls,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> StopwatchView<'a> {
    pub fn new(stopwatch: &Stopwatch, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            elapsed_ms: stopwatch.elapsed_ms(),
            rows: stopwatch.lap_rows(),
            controls: stopwatch.controls(),
            scroll,
            theme,
        }
    }

    fn button_style(&self, control: Control) -> (Style, Style) {
        let (fg, bg) = match control.command {
            Command::Start | Command::Resume => (self.theme.accent, GO_BG),
            Command::Stop => (STOP_FG, STOP_BG),
            Command::Lap | Command::Reset => (Color::White, NEUTRAL_BG),
        };
        if control.enabled {
            (Style::default().fg(fg).bg(bg), Style::default().fg(fg))
        } else {
            let dim = Style::default().fg(DISABLED);
            (dim.add_modifier(Modifier::DIM), dim)
        }
    }

    fn render_button(&self, control: Control, area: Rect, buf: &mut Buffer) {
        let (label_style, border_style) = self.button_style(control);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        Paragraph::new(Line::from(Span::styled(control.command.label(), label_style)))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }

    fn lap_line(&self, row: &LapRow, width: u16) -> Line<'static> {
        let color = if row.is_fastest {
            self.theme.fastest
        } else if row.is_slowest {
            self.theme.slowest
        } else {
            LAP_TEXT
        };
        let style = Style::default().fg(color);
        let label = format_lap_label(row.number);
        let time = format_clock(row.milliseconds);
        let gap = usize::from(width).saturating_sub(label.len() + time.len()).max(1);
        Line::from(vec![
            Span::styled(label, style),
            Span::raw(" ".repeat(gap)),
            Span::styled(time, style),
        ])
    }
}

impl Widget for &StopwatchView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title, timer, buttons, laps, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(Line::from(Span::styled(
            "STOPWATCH",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .render(title, buf);

        Paragraph::new(Line::from(Span::styled(
            format_clock(self.elapsed_ms),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM))
        .render(timer, buf);

        let [left, _, right] = Layout::horizontal([
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .areas(buttons);
        self.render_button(self.controls.left, left, buf);
        self.render_button(self.controls.right, right, buf);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .skip(self.scroll)
            .take(usize::from(laps.height))
            .map(|row| self.lap_line(row, laps.width))
            .collect();
        Paragraph::new(lines).render(laps, buf);

        Paragraph::new(Line::from(Span::styled(
            "space=start/stop/resume  l=lap/reset  j/k=scroll  q=quit",
            Style::default().fg(DISABLED),
        )))
        .render(footer, buf);
    }
}

/// Largest scroll offset that still fills the lap area.
pub fn max_scroll(rows: usize, visible: usize) -> usize {
    rows.saturating_sub(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render(sw: &Stopwatch, scroll: usize, area: Rect) -> Buffer {
        let theme = Theme::default();
        let view = StopwatchView::new(sw, scroll, &theme);
        let mut buf = Buffer::empty(area);
        (&view).render(area, &mut buf);
        buf
    }

    fn paused_session() -> Stopwatch {
        let mut sw = Stopwatch::new();
        sw.apply(Command::Start, 0).unwrap();
        sw.apply(Command::Lap, 1500).unwrap();
        sw.apply(Command::Stop, 2700).unwrap();
        sw.apply(Command::Resume, 3000).unwrap();
        sw.apply(Command::Stop, 3400).unwrap();
        sw
    }

    #[test]
    fn test_idle_screen() {
        let buf = render(&Stopwatch::new(), 0, Rect::new(0, 0, 40, 12));
        assert!(row_text(&buf, 0).starts_with("STOPWATCH"));
        assert!(row_text(&buf, 1).contains("00:00:00"));
        let buttons = row_text(&buf, 5);
        assert!(buttons.contains("Start"));
        let reset_x = (0..buf.area.width)
            .find(|&x| buf[(x, 5)].symbol() == "R")
            .unwrap();
        assert_eq!(buf[(reset_x, 5)].fg, DISABLED);
    }

    #[test]
    fn test_lap_rows_are_highlighted() {
        let buf = render(&paused_session(), 0, Rect::new(0, 0, 40, 12));
        assert!(row_text(&buf, 1).contains("00:03:10"));
        assert!(row_text(&buf, 5).contains("Resume"));

        let newest = row_text(&buf, 7);
        assert!(newest.starts_with("Lap 2"));
        assert!(newest.trim_end().ends_with("00:01:60"));
        assert_eq!(buf[(0, 7)].fg, Theme::default().slowest);

        let oldest = row_text(&buf, 8);
        assert!(oldest.starts_with("Lap 1"));
        assert!(oldest.trim_end().ends_with("00:01:50"));
        assert_eq!(buf[(0, 8)].fg, Theme::default().fastest);
    }

    #[test]
    fn test_scroll_skips_newest_rows() {
        let buf = render(&paused_session(), 1, Rect::new(0, 0, 40, 12));
        assert!(row_text(&buf, 7).starts_with("Lap 1"));
    }

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(3, 10), 0);
        assert_eq!(max_scroll(12, 10), 2);
    }

    #[test]
    fn test_theme_from_config() {
        let config = ThemeConfig {
            fastest: "blue".to_string(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.fastest, Color::Blue);
        assert_eq!(theme.slowest, Theme::default().slowest);
    }
}
