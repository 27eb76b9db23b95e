//! Clickable UI components.
//!
//! Each component renders itself and registers its click targets in the
//! same call, so what the player sees and what they can tap never drift
//! apart.
//!
//! - [`TabBar`]: one row of labels (the language selector).
//! - [`ClickableList`]: lines where some rows carry an action.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Horizontal row of labels, each bound to an action.
///
/// Target positions come from the rendered display width, so CJK labels
/// such as `中文` line up with what is on screen.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("EN", active_style, LOCALE_BASE)
///     .tab("中文", idle_style, LOCALE_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Targets are placed inside the block's borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label.
    fn label_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(padded(label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let widths = self.label_widths();
        let separator_width = Line::from(self.separator).width() as u16;

        let mut spans: Vec<Span> = Vec::with_capacity(self.tabs.len() * 2);
        for (i, (label, style, _)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(padded(&label), style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let mut paragraph = Paragraph::new(Line::from(spans));
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        f.render_widget(paragraph, area);

        // 横は内側、縦は外枠ごと (タップしやすく)
        cs.register_tab_targets(
            &widths,
            separator_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

fn padded(label: &str) -> String {
    format!(" {} ", label)
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the actions of their clickable rows.
///
/// Rows are bound by line index, so inserting a header above a clickable
/// line moves its target along with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Cosmic Fabrication"));
/// cl.push_clickable(Line::from(" [1] Stardust Collector"), BUY_GENERATOR_BASE);
/// cl.register_targets_with_block(area, &block, &mut cs, 0, false);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for content drawn inside `block` at `area`.
    ///
    /// Pass `wrapped = true` when the paragraph uses `Wrap`, so long lines
    /// are measured against the block's inner width.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
        wrapped: bool,
    ) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        let width = if wrapped { inner.width } else { 0 };
        self.register_targets(area, cs, top, bottom, scroll, width);
    }

    /// Register one full-width target per visible row of each clickable line.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders or padding.
    /// * `scroll`: visual rows scrolled off the top.
    /// * `inner_width`: wrap width; `0` means one row per line.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_top = area.y + top_offset;
        let content_end = (area.y + area.height).saturating_sub(bottom_offset);

        // visual row where each line starts, plus how many rows it spans
        let mut starts: Vec<(u16, u16)> = Vec::with_capacity(self.lines.len());
        let mut row: u16 = 0;
        for line in &self.lines {
            let height = if inner_width == 0 {
                1
            } else {
                (line.width().max(1)).div_ceil(inner_width as usize) as u16
            };
            starts.push((row, height));
            row = row.saturating_add(height);
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = starts.get(idx) else {
                continue;
            };
            for visual in start..start.saturating_add(height) {
                if visual < scroll {
                    continue;
                }
                let screen_row = content_top + (visual - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}
