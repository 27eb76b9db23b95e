//! Input plumbing: event type, click targets, and pixel → cell conversion.
//!
//! Rendering registers targets into [`ClickState`] every frame; the mouse
//! handler converts the DOM click position to a terminal cell and asks
//! [`ClickState::hit_test`] which action it landed on.

use ratzilla::ratatui::layout::Rect;

/// Normalized input from keyboard, mouse, or touch.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, identified by its action ID
    /// (see `genesis::actions`).
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cells.
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets of the last rendered frame plus the grid size they were
/// laid out on.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame at the given grid size.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on `row`, ignored if the row lies outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row < area.y || row >= area.y.saturating_add(area.height) {
            return;
        }
        self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
    }

    /// Targets for a horizontal row of labels.
    ///
    /// `label_widths` holds `(display_width, action_id)` per padded label.
    /// Each target covers its label plus half of each neighbouring
    /// separator; the first reaches the left edge and the last the right
    /// edge, so the whole strip is tappable.
    pub fn register_tab_targets(
        &mut self,
        label_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if label_widths.is_empty() || total_width == 0 {
            return;
        }

        // (start, end) column of each label relative to x
        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(label_widths.len());
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in label_widths.iter().enumerate() {
            if i > 0 {
                cursor = cursor.saturating_add(separator_width);
            }
            spans.push((cursor, cursor.saturating_add(w)));
            cursor = cursor.saturating_add(w);
        }

        let last = spans.len() - 1;
        for (i, &(_, action_id)) in label_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let gap_start = spans[i - 1].1;
                gap_start + (spans[i].0 - gap_start) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let gap_start = spans[i].1;
                gap_start + (spans[i + 1].0 - gap_start) / 2
            };
            let width = right.min(total_width).saturating_sub(left);
            self.add_click_target(Rect::new(x + left, y, width, height), action_id);
        }
    }

    /// Action under a cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }

    /// Convert a click relative to the grid's top-left corner into a cell
    /// and hit-test it.
    pub fn hit_test_pixels(
        &self,
        click_x: f64,
        click_y: f64,
        grid_width: f64,
        grid_height: f64,
    ) -> Option<u16> {
        let col = pixel_x_to_col(click_x, grid_width, self.terminal_cols)?;
        let row = pixel_y_to_row(click_y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrow (phone-width) layout below 60 columns.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel Y (relative to the grid top) → row, `None` outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel X (relative to the grid left edge) → column, `None` outside the grid.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if !(extent > 0.0) || cells == 0 || !(offset >= 0.0) {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
