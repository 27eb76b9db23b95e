//! Cosmic Genesis rendering.
//!
//! Layout: header (title, language tabs, Big Crunch) / singularity + stats /
//! generator list / footer. The reset confirmation is drawn on top as a
//! modal and replaces every other click target while it is open.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::format::format_number;
use super::i18n::{strings, Strings};
use super::state::{GenesisState, Locale};

/// Singularity art, 3 rows × 9 cols. Frames rotate slowly.
const SINGULARITY_ART: &[[&str; 3]] = &[
    ["  .-*-.  ", " ( (@) ) ", "  '-*-'  "],
    ["  *-.-*  ", " ( (@) ) ", "  *-'-*  "],
    ["  .-+-.  ", " ( (@) ) ", "  '-+-'  "],
    ["  +-.-+  ", " ( (@) ) ", "  +-'-+  "],
];

/// Pressed state right after a harvest.
const SINGULARITY_FLASH: [&str; 3] = [" \\ .*. / ", "-( (@) )-", " / '*' \\ "];

const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];

pub fn render(
    state: &GenesisState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let t = strings(state.locale);
    let narrow = is_narrow_layout(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(state, t, f, chunks[0], click_state);

    if narrow {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(4),
                Constraint::Min(4),
            ])
            .split(chunks[1]);
        render_singularity(state, t, f, body[0], click_state);
        render_stats(state, t, f, body[1]);
        render_generators(state, t, f, body[2], click_state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(5)])
            .split(columns[0]);
        render_singularity(state, t, f, left[0], click_state);
        render_stats(state, t, f, left[1]);
        render_generators(state, t, f, columns[1], click_state);
    }

    render_footer(t, f, chunks[2]);

    if state.reset_pending {
        render_reset_overlay(t, f, area, click_state);
    }
}

// ── Header ──────────────────────────────────────────────────

fn render_header(
    state: &GenesisState,
    t: &Strings,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let reset_label = format!("[R] {}", t.big_crunch);
    let reset_width = Line::from(reset_label.as_str()).width() as u16 + 1;
    let tabs_width = Locale::all()
        .iter()
        .map(|l| Line::from(l.label()).width() as u16 + 2)
        .sum::<u16>()
        + 3 * (Locale::all().len() as u16 - 1);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(tabs_width + 1),
            Constraint::Length(reset_width),
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t.app_title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(t.version, Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(title, cols[0]);

    let mut cs = click_state.borrow_mut();

    let mut tabs = TabBar::new(" │ ");
    for locale in Locale::all() {
        let style = if *locale == state.locale {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        tabs = tabs.tab(locale.label(), style, LOCALE_BASE + locale.index() as u16);
    }
    tabs.render(f, cols[1], &mut cs);

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(
            reset_label,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        RESET_REQUEST,
    );
    cl.register_targets(cols[2], &mut cs, 0, 0, 0, 0);
    f.render_widget(Paragraph::new(cl.into_lines()), cols[2]);
}

// ── Singularity ─────────────────────────────────────────────

fn render_singularity(
    state: &GenesisState,
    t: &Strings,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let border_color = if state.click_flash > 0 {
        Color::White
    } else {
        Color::Magenta
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {}: {} ", t.target_label, t.target_name),
            Style::default().fg(Color::Magenta),
        ));
    let inner = block.inner(area);

    let art = if state.click_flash > 0 {
        &SINGULARITY_FLASH
    } else {
        &SINGULARITY_ART[(state.anim_frame / 5) as usize % SINGULARITY_ART.len()]
    };
    let art_color = if state.click_flash > 0 {
        Color::White
    } else {
        Color::LightMagenta
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for row in art {
        cl.push_clickable(
            Line::from(Span::styled(*row, Style::default().fg(art_color))),
            HARVEST,
        );
    }
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                "[C] ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(t.click_instruction, Style::default().fg(Color::White)),
        ]),
        HARVEST,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!("+{} {}", format_number(state.click_power()), t.click_power),
            Style::default().fg(Color::DarkGray),
        )),
        HARVEST,
    );

    {
        let mut cs = click_state.borrow_mut();
        // パネル全体が収穫ボタン
        cs.add_click_target(area, HARVEST);
        cl.register_targets_with_block(area, &block, &mut cs, 0, false);
    }

    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .alignment(Alignment::Center),
        area,
    );

    render_floaters(state, f, inner);
}

/// Harvest acknowledgements rise from the bottom of the panel and fade.
fn render_floaters(state: &GenesisState, f: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let center_x = area.x as i32 + area.width as i32 / 2;
    let bottom = area.y as i32 + area.height as i32 - 1;
    let right = area.x as i32 + area.width as i32;

    for floater in &state.floaters {
        let max_life = floater.max_life.max(1);
        let age = max_life.saturating_sub(floater.life);
        let rise = (age * area.height as u32 / max_life) as i32;
        let y = bottom - rise;
        if y < area.y as i32 {
            continue;
        }

        let text_width = Line::from(floater.text.as_str()).width() as i32;
        let x = (center_x + floater.col_offset as i32 - text_width / 2)
            .clamp(area.x as i32, (right - text_width).max(area.x as i32));
        let width = text_width.min(right - x);
        if width <= 0 {
            continue;
        }

        let color = if floater.life * 3 > max_life * 2 {
            Color::White
        } else if floater.life * 3 > max_life {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                floater.text.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Rect::new(x as u16, y as u16, width as u16, 1),
        );
    }
}

// ── Stats ───────────────────────────────────────────────────

fn render_stats(state: &GenesisState, t: &Strings, f: &mut Frame, area: Rect) {
    let mps = state.mps();
    let spinner = if mps > 0.0 {
        SPINNER[(state.anim_frame / 3) as usize % SPINNER.len()]
    } else {
        ' '
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {}: ", t.total_matter), Style::default().fg(Color::Gray)),
            Span::styled(
                format_number(state.matter),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!(" {} ", spinner), Style::default().fg(Color::Cyan)),
            Span::styled(
                format_number(mps),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", t.matter_per_sec), Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            format!(" {}", t.efficiency),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

// ── Generators ──────────────────────────────────────────────

fn render_generators(
    state: &GenesisState,
    t: &Strings,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();

    for (i, g) in state.generators.iter().enumerate() {
        let affordable = g.can_afford(state.matter);
        let action = BUY_GENERATOR_BASE + i as u16;
        let (key_style, name_style, cost_style) = if affordable {
            (
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Green),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::Red),
            )
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style),
                Span::raw(format!("{} ", g.def.icon)),
                Span::styled(t.generator_name(g.def), name_style),
                Span::styled(
                    format!("  {} {}", t.owned, g.count),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            action,
        );
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("     {}: ", t.cost), Style::default().fg(Color::DarkGray)),
                Span::styled(format_number(g.cost()), cost_style),
                Span::styled(
                    format!("  +{}/s", format_number(g.def.base_production)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            action,
        );
        if !narrow {
            cl.push_clickable(
                Line::from(Span::styled(
                    format!("     {}", t.generator_description(g.def)),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
                action,
            );
        }
    }

    let block = Block::default()
        .borders(if narrow {
            Borders::TOP | Borders::BOTTOM
        } else {
            Borders::ALL
        })
        .border_style(Style::default().fg(Color::Blue))
        .title(Span::styled(
            format!(" {} ", t.upgrade_title),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ));

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0, false);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Footer ──────────────────────────────────────────────────

fn render_footer(t: &Strings, f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Span::styled(
            t.footer_quote,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
        area,
    );
}

// ── Big Crunch confirmation ─────────────────────────────────

fn render_reset_overlay(
    t: &Strings,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let width = area.width.saturating_sub(4).min(50);
    let height = 9.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            format!(" {} ", t.big_crunch),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        t.big_crunch_confirm,
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            format!("[Y] {}", t.confirm_reset),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        RESET_CONFIRM,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!("[N] {}", t.cancel),
            Style::default().fg(Color::Gray),
        )),
        RESET_CANCEL,
    );

    {
        let mut cs = click_state.borrow_mut();
        // モーダル: 下の画面はタップできない
        cs.targets.clear();
        cl.register_targets_with_block(popup, &block, &mut cs, 0, true);
    }

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}
