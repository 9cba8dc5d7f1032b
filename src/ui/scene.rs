//! Dino runner scene rendering.
//!
//! Cell-buffer approach: everything is stamped into a 2D grid of styled
//! characters, then emitted row by row as Paragraph widgets. World
//! coordinates are scaled onto however many cells the terminal offers, so the
//! same simulation renders at any size.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_status_bar,
};
use crate::game::types::{
    CLOUD_W, ENEMY_W, GROUND_LINE, PLAYER_SIZE, PLAYER_X, WORLD_H, WORLD_W,
};
use crate::game::{DinoGame, GamePhase, ObstacleKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const PROJECTILE_CHAR: char = '•';

/// Fixed star field stamped only in night mode (col, row, glyph).
const STARS: [(usize, usize, char); 6] = [
    (7, 1, '·'),
    (19, 3, '+'),
    (33, 2, '·'),
    (47, 1, '·'),
    (53, 4, '+'),
    (26, 5, '·'),
];

/// Day/night scene palette. Toggling night mode swaps this and nothing else.
struct Palette {
    border: Color,
    sky_bg: Color,
    ground_fg: Color,
    ground_bg: Color,
    ground_sub: Color,
    player: Color,
    cloud: Color,
    projectile: Color,
    star: Color,
}

fn palette(night: bool) -> Palette {
    if night {
        Palette {
            border: Color::LightBlue,
            sky_bg: Color::Rgb(8, 8, 28),
            ground_fg: Color::Rgb(70, 60, 90),
            ground_bg: Color::Rgb(30, 26, 46),
            ground_sub: Color::Rgb(55, 48, 72),
            player: Color::LightCyan,
            cloud: Color::Rgb(90, 90, 120),
            projectile: Color::LightYellow,
            star: Color::Rgb(180, 180, 210),
        }
    } else {
        Palette {
            border: Color::LightYellow,
            sky_bg: Color::Reset,
            ground_fg: Color::Rgb(150, 120, 80),
            ground_bg: Color::Rgb(80, 64, 40),
            ground_sub: Color::Rgb(120, 96, 64),
            player: Color::Rgb(60, 60, 60),
            cloud: Color::Gray,
            projectile: Color::Rgb(200, 140, 0),
            star: Color::Reset,
        }
    }
}

/// Glyph and color for an obstacle kind.
fn obstacle_sprite(kind: ObstacleKind) -> (char, Color) {
    match kind {
        ObstacleKind::Cactus => ('|', Color::Rgb(60, 140, 60)),
        ObstacleKind::Rock => ('#', Color::Rgb(140, 110, 80)),
        ObstacleKind::Bush => ('*', Color::Rgb(50, 130, 50)),
        ObstacleKind::Sign => ('T', Color::Rgb(150, 150, 150)),
    }
}

/// Render the full game screen for the current phase.
pub fn render_scene(frame: &mut Frame, area: Rect, game: &DinoGame) {
    if game.phase == GamePhase::GameOver {
        render_game_over(frame, area, game);
        return;
    }

    let pal = palette(game.night_mode);
    let layout = create_game_layout(frame, area, " Dino Dash ", pal.border, 15, 22);

    render_play_field(frame, layout.content, game, &pal);

    if game.phase == GamePhase::Idle {
        render_start_prompt(frame, layout.content);
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Cell in the render buffer.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &DinoGame, pal: &Palette) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let render_height = area.height as usize;
    let render_width = area.width as usize;

    let sky = Cell {
        ch: ' ',
        fg: Color::Reset,
        bg: pal.sky_bg,
    };
    let mut buffer: Vec<Vec<Cell>> = vec![vec![sky; render_width]; render_height];

    let x_scale = render_width as f64 / WORLD_W;
    let y_scale = render_height as f64 / WORLD_H;

    // ── Stars (night only) ────────────────────────────────────────────
    if game.night_mode {
        for &(col, row, ch) in &STARS {
            if col < render_width && row < render_height {
                buffer[row][col] = Cell {
                    ch,
                    fg: pal.star,
                    bg: pal.sky_bg,
                };
            }
        }
    }

    // ── Clouds (behind everything else) ───────────────────────────────
    for cloud in &game.clouds {
        let row = ((cloud.y * y_scale).round() as usize).min(render_height - 1);
        let start = (cloud.x * x_scale).round() as i32;
        let width = ((CLOUD_W * x_scale).round() as i32).max(3);
        for dx in 0..width {
            let col = start + dx;
            if col >= 0 && (col as usize) < render_width {
                buffer[row][col as usize] = Cell {
                    ch: '▒',
                    fg: pal.cloud,
                    bg: pal.sky_bg,
                };
            }
        }
    }

    // ── Ground ────────────────────────────────────────────────────────
    let ground_row = (((GROUND_LINE * y_scale).round() as usize).max(1)).min(render_height - 1);
    for row in buffer.iter_mut().skip(ground_row) {
        for cell in row.iter_mut() {
            *cell = Cell {
                ch: GROUND_CHAR,
                fg: pal.ground_fg,
                bg: pal.ground_bg,
            };
        }
    }
    if ground_row > 0 {
        for (i, cell) in buffer[ground_row - 1].iter_mut().enumerate() {
            if cell.ch == ' ' && i % 5 == 0 {
                *cell = Cell {
                    ch: GROUND_SUB,
                    fg: pal.ground_sub,
                    bg: pal.sky_bg,
                };
            }
        }
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    for obstacle in &game.obstacles {
        let (ch, fg) = obstacle_sprite(obstacle.kind);
        let start = (obstacle.x * x_scale).round() as i32;
        let width = ((obstacle.width * x_scale).ceil() as i32).max(1);
        let height = ((obstacle.height * y_scale).round() as i32).max(1);

        for dx in 0..width {
            let col = start + dx;
            if col < 0 || col as usize >= render_width {
                continue;
            }
            for dy in 0..height {
                let row = ground_row as i32 - 1 - dy;
                if row >= 0 {
                    buffer[row as usize][col as usize] = Cell {
                        ch,
                        fg,
                        bg: pal.sky_bg,
                    };
                }
            }
        }
    }

    // ── Enemies (birds, wings flap on a slow clock) ───────────────────
    let wing = if (game.tick_count / 6) % 2 == 0 { 'v' } else { 'w' };
    for enemy in &game.enemies {
        let row = ((enemy.y * y_scale).round() as usize).min(render_height - 1);
        let start = (enemy.x * x_scale).round() as i32;
        let width = ((ENEMY_W * x_scale).round() as i32).max(2);
        for dx in 0..width {
            let col = start + dx;
            if col >= 0 && (col as usize) < render_width {
                buffer[row][col as usize] = Cell {
                    ch: wing,
                    fg: Color::Rgb(160, 80, 160),
                    bg: pal.sky_bg,
                };
            }
        }
    }

    // ── Projectiles ───────────────────────────────────────────────────
    for shot in &game.projectiles {
        let row = ((shot.y * y_scale).round() as usize).min(render_height - 1);
        let col = (shot.x * x_scale).round() as i32;
        if col >= 0 && (col as usize) < render_width {
            buffer[row][col as usize] = Cell {
                ch: PROJECTILE_CHAR,
                fg: pal.projectile,
                bg: pal.sky_bg,
            };
        }
    }

    // ── Player ────────────────────────────────────────────────────────
    let player_col = (PLAYER_X * x_scale).round() as i32;
    let player_w = ((PLAYER_SIZE * x_scale).ceil() as i32).max(2);
    let player_h = ((PLAYER_SIZE * y_scale).round() as i32).max(2);
    let foot_row = ((((game.player_y + PLAYER_SIZE) * y_scale).round() as i32) - 1)
        .min(ground_row as i32 - 1);

    for dy in 0..player_h {
        let row = foot_row - dy;
        if row < 0 || row as usize >= render_height {
            continue;
        }
        for dx in 0..player_w {
            let col = player_col + dx;
            if col < 0 || col as usize >= render_width {
                continue;
            }
            let ch = if dy == 0 && !game.airborne() {
                // Feet row: alternating stride.
                match (game.anim_phase, dx == 0) {
                    (0, true) => '/',
                    (0, false) => ' ',
                    (_, true) => ' ',
                    (_, false) => '\\',
                }
            } else {
                '█'
            };
            if ch != ' ' {
                buffer[row as usize][col as usize] = Cell {
                    ch,
                    fg: pal.player,
                    bg: pal.sky_bg,
                };
            }
        }
    }

    // ── Score readout (top-right) ─────────────────────────────────────
    stamp_right(&mut buffer, 0, &format!("Score: {}", game.score), pal);
    stamp_right(&mut buffer, 1, &format!("Best: {}", game.best), pal);

    // ── Emit buffer ───────────────────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let line = Paragraph::new(Line::from(spans));
        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        if row_area.y < area.y + area.height {
            frame.render_widget(line, row_area);
        }
    }
}

/// Stamp right-aligned text into a buffer row.
fn stamp_right(buffer: &mut [Vec<Cell>], row: usize, text: &str, pal: &Palette) {
    if row >= buffer.len() {
        return;
    }
    let width = buffer[row].len();
    let start = width.saturating_sub(text.len() + 1);
    for (i, ch) in text.chars().enumerate() {
        let col = start + i;
        if col < width {
            buffer[row][col] = Cell {
                ch,
                fg: Color::White,
                bg: pal.sky_bg,
            };
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &DinoGame) {
    match game.phase {
        GamePhase::Idle => render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightYellow,
            &[
                ("[Space/Up]", "Start"),
                ("[N]", "Night"),
                ("[T]", "Tier"),
                ("[R]", "Reset best"),
                ("[Q]", "Quit"),
            ],
        ),
        GamePhase::Running => render_status_bar(
            frame,
            area,
            "Run!",
            Color::LightGreen,
            &[
                ("[Space/Up]", "Jump"),
                ("[F]", "Fire"),
                ("[N]", "Night"),
                ("[Q]", "Quit"),
            ],
        ),
        GamePhase::GameOver => {}
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &DinoGame) {
    let inner = render_info_panel_frame(frame, area);

    let cannon = if game.fire_cooldown_elapsed() {
        Span::styled("Ready", Style::default().fg(Color::LightGreen))
    } else {
        Span::styled("Charging", Style::default().fg(Color::DarkGray))
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Tier: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.speed_tier.name(),
                Style::default().fg(Color::LightYellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Sky: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                if game.night_mode { "Night" } else { "Day" },
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.best.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Cannon: ", Style::default().fg(Color::DarkGray)),
            cannon,
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(Color::LightYellow)),
            Span::styled("Runner", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" | ", Style::default().fg(Color::Rgb(60, 140, 60))),
            Span::styled("Cactus", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" # ", Style::default().fg(Color::Rgb(140, 110, 80))),
            Span::styled("Rock", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" v ", Style::default().fg(Color::Rgb(160, 80, 160))),
            Span::styled("Bird", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" • ", Style::default().fg(Color::LightYellow)),
            Span::styled("Shot", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 5 || area.width < 20 {
        return;
    }

    let prompt = "[ Press Space to Start ]";
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let center_y = area.y + area.height / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let prompt_area = Rect::new(x, center_y, prompt.len() as u16, 1);
    if prompt_area.y < area.y + area.height {
        frame.render_widget(line, prompt_area);
    }
}

fn render_game_over(frame: &mut Frame, area: Rect, game: &DinoGame) {
    let best_line = if game.best_improved {
        format!("New best score: {}!", game.best)
    } else {
        format!("Best: {}", game.best)
    };

    render_game_over_overlay(
        frame,
        area,
        "GAME OVER",
        &[
            format!("Crashed after scoring {}.", game.score),
            best_line,
        ],
        "[Space] Restart   [R] Reset best   [Q] Quit",
    );
}
