//! GameView: maps a session snapshot plus host state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::leaderboard::LeaderboardEntry;
use crate::core::timer::format_elapsed;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, MAX_SHAPE_SIZE, PALETTE};

const BOARD_BG: Rgb = Rgb::new(30, 28, 26);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Modal text drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay<'a> {
    #[default]
    None,
    /// Controls help, shown before the first game
    Instructions,
    Paused,
    GameOver { score: u32 },
    NameEntry { score: u32, name: &'a str },
}

/// Host-owned state shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudView<'a> {
    pub top_entries: &'a [LeaderboardEntry],
    pub high_score: Option<u32>,
    pub volume: f32,
    pub muted: bool,
    /// `false` when no music output is available
    pub audio_enabled: bool,
    pub overlay: Overlay<'a>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    /// Cells narrower than 1 column or shorter than 1 row are raised to 1.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board frame for a `cols x rows` board
    pub fn frame_size(&self, cols: u8, rows: u8) -> (u16, u16) {
        (
            cols as u16 * self.cell_w + 2,
            rows as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let (frame_w, frame_h) = self.frame_size(snap.cols, snap.rows);
        let panel_w = if viewport.width >= frame_w + 2 + PANEL_MIN_W {
            PANEL_MIN_W + 2
        } else {
            0
        };
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + panel_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(70, 66, 60), BOARD_BG).dim();
        fb.fill_rect(frame.x + 1, frame.y + 1, frame_w - 2, frame_h - 2, ' ', bg);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 190, 175), PANEL_BG));

        for y in 0..snap.rows {
            for x in 0..snap.cols {
                match ColorId::new(snap.cell(x as usize, y as usize)) {
                    Some(color) => {
                        self.draw_block(fb, frame.x + 1, frame.y + 1, x as u16, y as u16, color)
                    }
                    None => self.fill_cell(fb, frame, x as u16, y as u16, '·', bg),
                }
            }
        }

        if let Some(active) = snap.active {
            for (cx, cy) in active.shape.cells() {
                let x = active.x + cx;
                let y = active.y + cy;
                if x >= 0 && y >= 0 && x < snap.cols as i8 && y < snap.rows as i8 {
                    let (x, y) = (x as u16, y as u16);
                    self.draw_block(fb, frame.x + 1, frame.y + 1, x, y, active.color);
                }
            }
        }

        if panel_w > 0 {
            self.draw_side_panel(fb, snap, hud, viewport, frame);
        }

        self.draw_overlay(fb, frame, &hud.overlay);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// One block: solid fill with a darker trailing column as its border.
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        x: u16,
        y: u16,
        color: ColorId,
    ) {
        let fg = Rgb::from(color.rgb());
        let body = CellStyle::new(fg, BOARD_BG).bold();
        let edge = CellStyle::new(fg.shade(3, 5), BOARD_BG);

        let px = origin_x + x * self.cell_w;
        let py = origin_y + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', body);
        if self.cell_w > 1 {
            fb.fill_rect(px + self.cell_w - 1, py, 1, self.cell_h, '▊', edge);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        let label = CellStyle::new(Rgb::new(230, 220, 205), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 190, 175), PANEL_BG);
        let dim = value.dim();
        let podium = CellStyle::new(Rgb::from(PALETTE[2]), PANEL_BG).bold();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "HIGH", label);
        match hud.high_score {
            Some(score) => fb.put_u32(panel_x, y + 1, score, value),
            None => fb.put_str(panel_x, y + 1, "-", value),
        };
        y += 3;

        fb.put_str(panel_x, y, "TIME", label);
        fb.put_str(panel_x, y + 1, &format_elapsed(snap.elapsed_secs), value);
        y += 3;

        // The preview sits half a block right of the label column.
        fb.put_str(panel_x, y, "NEXT", label);
        let preview_x = panel_x + self.cell_w / 2;
        let preview_y = y + 1;
        let color = snap.next.color_id();
        for (cx, cy) in snap.next_shape.cells() {
            self.draw_block(fb, preview_x, preview_y, cx as u16, cy as u16, color);
        }
        y += 2 + MAX_SHAPE_SIZE as u16 * self.cell_h;

        fb.put_str(panel_x, y, "MUSIC", label);
        if !hud.audio_enabled {
            fb.put_str(panel_x, y + 1, "off", dim);
        } else if hud.muted {
            fb.put_str(panel_x, y + 1, "muted", value);
        } else {
            let pct = (hud.volume.clamp(0.0, 1.0) * 100.0).round() as u32;
            let end = fb.put_u32(panel_x, y + 1, pct, value);
            fb.put_char(end, y + 1, '%', value);
        }
        y += 3;

        if y >= viewport.height {
            return;
        }
        fb.put_str(panel_x, y, "TOP 10", label);
        y += 1;
        for (rank, entry) in hud.top_entries.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let end = fb.put_u32(panel_x, y, rank as u32 + 1, dim);
            let name_x = fb.put_str(end, y, ".", dim) + 1;
            let score_x = name_x + 16;
            let style = if rank < PODIUM_RANKS { podium } else { value };
            fb.put_str(name_x, y, &entry.name, style);
            fb.put_u32(score_x, y, entry.score, style);
            y += 1;
        }
        if hud.top_entries.is_empty() && y < viewport.height {
            fb.put_str(panel_x, y, "no scores yet", dim);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, overlay: &Overlay<'_>) {
        let score_text;
        let lines: Vec<&str> = match *overlay {
            Overlay::None => return,
            Overlay::Instructions => INSTRUCTIONS.to_vec(),
            Overlay::Paused => vec!["PAUSED", "", "P to resume"],
            Overlay::GameOver { score } => {
                score_text = format!("score {}", score);
                vec!["GAME OVER", score_text.as_str(), "", "ENTER restart"]
            }
            Overlay::NameEntry { score, name } => {
                score_text = format!("score {}", score);
                vec![
                    "NEW HIGH SCORE",
                    score_text.as_str(),
                    "",
                    "name:",
                    name,
                    "",
                    "ENTER save",
                    "ESC   skip",
                ]
            }
        };

        let text_w = lines.iter().map(|l| l.chars().count() as u16).max().unwrap_or(0) + 2;
        let box_w = text_w.min(frame.w.saturating_sub(2));
        let box_h = (lines.len() as u16 + 2).min(frame.h.saturating_sub(2));
        let box_x = frame.x + (frame.w - box_w) / 2;
        let box_y = frame.y + (frame.h - box_h) / 2;

        let style = CellStyle::new(Rgb::new(248, 231, 213), PANEL_BG).bold();
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', style);
        for (i, line) in lines.iter().enumerate() {
            let row = box_y + 1 + i as u16;
            if row >= box_y + box_h {
                break;
            }
            let w = line.chars().count() as u16;
            let x = box_x + box_w.saturating_sub(w) / 2;
            let clip = (box_x + box_w).saturating_sub(x) as usize;
            let visible: String = line.chars().take(clip).collect();
            fb.put_str(x, row, &visible, style);
        }
        if let Overlay::NameEntry { name, .. } = *overlay {
            // Caret after the typed name.
            let name_row = box_y + 1 + 4;
            let w = name.chars().count() as u16;
            let caret_x = box_x + box_w.saturating_sub(w) / 2 + w;
            if caret_x < box_x + box_w && name_row < box_y + box_h {
                fb.put_char(caret_x, name_row, '_', style);
            }
        }
    }
}

/// Narrowest side panel worth drawing
const PANEL_MIN_W: u16 = 24;
/// Leaderboard rows drawn in the accent style
const PODIUM_RANKS: usize = 3;

const INSTRUCTIONS: [&str; 9] = [
    "BLOCKFALL",
    "",
    "ENTER  start",
    "←/→    move",
    "↓      drop",
    "↑ SPC  rotate",
    "P      pause",
    "+/- M  volume",
    "Q      quit",
];

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
