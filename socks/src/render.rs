//! Text rendering of a [`GameSnapshot`].

use matching::{GameSnapshot, TileView, STATUS_COMPLETE};

const COLUMNS: usize = 3;
const CELL_WIDTH: usize = 26;
const BAR_WIDTH: usize = 20;

pub const TITLE: &str = "Able & Beyond - Life Skills Lab";
pub const SUBTITLE: &str = "Visual Matching: supports attention, visual scanning, and working memory.";

/// Full screen for the current game state.
pub fn render_snapshot(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", TITLE, SUBTITLE));
    if let Some(level) = &snapshot.difficulty {
        out.push_str(&format!("Level: {}\n", level));
    }
    out.push_str(&format!("> {}\n", snapshot.status));
    out.push_str(&format!("{}\n\n", progress_bar(snapshot.progress)));

    for row in snapshot.tiles.chunks(COLUMNS) {
        let line: Vec<String> = row.iter().map(tile_cell).collect();
        out.push_str(line.join("").trim_end());
        out.push('\n');
    }
    out.push('\n');

    if snapshot.complete {
        out.push_str(STATUS_COMPLETE);
        out.push_str("\nType 'new' for another round.\n");
    } else if snapshot.pick_pending() {
        out.push_str("Find the pair.\n");
    } else {
        out.push_str("Tap a number, or 'mix' to mix the socks.\n");
    }

    out
}

/// `[#######.............]  35%`
pub fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        (progress * 100.0).round() as u32
    )
}

fn tile_cell(tile: &TileView) -> String {
    let label = if tile.matched {
        format!("{} Paired ✓", tile.asset)
    } else if tile.selected {
        format!("{} <", tile.asset)
    } else {
        tile.asset.to_string()
    };
    let cell = format!("{:>2}. {}", tile.position + 1, label);
    format!("{:<width$}", cell, width = CELL_WIDTH)
}
