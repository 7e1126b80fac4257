//! Plain-text board rendering

use hexversi_core::{Coord, HexBoard, Result};

/// Draw the board one row per `y`, indented so the rows form a hexagon
pub fn render_board(board: &HexBoard) -> Result<String> {
    let radius = board.radius()?;
    let mut out = String::new();

    for y in -radius..=radius {
        out.push_str(&" ".repeat(y.unsigned_abs() as usize * 2));
        for p in -radius..=radius {
            let coord = Coord::new(y, p, -y - p);
            if let Some(cell) = board.get_cell_at(coord)? {
                out.push_str(&format!("{}   ", cell));
            }
        }
        out.push('\n');
    }

    Ok(out)
}

/// Board plus whose turn it is and both scores
pub fn render_status(board: &HexBoard) -> Result<String> {
    let mut out = render_board(board)?;
    out.push_str(&format!(
        "Current Player: {}\nCurrent Player Score: {}\nOpponent Player Score: {}",
        board.current_player()?,
        board.current_player_score()?,
        board.opponent_player_score()?,
    ));
    Ok(out)
}
