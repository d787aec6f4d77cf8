//! Canvas/screen coordinate conversions for the editor viewport.

use egui::{Pos2, Vec2};

/// Convert canvas coordinates to screen coordinates.
pub fn to_screen(pos: Pos2, pan: Vec2, canvas_offset: Pos2) -> Pos2 {
    canvas_offset + pan + pos.to_vec2()
}

/// Convert screen coordinates back to canvas coordinates.
pub fn from_screen(screen_pos: Pos2, pan: Vec2, canvas_offset: Pos2) -> Pos2 {
    (screen_pos - canvas_offset - pan).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_roundtrip_under_pan() {
        let pan = vec2(-120.0, 45.0);
        let offset = pos2(8.0, 32.0);
        let pos = pos2(300.0, 150.0);

        let screen = to_screen(pos, pan, offset);
        assert_eq!(from_screen(screen, pan, offset), pos);
    }

    #[test]
    fn test_zero_pan_is_offset_only() {
        let screen = to_screen(pos2(10.0, 20.0), Vec2::ZERO, pos2(5.0, 5.0));
        assert_eq!(screen, pos2(15.0, 25.0));
    }
}
