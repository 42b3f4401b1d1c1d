use ratatui::layout::Rect;

/// Rect centred in `area`, `width_percent` wide (at least `min_width`) and
/// `height` tall, both clamped to the area.
pub(super) fn centered_rect(area: Rect, width_percent: u16, min_width: u16, height: u16) -> Rect {
    let width = (area.width * width_percent / 100).max(min_width).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
