/// Scroll offset of a viewport over content, both measured in cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    /// Scrolls the least amount that brings content row `row` into view.
    pub fn ensure_visible(&mut self, row: u32) {
        if self.viewport_h == 0 {
            return;
        }
        let h = self.viewport_h as u32;
        if row < self.y {
            self.y = row;
        } else if row >= self.y + h {
            self.y = row + 1 - h;
        }
        self.clamp();
    }

    /// Content row shown at viewport row `dy`, if any.
    pub fn row_at(&self, dy: u16) -> Option<u32> {
        if dy >= self.viewport_h {
            return None;
        }
        let row = self.y + dy as u32;
        (row < self.content_h).then_some(row)
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}
