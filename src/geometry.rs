/// Axis-aligned rectangle in playfield pixels (y grows downward).
///
/// Edges follow the usual sprite convention: `right = x + width`,
/// `bottom = y + height`.  Setters move the rectangle, never resize it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn set_centerx(&mut self, cx: i32) {
        self.x = cx - self.width / 2;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Edge-inclusive overlap test: rectangles that merely touch intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}
