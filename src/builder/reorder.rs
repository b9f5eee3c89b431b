//! Block ordering and drag gestures.
//!
//! Both gesture sources (pointer and keyboard) implement [`DragSensor`] and
//! reduce a gesture to a single [`DragEnd`] move between array positions,
//! which [`move_item`] applies.

use crate::models::Block;

/// Items that carry their own position.
pub trait Ordered {
    fn set_order(&mut self, order: usize);
}

impl Ordered for Block {
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Assigns `order = index` to every item.
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// Moves the item at `from` to `to` (array positions) and renumbers.
///
/// Returns `false`, leaving `items` untouched, when the move is a drop on
/// itself or either index is out of range.
pub fn move_item<T: Ordered>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }

    let item = items.remove(from);
    items.insert(to, item);
    renumber(items);
    true
}

/// Translates a drop of block `active_id` over block `over_id` into array
/// positions. `None` when dropped outside a block or onto itself.
pub fn resolve_drop(blocks: &[Block], active_id: &str, over_id: Option<&str>) -> Option<DragEnd> {
    let over_id = over_id?;
    if active_id == over_id {
        return None;
    }

    let from = blocks.iter().position(|b| b.id == active_id)?;
    let to = blocks.iter().position(|b| b.id == over_id)?;
    Some(DragEnd { from, to })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Index of the sibling whose center is nearest to `point`.
///
/// `None` when there are no siblings or `point` lies outside the area the
/// siblings cover together.
pub fn closest_center(layout: &[Rect], point: Point) -> Option<usize> {
    let bounds = layout.iter().copied().reduce(|acc, r| acc.union(&r))?;
    if !bounds.contains(point) {
        return None;
    }

    layout
        .iter()
        .enumerate()
        .map(|(index, rect)| (index, rect.center().distance_squared(&point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// A completed drag, in array positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub from: usize,
    pub to: usize,
}

/// A source of drag gestures over an ordered list.
///
/// `on_drag_end` yields a move only for a valid drop on a different slot.
pub trait DragSensor {
    type Input;

    fn on_drag_start(&mut self, source: usize, input: Self::Input, layout: &[Rect]);

    fn on_drag_move(&mut self, input: Self::Input);

    fn on_drag_end(&mut self, input: Self::Input) -> Option<DragEnd>;

    fn is_dragging(&self) -> bool;
}

/// Pointer movement must exceed this many pixels before a drag activates,
/// so plain clicks on the handle do not reorder.
pub const POINTER_ACTIVATION_DISTANCE: f64 = 10.0;

#[derive(Debug, Default)]
pub struct PointerSensor {
    drag: Option<PointerDrag>,
}

#[derive(Debug)]
struct PointerDrag {
    source: usize,
    origin: Point,
    current: Point,
    activated: bool,
    layout: Vec<Rect>,
}

impl PointerSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sibling the pointer is currently over, once the drag is active.
    pub fn hovered(&self) -> Option<usize> {
        let drag = self.drag.as_ref().filter(|d| d.activated)?;
        closest_center(&drag.layout, drag.current)
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

impl DragSensor for PointerSensor {
    type Input = Point;

    fn on_drag_start(&mut self, source: usize, input: Point, layout: &[Rect]) {
        self.drag = Some(PointerDrag {
            source,
            origin: input,
            current: input,
            activated: false,
            layout: layout.to_vec(),
        });
    }

    fn on_drag_move(&mut self, input: Point) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = input;
            if !drag.activated {
                drag.activated = drag.origin.distance_squared(&input)
                    >= POINTER_ACTIVATION_DISTANCE * POINTER_ACTIVATION_DISTANCE;
            }
        }
    }

    fn on_drag_end(&mut self, input: Point) -> Option<DragEnd> {
        self.on_drag_move(input);
        let drag = self.drag.take()?;
        if !drag.activated {
            return None;
        }

        let to = closest_center(&drag.layout, drag.current)?;
        (to != drag.source).then_some(DragEnd {
            from: drag.source,
            to,
        })
    }

    fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.activated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    ArrowUp,
    ArrowDown,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    fn is_pick_or_drop(&self) -> bool {
        matches!(self, Self::Space | Self::Enter)
    }
}

/// Space/Enter picks up, arrows move one slot, Space/Enter drops, Escape
/// cancels.
#[derive(Debug, Default)]
pub struct KeyboardSensor {
    drag: Option<KeyboardDrag>,
}

#[derive(Debug)]
struct KeyboardDrag {
    source: usize,
    target: usize,
    len: usize,
}

impl KeyboardSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot the picked-up item would land in.
    pub fn target(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.target)
    }

    /// Routes a key press to start, move or end depending on state.
    pub fn handle_key(&mut self, focused: usize, key: Key, layout: &[Rect]) -> Option<DragEnd> {
        if !self.is_dragging() {
            self.on_drag_start(focused, key, layout);
            None
        } else if key.is_pick_or_drop() {
            self.on_drag_end(key)
        } else {
            self.on_drag_move(key);
            None
        }
    }
}

impl DragSensor for KeyboardSensor {
    type Input = Key;

    fn on_drag_start(&mut self, source: usize, input: Key, layout: &[Rect]) {
        if input.is_pick_or_drop() && source < layout.len() {
            self.drag = Some(KeyboardDrag {
                source,
                target: source,
                len: layout.len(),
            });
        }
    }

    fn on_drag_move(&mut self, input: Key) {
        match input {
            Key::Escape => self.drag = None,
            Key::ArrowUp => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.target = drag.target.saturating_sub(1);
                }
            }
            Key::ArrowDown => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.target = (drag.target + 1).min(drag.len - 1);
                }
            }
            _ => {}
        }
    }

    fn on_drag_end(&mut self, input: Key) -> Option<DragEnd> {
        if !input.is_pick_or_drop() {
            self.drag = None;
            return None;
        }

        let drag = self.drag.take()?;
        (drag.target != drag.source).then_some(DragEnd {
            from: drag.source,
            to: drag.target,
        })
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
