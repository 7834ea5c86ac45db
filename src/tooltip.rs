use crate::bin_stats::BinStats;
use crate::shot::NormalizedShot;

const EDGE_MARGIN: f64 = 10.0;
const TOOLTIP_WIDTH: f64 = 220.0;
const TOOLTIP_HEIGHT: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Hexagon(usize),
    Shot(usize),
}

impl ElementId {
    pub fn label(self) -> String {
        match self {
            ElementId::Hexagon(i) => format!("hexagon-{i}"),
            ElementId::Shot(i) => format!("shot-{i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipPayload {
    Hexagon(BinStats),
    Shot(NormalizedShot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub element: ElementId,
    pub payload: TooltipPayload,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Transient(Tooltip),
    Pinned(Tooltip),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipEvent {
    PointerEnter(Tooltip),
    PointerLeave(ElementId),
    Click(Tooltip),
    Tap(Tooltip),
    Close,
    ClickOutside,
}

impl TooltipState {
    pub fn visible(&self) -> Option<&Tooltip> {
        match self {
            TooltipState::Hidden => None,
            TooltipState::Transient(t) | TooltipState::Pinned(t) => Some(t),
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, TooltipState::Pinned(_))
    }

    pub fn element(&self) -> Option<ElementId> {
        self.visible().map(|t| t.element)
    }

    // A pinned tooltip ignores hover traffic.
    pub fn apply(self, event: TooltipEvent) -> TooltipState {
        match (self, event) {
            (TooltipState::Pinned(p), TooltipEvent::PointerEnter(_)) => TooltipState::Pinned(p),
            (_, TooltipEvent::PointerEnter(t)) => TooltipState::Transient(t),

            (TooltipState::Transient(t), TooltipEvent::PointerLeave(element))
                if t.element == element =>
            {
                TooltipState::Hidden
            }
            (state, TooltipEvent::PointerLeave(_)) => state,

            (TooltipState::Pinned(p), TooltipEvent::Click(t) | TooltipEvent::Tap(t))
                if p.element == t.element =>
            {
                TooltipState::Hidden
            }
            (_, TooltipEvent::Click(t) | TooltipEvent::Tap(t)) => TooltipState::Pinned(t),

            (_, TooltipEvent::Close | TooltipEvent::ClickOutside) => TooltipState::Hidden,
        }
    }

    pub fn retain_if(self, exists: impl Fn(ElementId) -> bool) -> TooltipState {
        match self.element() {
            Some(element) if !exists(element) => TooltipState::Hidden,
            _ => self,
        }
    }
}

pub fn place(pointer_x: f64, pointer_y: f64, canvas_width: f64, canvas_height: f64) -> (f64, f64) {
    let x = (pointer_x + EDGE_MARGIN)
        .min(canvas_width - TOOLTIP_WIDTH)
        .max(EDGE_MARGIN);
    let y = (pointer_y - EDGE_MARGIN)
        .min(canvas_height - TOOLTIP_HEIGHT)
        .max(EDGE_MARGIN);
    (x, y)
}
