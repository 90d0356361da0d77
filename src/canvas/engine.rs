use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_4;
use std::time::Duration;

use crate::canvas::element::{ElementId, ElementSpec, MovableElement};
use crate::canvas::gesture::{GestureEvent, GesturePhase, RecognizerKind, RecognizerState};
use crate::canvas::snap::{is_axis_aligned, snap_position, snap_rotation, snap_scale};
use crate::foundation::core::{Point, Rect};

/// Tuning for snapping and add animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOpts {
    /// Radians from the nearest interval multiple within which rotation snaps.
    pub rotation_snap_threshold: f64,
    pub rotation_snap_interval: f64,
    /// Distance from 1.0 within which scale snaps.
    pub scale_snap_threshold: f64,
    /// Canvas units within which a pan snaps to center or edges.
    pub pan_snap_threshold: f64,
    /// Suggested duration for hosts animating an added element into place.
    pub animation_duration: Duration,
}

impl Default for CanvasOpts {
    fn default() -> Self {
        Self {
            rotation_snap_threshold: 0.1,
            rotation_snap_interval: FRAC_PI_4,
            scale_snap_threshold: 0.05,
            pan_snap_threshold: 6.0,
            animation_duration: Duration::from_millis(250),
        }
    }
}

impl CanvasOpts {
    pub fn with_rotation_snap(mut self, threshold: f64, interval: f64) -> Self {
        self.rotation_snap_threshold = threshold;
        self.rotation_snap_interval = interval;
        self
    }

    pub fn with_scale_snap_threshold(mut self, threshold: f64) -> Self {
        self.scale_snap_threshold = threshold;
        self
    }

    pub fn with_pan_snap_threshold(mut self, threshold: f64) -> Self {
        self.pan_snap_threshold = threshold;
        self
    }

    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }
}

/// Notifications for the canvas owner, collected with [`Canvas::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// Some element became the target of continuous gestures.
    TouchesBegan,
    /// Every recognizer of the engaged element went inactive.
    TouchesEnded,
    ElementTapped { id: ElementId, selected: bool },
    ElementMoved(ElementId),
    ElementAdded { id: ElementId, animated: bool },
    ElementRemoved(ElementId),
    Cleared,
}

/// Owns the element stack and turns gesture transitions into transform updates.
///
/// Element coordinates share the coordinate space of `bounds`. Index 0 is the bottom of the
/// stack.
#[derive(Debug)]
pub struct Canvas {
    bounds: Rect,
    opts: CanvasOpts,
    elements: Vec<MovableElement>,
    next_id: u64,
    selected: Option<ElementId>,
    current: Option<ElementId>,
    events: VecDeque<CanvasEvent>,
}

impl Canvas {
    pub fn new(bounds: Rect) -> Self {
        Self::with_opts(bounds, CanvasOpts::default())
    }

    pub fn with_opts(bounds: Rect, opts: CanvasOpts) -> Self {
        Self {
            bounds,
            opts,
            elements: Vec::new(),
            next_id: 1,
            selected: None,
            current: None,
            events: VecDeque::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn opts(&self) -> &CanvasOpts {
        &self.opts
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.layout();
    }

    pub fn elements(&self) -> &[MovableElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&MovableElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut MovableElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Last tapped element.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Element currently engaged by a continuous gesture.
    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Places a new element on top of the stack with fresh recognizers.
    pub fn add_element(&mut self, spec: ElementSpec, animated: bool) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(MovableElement::new(id, spec));
        self.events
            .push_back(CanvasEvent::ElementAdded { id, animated });
        tracing::debug!(%id, animated, "element added");
        id
    }

    /// Removes the tapped element, if any.
    ///
    /// Removing the element engaged by a gesture closes its bracket with `TouchesEnded` first.
    pub fn remove_selected(&mut self) -> Option<ElementId> {
        let id = self.selected.take()?;
        self.elements.retain(|e| e.id != id);
        if self.current == Some(id) {
            self.end_touches();
        }
        self.events.push_back(CanvasEvent::ElementRemoved(id));
        Some(id)
    }

    pub fn remove_all(&mut self) {
        self.elements.clear();
        self.selected = None;
        self.end_touches();
        self.events.push_back(CanvasEvent::Cleared);
    }

    /// Re-applies every element's defined position.
    pub fn layout(&mut self) {
        for el in &mut self.elements {
            el.move_to_defined_position();
        }
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.events.drain(..).collect()
    }

    /// Element that receives a touch at `p`.
    ///
    /// While an element is engaged every touch goes to it; otherwise the top-most element whose
    /// transformed shape contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<ElementId> {
        if let Some(current) = self.current {
            return Some(current);
        }
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains(p))
            .map(|e| e.id)
    }

    pub fn recognizer_state(&self, id: ElementId, kind: RecognizerKind) -> Option<RecognizerState> {
        self.element(id).map(|e| e.recognizers.state(kind))
    }

    /// Feeds one recognizer transition for element `id`.
    ///
    /// Returns `false` when the transition is rejected: unknown element, a tap while a continuous
    /// gesture runs on the element, a gesture beginning on an element other than the engaged
    /// one, or an update for a recognizer that never began.
    pub fn handle_gesture(&mut self, id: ElementId, event: GestureEvent) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        let kind = event.kind();
        if el.recognizers.blocks(kind) {
            return false;
        }

        let Some(phase) = event.phase() else {
            self.on_tap(id);
            return true;
        };

        let state = el.recognizers.state(kind);
        match phase {
            GesturePhase::Began => {
                if state.is_active() || self.current.is_some_and(|c| c != id) {
                    return false;
                }
            }
            GesturePhase::Changed
            | GesturePhase::Ended
            | GesturePhase::Cancelled
            | GesturePhase::Failed => {
                if !state.is_active() {
                    return false;
                }
            }
        }

        let opts = self.opts;
        let bounds = self.bounds;
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        el.recognizers.set(kind, phase.to_state());

        match phase {
            GesturePhase::Began => {
                match kind {
                    RecognizerKind::Rotation => el.baseline.rotation = el.transform.rotation,
                    RecognizerKind::Pinch => el.baseline.scale = el.transform.scale,
                    RecognizerKind::Pan => el.baseline.position = el.transform.position,
                    RecognizerKind::Tap => {}
                }
                self.on_recognizer_began(id);
            }
            GesturePhase::Changed => apply_change(el, event, &opts, bounds),
            GesturePhase::Ended => {
                self.on_recognizer_ended();
                self.events.push_back(CanvasEvent::ElementMoved(id));
            }
            GesturePhase::Cancelled | GesturePhase::Failed => self.on_recognizer_ended(),
        }
        true
    }

    fn on_tap(&mut self, id: ElementId) {
        if let Some(el) = self.element_mut(id) {
            el.recognizers.set(RecognizerKind::Tap, RecognizerState::Ended);
        }
        let selected = if self.selected == Some(id) {
            self.selected = None;
            false
        } else {
            self.selected = Some(id);
            true
        };
        self.events
            .push_back(CanvasEvent::ElementTapped { id, selected });
    }

    fn on_recognizer_began(&mut self, id: ElementId) {
        if self.current.is_none() {
            self.current = Some(id);
            self.events.push_back(CanvasEvent::TouchesBegan);
        }
    }

    fn on_recognizer_ended(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let all_inactive = self
            .element(current)
            .is_none_or(|e| e.recognizers.all_inactive());
        if all_inactive {
            self.end_touches();
        }
    }

    /// Clears the engaged element and emits `TouchesEnded` if one was engaged.
    fn end_touches(&mut self) {
        if self.current.take().is_some() {
            self.events.push_back(CanvasEvent::TouchesEnded);
        }
    }
}

fn apply_change(el: &mut MovableElement, event: GestureEvent, opts: &CanvasOpts, bounds: Rect) {
    let mut t = el.transform;
    match event {
        GestureEvent::Rotation { rotation, .. } => {
            t.rotation = el.baseline.rotation + rotation;
            if let Some(snapped) = snap_rotation(
                t.rotation,
                opts.rotation_snap_threshold,
                opts.rotation_snap_interval,
            ) {
                t.rotation = snapped;
            }
            el.set_transform(t);
        }
        GestureEvent::Pinch { scale, .. } => {
            t.scale = el.baseline.scale * scale;
            if let Some(snapped) = snap_scale(t.scale, opts.scale_snap_threshold) {
                t.scale = snapped;
            }
            el.set_transform(t);
        }
        GestureEvent::Pan { translation, .. } => {
            t.position = el.baseline.position + translation;
            el.set_transform(t);
            let aligned = is_axis_aligned(t.rotation);
            if let Some(offset) = snap_position(bounds, el.frame(), aligned, opts.pan_snap_threshold)
            {
                t.position += offset;
                el.set_transform(t);
            }
        }
        GestureEvent::Tap => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/engine.rs"]
mod tests;
