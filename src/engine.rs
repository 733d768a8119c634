use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::{debug, trace};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Element};

use crate::config::{AnnotateConfig, ToolSettings, positive};
use crate::constrain;
use crate::coords::{CoordinateTracker, Point, PointerPos, SurfaceRect};
use crate::error::AnnotateError;
use crate::hit;
use crate::history;
use crate::input::{Button, Gesture, Key, Mode, Modifiers, PointerTarget, UiState};
use crate::overlay::{self, SelectionOverlay};
use crate::paint::{self, Rasterizer};
use crate::pointer::{PointerFeed, Subscription};
use crate::resize::{self, DragOffset};
use crate::scene::{self, SceneItem};
use crate::shape::{AnchorSlot, PartialShape, Shape, ShapeId, ShapeKind, ShapeStore};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(ShapeId),
    ShapeUpdated(ShapeId),
    ShapeDeleted(ShapeId),
    ModeChanged(Mode),
    /// Suppress the browser's default handling of the triggering event.
    PreventDefault,
    RenderNeeded,
}

/// What the host's controls render from: tool settings plus selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HostView {
    pub tool: ToolSettings,
    pub mode: Mode,
    pub active_id: Option<ShapeId>,
    /// A delete control applies to the active shape.
    pub can_delete: bool,
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from `Engine` so it can be tested without a browser.
pub struct EngineCore {
    pub store: ShapeStore,
    pub ui: UiState,
    pub gesture: Gesture,
    pub tool: ToolSettings,
    pub tracker: CoordinateTracker,
    pub config: AnnotateConfig,
    /// Position and constraint of the last applied gesture step.
    last_step: Option<(PointerPos, bool)>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(AnnotateConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: AnnotateConfig) -> Self {
        Self {
            store: ShapeStore::new(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            tool: config.tool.clone(),
            tracker: CoordinateTracker::new(),
            config,
            last_step: None,
        }
    }

    /// Update the surface rectangle used to derive local coordinates.
    pub fn set_surface(&mut self, surface: Option<SurfaceRect>) {
        self.tracker.set_surface(surface);
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        page: Point,
        target: PointerTarget,
        button: Button,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        self.tracker.track(page);
        if button != Button::Primary {
            return Vec::new();
        }
        self.last_step = None;
        let pos = self.tracker.position();
        let mut actions = Vec::new();

        match (self.ui.mode, target) {
            (Mode::Create, PointerTarget::Surface(attr)) => {
                if let Some(id) = hit::shape_at(attr.as_deref(), &self.store) {
                    actions.push(Action::PreventDefault);
                    self.ui.active_id = Some(id);
                    self.set_mode(Mode::Selected, &mut actions);
                    if self.store.get(&id).is_some_and(|s| s.kind == ShapeKind::Text) {
                        self.begin_move(id, pos);
                    }
                } else {
                    self.create_shape(pos, &mut actions);
                }
            }
            (Mode::Selected, PointerTarget::SelectionBox) => {
                if let Some(id) = self.ui.active_id {
                    self.begin_move(id, pos);
                }
            }
            (Mode::Selected, PointerTarget::Handle(handle)) => {
                let applies = |s: &Shape| resize::handle_applies(s, handle);
                if let Some(id) = self.ui.active_id.filter(|id| self.store.get(id).is_some_and(applies)) {
                    self.gesture = Gesture::Resizing { id, handle };
                    debug!(%id, ?handle, "resize started");
                }
            }
            (Mode::Selected, PointerTarget::Surface(attr)) => {
                let on_active = hit::shape_at(attr.as_deref(), &self.store)
                    .is_some_and(|id| Some(id) == self.ui.active_id);
                match self.ui.active_id {
                    Some(id) if on_active => self.begin_move(id, pos),
                    _ => self.deselect(&mut actions),
                }
            }
            (Mode::Selected, PointerTarget::Outside) => self.deselect(&mut actions),
            _ => {}
        }

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, page: Point, modifiers: Modifiers) -> Vec<Action> {
        self.tracker.track(page);
        let pos = self.tracker.position();
        let Some(id) = self.advance_gesture(pos, modifiers.constrain()) else {
            return Vec::new();
        };
        vec![Action::ShapeUpdated(id), Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, page: Point, modifiers: Modifiers) -> Vec<Action> {
        self.tracker.track(page);
        let pos = self.tracker.position();
        let mut actions = Vec::new();

        // Release ends a resize at its last applied step.
        let finalize = !matches!(self.gesture, Gesture::Resizing { .. });
        if finalize {
            if let Some(id) = self.advance_gesture(pos, modifiers.constrain()) {
                actions.push(Action::ShapeUpdated(id));
            }
        }
        if matches!(self.gesture, Gesture::Creating { .. }) {
            self.set_mode(Mode::Selected, &mut actions);
        }
        if self.gesture != Gesture::Idle {
            debug!(gesture = ?self.gesture, "gesture ended");
            self.gesture = Gesture::Idle;
        }
        self.last_step = None;

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Keyboard shortcuts; ignored unless a shape is selected and no text
    /// field has focus.
    pub fn on_key_down(&mut self, key: &Key, editing_text: bool) -> Vec<Action> {
        if self.ui.mode != Mode::Selected || editing_text {
            return Vec::new();
        }
        if key.is_confirm() {
            let mut actions = Vec::new();
            self.deselect(&mut actions);
            actions.push(Action::RenderNeeded);
            return actions;
        }
        if key.is_delete() {
            if let Some(id) = self.ui.active_id {
                return self.delete_shape(&id);
            }
            let mut actions = Vec::new();
            self.deselect(&mut actions);
            actions.push(Action::RenderNeeded);
            return actions;
        }
        Vec::new()
    }

    // --- Tool settings ---

    /// Set the kind of the next created shape. Existing shapes keep theirs.
    pub fn set_kind(&mut self, kind: ShapeKind) -> Vec<Action> {
        self.tool.kind = kind;
        vec![Action::RenderNeeded]
    }

    pub fn set_color(&mut self, color: String) -> Vec<Action> {
        self.tool.color.clone_from(&color);
        self.restyle_active(PartialShape { color: Some(color), ..Default::default() })
    }

    /// # Errors
    ///
    /// Returns [`AnnotateError::InvalidStyle`] for non-finite or non-positive widths.
    pub fn set_stroke_width(&mut self, width: f64) -> Result<Vec<Action>, AnnotateError> {
        self.tool.stroke_width = positive("stroke width", width)?;
        Ok(self.restyle_active(PartialShape { stroke_width: Some(width), ..Default::default() }))
    }

    /// # Errors
    ///
    /// Returns [`AnnotateError::InvalidStyle`] for non-finite or non-positive sizes.
    pub fn set_font_size(&mut self, size: f64) -> Result<Vec<Action>, AnnotateError> {
        self.tool.font_size = positive("font size", size)?;
        Ok(self.restyle_active(PartialShape { font_size: Some(size), ..Default::default() }))
    }

    /// Replace the active text shape's content. Any string is accepted.
    pub fn edit_text(&mut self, content: String) -> Vec<Action> {
        let Some(id) = self.selected_text_id() else {
            return Vec::new();
        };
        let partial = PartialShape { text_content: Some(content), ..Default::default() };
        if self.store.apply_partial(&id, &partial) {
            vec![Action::ShapeUpdated(id), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- History ---

    /// Remove the most recently created shape.
    pub fn undo(&mut self) -> Vec<Action> {
        let before = self.ui;
        let Some(removed) = history::undo(&mut self.store, &mut self.ui) else {
            return Vec::new();
        };
        if self.gesture_target() == Some(removed.id) {
            self.gesture = Gesture::Idle;
        }
        let mut actions = vec![Action::ShapeDeleted(removed.id)];
        if self.ui.mode != before.mode {
            actions.push(Action::ModeChanged(self.ui.mode));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove `id` and return to create mode, whether or not it existed.
    pub fn delete_shape(&mut self, id: &ShapeId) -> Vec<Action> {
        let before = self.ui.mode;
        let mut actions = Vec::new();
        if history::delete_shape(&mut self.store, &mut self.ui, id).is_some() {
            actions.push(Action::ShapeDeleted(*id));
        }
        if self.gesture_target() == Some(*id) {
            self.gesture = Gesture::Idle;
        }
        if before != Mode::Create {
            debug!(from = ?before, to = ?Mode::Create, "mode");
            actions.push(Action::ModeChanged(Mode::Create));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Export ---

    /// Hand the current render list to `rasterizer` under a fresh file name.
    ///
    /// # Errors
    ///
    /// Propagates the rasterizer's failure.
    pub fn save<R: Rasterizer>(&self, rasterizer: &R) -> Result<R::Image, AnnotateError> {
        let file_name = format!("{}.png", Uuid::new_v4());
        let items = self.scene();
        debug!(%file_name, shapes = items.len(), "save");
        rasterizer.rasterize(&items, &file_name)
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    #[must_use]
    pub fn active_id(&self) -> Option<ShapeId> {
        self.ui.active_id
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    /// The latest pointer position in both frames.
    #[must_use]
    pub fn pointer(&self) -> PointerPos {
        self.tracker.position()
    }

    #[must_use]
    pub fn view(&self) -> HostView {
        HostView {
            tool: self.tool.clone(),
            mode: self.ui.mode,
            active_id: self.ui.active_id,
            can_delete: self.ui.active_id.is_some_and(|id| self.store.contains(&id)),
        }
    }

    #[must_use]
    pub fn scene(&self) -> Vec<SceneItem> {
        scene::scene(&self.store, &self.ui)
    }

    #[must_use]
    pub fn overlay(&self) -> Option<SelectionOverlay> {
        overlay::selection_overlay(&self.ui, &self.store, &self.config)
    }

    #[must_use]
    pub fn surface_cursor(&self) -> &'static str {
        scene::surface_cursor(self.ui.mode)
    }

    // --- Internals ---

    fn set_mode(&mut self, mode: Mode, actions: &mut Vec<Action>) {
        if self.ui.mode == mode {
            return;
        }
        debug!(from = ?self.ui.mode, to = ?mode, active = ?self.ui.active_id, "mode");
        self.ui.mode = mode;
        actions.push(Action::ModeChanged(mode));
    }

    fn deselect(&mut self, actions: &mut Vec<Action>) {
        self.ui.active_id = None;
        self.gesture = Gesture::Idle;
        self.set_mode(Mode::Create, actions);
    }

    fn create_shape(&mut self, pos: PointerPos, actions: &mut Vec<Action>) {
        let id = Uuid::new_v4();
        let shape = Shape {
            color: self.tool.color.clone(),
            stroke_width: self.tool.stroke_width,
            font_size: self.tool.font_size,
            text_content: self.config.default_text.clone(),
            ..Shape::new(id, self.tool.kind, pos)
        };
        debug!(%id, kind = ?shape.kind, x = pos.x, y = pos.y, "shape created");
        self.store.insert(shape);
        self.ui.active_id = Some(id);
        self.gesture = Gesture::Creating { id };
        actions.push(Action::ShapeCreated(id));
        self.set_mode(Mode::Drag, actions);
    }

    fn begin_move(&mut self, id: ShapeId, grab: PointerPos) {
        let Some(shape) = self.store.get(&id) else {
            return;
        };
        let offset = DragOffset::capture(shape, grab);
        debug!(%id, ?offset, "move started");
        self.gesture = Gesture::Moving { id, offset };
    }

    /// Apply the current gesture at `pos`. Returns the id of the shape it
    /// replaced, or `None` when there is nothing to do.
    ///
    /// A sample identical to the last applied one is skipped: resize is not
    /// idempotent once a drag has crossed the opposite edge.
    fn advance_gesture(&mut self, pos: PointerPos, constrained: bool) -> Option<ShapeId> {
        let id = self.gesture_target()?;
        if self.last_step == Some((pos, constrained)) {
            return None;
        }
        self.last_step = Some((pos, constrained));
        let current = self.store.get(&id)?;
        let next = match self.gesture {
            Gesture::Idle => return None,
            Gesture::Creating { .. } => {
                let second = constrain::second_anchor(current, pos, constrained);
                let mut next = current.clone();
                next.set_anchor(AnchorSlot::Second, second);
                next
            }
            Gesture::Resizing { handle, .. } => resize::adjust(current, handle, pos),
            Gesture::Moving { offset, .. } => resize::move_to(current, offset, pos),
        };
        if next == *current {
            return None;
        }
        trace!(%id, x = pos.x, y = pos.y, "gesture step");
        self.store.replace(next).then_some(id)
    }

    fn gesture_target(&self) -> Option<ShapeId> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Creating { id } | Gesture::Resizing { id, .. } | Gesture::Moving { id, .. } => Some(id),
        }
    }

    fn selected_text_id(&self) -> Option<ShapeId> {
        if self.ui.mode != Mode::Selected {
            return None;
        }
        let id = self.ui.active_id?;
        self.store.get(&id).filter(|s| s.kind == ShapeKind::Text).map(|s| s.id)
    }

    fn restyle_active(&mut self, partial: PartialShape) -> Vec<Action> {
        let Some(id) = self.ui.active_id.filter(|_| self.ui.mode == Mode::Selected) else {
            return vec![Action::RenderNeeded];
        };
        if !self.store.apply_partial(&id, &partial) {
            return vec![Action::RenderNeeded];
        }
        debug!(%id, ?partial, "restyled");
        vec![Action::ShapeUpdated(id), Action::RenderNeeded]
    }
}

/// The browser engine. Wraps `EngineCore` and reads geometry from the surface element.
pub struct Engine {
    surface: Element,
    core: Rc<RefCell<EngineCore>>,
    subscription: Option<Subscription>,
}

impl Engine {
    /// Create an engine bound to the given drawing surface element.
    #[must_use]
    pub fn new(surface: Element, config: AnnotateConfig) -> Self {
        Self { surface, core: Rc::new(RefCell::new(EngineCore::with_config(config))), subscription: None }
    }

    /// Start following global pointer movement. `on_actions` receives the
    /// actions produced by each move that changed something.
    pub fn mount<F>(&mut self, feed: &mut PointerFeed, on_actions: F)
    where
        F: Fn(Vec<Action>) + 'static,
    {
        if let Some(old) = self.subscription.take() {
            feed.unsubscribe(old);
        }
        let core = Rc::clone(&self.core);
        let surface = self.surface.clone();
        let sub = feed.subscribe(move |sample| {
            let actions = {
                let mut core = core.borrow_mut();
                core.set_surface(Some(surface_rect(&surface)));
                core.on_pointer_move(sample.page, sample.modifiers)
            };
            if !actions.is_empty() {
                on_actions(actions);
            }
        });
        debug!(?sub, "engine mounted");
        self.subscription = Some(sub);
        self.sync_surface();
    }

    /// Stop following global pointer movement and forget the surface offset.
    pub fn unmount(&mut self, feed: &mut PointerFeed) {
        if let Some(sub) = self.subscription.take() {
            feed.unsubscribe(sub);
            debug!(?sub, "engine unmounted");
        }
        self.core.borrow_mut().set_surface(None);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(
        &mut self,
        page: Point,
        target: PointerTarget,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        self.sync_surface();
        self.core.borrow_mut().on_pointer_down(page, target, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, page: Point, modifiers: Modifiers) -> Vec<Action> {
        self.sync_surface();
        self.core.borrow_mut().on_pointer_move(page, modifiers)
    }

    pub fn on_pointer_up(&mut self, page: Point, modifiers: Modifiers) -> Vec<Action> {
        self.sync_surface();
        self.core.borrow_mut().on_pointer_up(page, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, editing_text: bool) -> Vec<Action> {
        self.core.borrow_mut().on_key_down(key, editing_text)
    }

    // --- Delegated host controls ---

    pub fn set_kind(&mut self, kind: ShapeKind) -> Vec<Action> {
        self.core.borrow_mut().set_kind(kind)
    }

    pub fn set_color(&mut self, color: String) -> Vec<Action> {
        self.core.borrow_mut().set_color(color)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_stroke_width`].
    pub fn set_stroke_width(&mut self, width: f64) -> Result<Vec<Action>, AnnotateError> {
        self.core.borrow_mut().set_stroke_width(width)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_font_size`].
    pub fn set_font_size(&mut self, size: f64) -> Result<Vec<Action>, AnnotateError> {
        self.core.borrow_mut().set_font_size(size)
    }

    pub fn edit_text(&mut self, content: String) -> Vec<Action> {
        self.core.borrow_mut().edit_text(content)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.borrow_mut().undo()
    }

    pub fn delete_shape(&mut self, id: &ShapeId) -> Vec<Action> {
        self.core.borrow_mut().delete_shape(id)
    }

    /// # Errors
    ///
    /// See [`EngineCore::save`].
    pub fn save<R: Rasterizer>(&self, rasterizer: &R) -> Result<R::Image, AnnotateError> {
        self.core.borrow().save(rasterizer)
    }

    /// Clear `ctx` and draw every shape, bottom first.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let r = self.surface.get_bounding_client_rect();
        let pixels = ctx.canvas().map_or((0, 0), |c| (c.width(), c.height()));
        let (sx, sy) = paint::pixel_scale((r.width(), r.height()), pixels);
        ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, r.width(), r.height());
        paint::draw(ctx, &self.core.borrow().scene())
    }

    // --- Queries ---

    #[must_use]
    pub fn core(&self) -> Ref<'_, EngineCore> {
        self.core.borrow()
    }

    #[must_use]
    pub fn core_mut(&self) -> RefMut<'_, EngineCore> {
        self.core.borrow_mut()
    }

    fn sync_surface(&self) {
        self.core.borrow_mut().set_surface(Some(surface_rect(&self.surface)));
    }
}

fn surface_rect(surface: &Element) -> SurfaceRect {
    let r = surface.get_bounding_client_rect();
    SurfaceRect::new(r.x(), r.y(), r.width(), r.height())
}
