use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fridge_poetry_core::{centered_in_canvas, ContainerId, DropTarget, InputAction, Size};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, DragEvent, Element, Event, HtmlElement, Touch, TouchEvent};

use crate::app_core::{AppCore, Geometry, TimerCommand};
use crate::dom_view::{tile_from_target, DomView};

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for HtmlElement {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

/// Fridge coordinates that put the center of `tile` under a viewport point.
pub(crate) fn viewport_to_canvas(
    client_x: f32,
    client_y: f32,
    canvas: &impl HasClientRect,
    tile: Size,
) -> (f32, f32) {
    let rect = canvas.client_rect();
    centered_in_canvas(
        (client_x, client_y),
        (rect.left() as f32, rect.top() as f32),
        tile,
    )
}

fn touch_from_event(event: &TouchEvent, touch_id: Option<i32>, use_changed: bool) -> Option<Touch> {
    let list = if use_changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    if let Some(id) = touch_id {
        for idx in 0..list.length() {
            if let Some(touch) = list.item(idx) {
                if touch.identifier() == id {
                    return Some(touch);
                }
            }
        }
        None
    } else {
        list.item(0)
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn non_passive() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

/// Turns page events into controller actions and owns the arm timer.
pub(crate) struct InputContext {
    core: Rc<AppCore>,
    view: Rc<DomView>,
    document: Document,
    arm_timer: RefCell<Option<Timeout>>,
    touch_id: Cell<Option<i32>>,
}

impl InputContext {
    pub(crate) fn new(core: Rc<AppCore>, view: Rc<DomView>, document: Document) -> Rc<Self> {
        Rc::new(Self {
            core,
            view,
            document,
            arm_timer: RefCell::new(None),
            touch_id: Cell::new(None),
        })
    }

    fn geometry(&self) -> Geometry {
        let fridge = self.view.fridge();
        let canvas = Size::new(fridge.client_width() as f32, fridge.client_height() as f32);
        let tile = self
            .core
            .active_tile()
            .and_then(|id| self.view.tile_element(id))
            .map(|element| {
                Size::new(element.offset_width() as f32, element.offset_height() as f32)
            })
            .unwrap_or_default();
        Geometry { canvas, tile }
    }

    fn dispatch(self: &Rc<Self>, action: InputAction) {
        let outcome = self.core.apply_input(action, self.geometry());
        self.run_timers(outcome.timers);
        for err in outcome.errors {
            gloo::console::warn!(format!("{action:?} was not applied: {err}"));
        }
    }

    fn run_timers(self: &Rc<Self>, timers: Vec<TimerCommand>) {
        for command in timers {
            match command {
                TimerCommand::Start { token, delay_ms } => {
                    let context = Rc::downgrade(self);
                    let timeout = Timeout::new(delay_ms, move || {
                        if let Some(context) = context.upgrade() {
                            context.dispatch(InputAction::ArmTimerFired { token });
                        }
                    });
                    // The fired timeout stays in the slot until the next press.
                    self.arm_timer.replace(Some(timeout));
                }
                TimerCommand::Cancel => {
                    self.arm_timer.take();
                }
            }
        }
    }

    pub(crate) fn refresh(self: &Rc<Self>) {
        let (timers, result) = self.core.refresh();
        self.touch_id.set(None);
        self.run_timers(timers);
        if let Err(err) = result {
            gloo::console::warn!(format!("refresh skipped: {err}"));
        }
    }

    fn fridge_target(&self, client_x: f32, client_y: f32) -> DropTarget {
        let (x, y) = viewport_to_canvas(client_x, client_y, self.view.fridge(), self.geometry().tile);
        DropTarget::Fridge { x, y }
    }

    /// Resolves a touch release by hit testing what lies under the finger.
    fn target_at(&self, client_x: f32, client_y: f32) -> DropTarget {
        let Some(element) = self.document.element_from_point(client_x, client_y) else {
            return DropTarget::Outside;
        };
        match self.view.container_of(&element) {
            Some(ContainerId::Fridge) => self.fridge_target(client_x, client_y),
            Some(ContainerId::Pool(pool)) => DropTarget::Pool(pool),
            None => DropTarget::Outside,
        }
    }
}

pub(crate) fn install_listeners(
    context: &Rc<InputContext>,
    refresh_button: Option<&Element>,
) -> Vec<EventListener> {
    let mut listeners = if context.core.platform().is_touch {
        touch_listeners(context)
    } else {
        drag_listeners(context)
    };
    if let Some(button) = refresh_button {
        let context = Rc::clone(context);
        listeners.push(EventListener::new(button, "click", move |_event: &Event| {
            context.refresh();
        }));
    }
    listeners
}

fn drag_listeners(context: &Rc<InputContext>) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    let document = context.document.clone();

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new(&document, "dragstart", move |event: &Event| {
        let Some(event) = event.dyn_ref::<DragEvent>() else {
            return;
        };
        let Some((tile, element)) = event_element(event).as_ref().and_then(tile_from_target) else {
            return;
        };
        let Some(origin) = ctx.view.container_of(&element) else {
            return;
        };
        if let Some(data) = event.data_transfer() {
            let word = element.text_content().unwrap_or_default();
            let _ = data.set_data("text/plain", &word);
        }
        ctx.dispatch(InputAction::DragStart { tile, origin });
    }));

    let fridge = context.view.fridge().clone();
    listeners.push(EventListener::new_with_options(
        &fridge,
        "dragover",
        non_passive(),
        |event: &Event| event.prevent_default(),
    ));
    let ctx = Rc::clone(context);
    listeners.push(EventListener::new_with_options(
        &fridge,
        "drop",
        non_passive(),
        move |event: &Event| {
            event.prevent_default();
            let Some(event) = event.dyn_ref::<DragEvent>() else {
                return;
            };
            let target = ctx.fridge_target(event.client_x() as f32, event.client_y() as f32);
            ctx.dispatch(InputAction::Drop { target });
        },
    ));

    for (pool, element) in context.view.pools() {
        let pool = *pool;
        listeners.push(EventListener::new_with_options(
            element,
            "dragover",
            non_passive(),
            |event: &Event| event.prevent_default(),
        ));
        let ctx = Rc::clone(context);
        listeners.push(EventListener::new_with_options(
            element,
            "drop",
            non_passive(),
            move |event: &Event| {
                event.prevent_default();
                ctx.dispatch(InputAction::Drop {
                    target: DropTarget::Pool(pool),
                });
            },
        ));
    }

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new(&document, "dragend", move |_event: &Event| {
        ctx.dispatch(InputAction::DragEnd);
    }));
    listeners
}

fn touch_listeners(context: &Rc<InputContext>) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    let document = context.document.clone();

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new_with_options(
        &document,
        "touchstart",
        non_passive(),
        move |event: &Event| {
            if ctx.core.session_active() {
                return;
            }
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let Some((tile, element)) = event_element(event).as_ref().and_then(tile_from_target)
            else {
                return;
            };
            let Some(origin) = ctx.view.container_of(&element) else {
                return;
            };
            event.prevent_default();
            ctx.touch_id
                .set(touch_from_event(event, None, true).map(|touch| touch.identifier()));
            ctx.dispatch(InputAction::TouchStart { tile, origin });
        },
    ));

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new_with_options(
        &document,
        "touchmove",
        non_passive(),
        move |event: &Event| {
            if !ctx.core.session_active() {
                return;
            }
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let Some(touch) = touch_from_event(event, ctx.touch_id.get(), false) else {
                return;
            };
            event.prevent_default();
            let (x, y) = viewport_to_canvas(
                touch.client_x() as f32,
                touch.client_y() as f32,
                ctx.view.fridge(),
                ctx.geometry().tile,
            );
            ctx.dispatch(InputAction::TouchMove { x, y });
        },
    ));

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new_with_options(
        &document,
        "touchend",
        non_passive(),
        move |event: &Event| {
            if !ctx.core.session_active() {
                return;
            }
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let Some(touch) = touch_from_event(event, ctx.touch_id.get(), true) else {
                return;
            };
            event.prevent_default();
            ctx.touch_id.set(None);
            let target = ctx.target_at(touch.client_x() as f32, touch.client_y() as f32);
            ctx.dispatch(InputAction::TouchEnd { target });
        },
    ));

    let ctx = Rc::clone(context);
    listeners.push(EventListener::new(&document, "touchcancel", move |event: &Event| {
        if !ctx.core.session_active() {
            return;
        }
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        if touch_from_event(event, ctx.touch_id.get(), true).is_none() {
            return;
        }
        ctx.touch_id.set(None);
        ctx.dispatch(InputAction::TouchCancel);
    }));
    listeners
}
