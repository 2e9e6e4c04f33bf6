//! WASM entry point: binds a carousel to a `.slider` element.

use super::dom::{DomPresenter, DomViewport};
use super::input::{parse_dot_index, pointer_sample};
use super::markup::{parse_options, DOT_INDEX_ATTR, OPTIONS_ATTR};
use super::raf::RafScheduler;
use carousel_core::{Carousel, Key, PanRecognizer, SlideChanged};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, KeyboardEvent, PointerEvent};

type DomCarousel = Carousel<DomViewport, RafScheduler, DomPresenter>;

const POINTER_EVENTS: [&str; 5] = [
    "pointerdown",
    "pointermove",
    "pointerup",
    "pointercancel",
    "lostpointercapture",
];

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Slide changes raised while the carousel is borrowed. JS callbacks run
/// from [`ChangeQueue::flush`] once the borrow is released, so they may call
/// back into the slider.
#[derive(Default)]
struct ChangeQueue {
    pending: RefCell<Vec<SlideChanged<HtmlElement>>>,
    callbacks: RefCell<Vec<js_sys::Function>>,
}

impl ChangeQueue {
    fn push(&self, event: &SlideChanged<HtmlElement>) {
        self.pending.borrow_mut().push(event.clone());
    }

    fn flush(&self) {
        loop {
            let batch = std::mem::take(&mut *self.pending.borrow_mut());
            if batch.is_empty() {
                return;
            }
            let callbacks = self.callbacks.borrow().clone();
            for event in &batch {
                let index = JsValue::from_f64(event.index as f64);
                for callback in &callbacks {
                    if let Err(err) = callback.call2(&JsValue::NULL, &index, &event.slide) {
                        warn!(?err, "change callback threw");
                    }
                }
            }
        }
    }
}

fn with_carousel(
    carousel: &Weak<RefCell<DomCarousel>>,
    changes: &ChangeQueue,
    f: impl FnOnce(&mut DomCarousel),
) {
    let Some(carousel) = carousel.upgrade() else {
        return;
    };
    match carousel.try_borrow_mut() {
        Ok(mut carousel) => f(&mut carousel),
        Err(_) => trace!("carousel busy, event dropped"),
    };
    changes.flush();
}

/// A mounted slider.
#[wasm_bindgen]
pub struct Slider {
    carousel: Rc<RefCell<DomCarousel>>,
    changes: Rc<ChangeQueue>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Slider {
    /// Mount on a slider root. Options are a JSON object; when omitted they
    /// are read from the root's `data-slider-options` attribute.
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element, options: Option<String>) -> Result<Slider, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let options = options.or_else(|| root.get_attribute(OPTIONS_ATTR));
        let config = parse_options(options.as_deref()).map_err(|err| {
            warn!(%err, "slider options rejected");
            JsValue::from_str(&err.to_string())
        })?;

        let viewport = DomViewport::resolve(window.clone(), &root);
        let presenter = DomPresenter::new(document, root);
        let scheduler = RafScheduler::new(window);
        let sink = scheduler.frame_sink();

        let mut carousel =
            Carousel::mount(viewport, scheduler, presenter, config).map_err(|err| {
                warn!(%err, "slider not mounted");
                JsValue::from_str(&err.to_string())
            })?;
        let changes = Rc::new(ChangeQueue::default());
        {
            let changes = Rc::clone(&changes);
            carousel.on_change(move |event| changes.push(event));
        }
        let carousel = Rc::new(RefCell::new(carousel));

        let weak = Rc::downgrade(&carousel);
        let frame_changes = Rc::clone(&changes);
        *sink.borrow_mut() = Some(Box::new(move |token| {
            with_carousel(&weak, &frame_changes, |c| {
                c.on_frame(token);
            });
        }));

        let mut slider = Self {
            carousel,
            changes,
            listeners: Vec::new(),
        };
        slider.bind();
        debug!(listeners = slider.listeners.len(), "slider bound");
        Ok(slider)
    }

    /// Animate to a slide.
    pub fn move_to_slide(&self, index: usize) {
        self.with(|c| c.move_to_slide(index));
    }

    /// Go to the next slide.
    pub fn next(&self) {
        self.with(DomCarousel::next);
    }

    /// Go to the previous slide.
    pub fn previous(&self) {
        self.with(DomCarousel::previous);
    }

    /// Current slide index.
    pub fn current_index(&self) -> usize {
        self.carousel.borrow().current_index()
    }

    /// Rebuild pagination dots after slides were shown or hidden.
    pub fn rebuild_pagination(&self) {
        self.with(DomCarousel::rebuild_pagination);
    }

    /// Remove pagination dots.
    pub fn detach_pagination(&self) {
        self.with(DomCarousel::detach_pagination);
    }

    /// Call `callback(index, slide)` whenever the active slide changes.
    /// The callback runs after the slider has finished updating and may
    /// call back into it.
    pub fn on_change(&self, callback: js_sys::Function) {
        self.changes.callbacks.borrow_mut().push(callback);
    }

    /// Remove all listeners and stop animating.
    pub fn destroy(&mut self) {
        self.unbind();
        self.with(DomCarousel::destroy);
        self.changes.callbacks.borrow_mut().clear();
    }
}

impl Slider {
    fn with(&self, f: impl FnOnce(&mut DomCarousel)) {
        with_carousel(&Rc::downgrade(&self.carousel), &self.changes, f);
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) =
            target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        {
            warn!(kind, ?err, "listener not attached");
            return;
        }
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
    }

    fn bind(&mut self) {
        let (list, previous, next, pagination) = {
            let carousel = self.carousel.borrow();
            let presenter = carousel.presenter();
            (
                carousel.viewport().list().clone(),
                presenter.previous_control().cloned(),
                presenter.next_control().cloned(),
                presenter.pagination_host().cloned(),
            )
        };
        if let Err(err) = list.style().set_property("touch-action", "pan-y") {
            warn!(?err, "touch-action not set");
        }
        let list_target: EventTarget = list.clone().into();

        let recognizer = Rc::new(RefCell::new(PanRecognizer::new()));
        for kind in POINTER_EVENTS {
            let weak = Rc::downgrade(&self.carousel);
            let changes = Rc::clone(&self.changes);
            let recognizer = Rc::clone(&recognizer);
            let list = list.clone();
            self.listen(&list_target, kind, move |event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                if kind == "pointerdown" {
                    // Keep receiving moves when the finger leaves the list.
                    if let Err(err) = list.set_pointer_capture(event.pointer_id()) {
                        warn!(?err, "pointer capture failed");
                    }
                }
                let Some(sample) = pointer_sample(
                    &event.type_(),
                    event.pointer_id(),
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    event.time_stamp(),
                ) else {
                    return;
                };
                let gesture = recognizer.borrow_mut().process(sample);
                if let Some(gesture) = gesture {
                    with_carousel(&weak, &changes, |c| c.handle_gesture(gesture));
                }
            });
        }

        let weak = Rc::downgrade(&self.carousel);
        let changes = Rc::clone(&self.changes);
        self.listen(&list_target, "scroll", move |_| {
            with_carousel(&weak, &changes, DomCarousel::on_scroll);
        });

        let weak = Rc::downgrade(&self.carousel);
        let changes = Rc::clone(&self.changes);
        self.listen(&list_target, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom_key(&event.key());
            if key != Key::Other {
                event.prevent_default();
                with_carousel(&weak, &changes, |c| c.on_key(key));
            }
        });

        if let Some(previous) = previous {
            let weak = Rc::downgrade(&self.carousel);
            let changes = Rc::clone(&self.changes);
            self.listen(&previous.into(), "click", move |_| {
                with_carousel(&weak, &changes, DomCarousel::on_previous_control);
            });
        }
        if let Some(next) = next {
            let weak = Rc::downgrade(&self.carousel);
            let changes = Rc::clone(&self.changes);
            self.listen(&next.into(), "click", move |_| {
                with_carousel(&weak, &changes, DomCarousel::on_next_control);
            });
        }

        if let Some(pagination) = pagination {
            let weak = Rc::downgrade(&self.carousel);
            let changes = Rc::clone(&self.changes);
            let selector = format!("[{DOT_INDEX_ATTR}]");
            self.listen(&pagination.into(), "click", move |event| {
                let dot = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|e| e.closest(&selector).ok().flatten())
                    .and_then(|e| e.get_attribute(DOT_INDEX_ATTR))
                    .and_then(|v| parse_dot_index(&v));
                if let Some(dot) = dot {
                    with_carousel(&weak, &changes, |c| c.on_dot(dot));
                }
            });
        }
    }

    fn unbind(&mut self) {
        for listener in self.listeners.drain(..) {
            let removed = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
            if let Err(err) = removed {
                warn!(kind = listener.kind, ?err, "listener not removed");
            }
        }
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        self.unbind();
    }
}
