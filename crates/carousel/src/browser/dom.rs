//! DOM-backed viewport and presenter.

use super::markup::{
    control_attributes, dot_attributes, parse_px, region_attributes, slide_attributes,
    status_attributes, width_css, Attributes, DOT_CLASS, LIST_SELECTOR, NEXT_SELECTOR,
    PAGINATION_SELECTOR, PREVIOUS_SELECTOR, STATUS_ID,
};
use carousel_core::accessibility::{ACTIVE_DOT_CLASS, ACTIVE_SLIDE_CLASS};
use carousel_core::{
    ControlAttributes, DotAttributes, Presenter, Rect, RegionAttributes, SlideAttributes, Viewport,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FocusOptions, HtmlElement, Window};

fn find_html(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn children(list: &HtmlElement) -> Vec<HtmlElement> {
    let items = list.children();
    (0..items.length())
        .filter_map(|i| items.item(i))
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_attributes(element: &Element, attributes: &Attributes) {
    for (name, value) in attributes {
        if let Err(err) = element.set_attribute(name, value) {
            warn!(name, ?err, "setAttribute failed");
        }
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!(class, ?err, "class toggle failed");
    }
}

fn to_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.x(), r.y(), r.width(), r.height())
}

/// The `.slider__list` element and its slide children.
#[derive(Debug, Clone)]
pub struct DomViewport {
    window: Window,
    list: HtmlElement,
    slides: Vec<HtmlElement>,
}

impl DomViewport {
    /// Find the slide list under `root`. Slides are its element children,
    /// captured once.
    pub fn resolve(window: Window, root: &Element) -> Option<Self> {
        let list = find_html(root, LIST_SELECTOR)?;
        let slides = children(&list);
        Some(Self {
            window,
            list,
            slides,
        })
    }

    /// The scrollable list element.
    pub const fn list(&self) -> &HtmlElement {
        &self.list
    }

    fn computed(&self, element: &Element, property: &str) -> Option<String> {
        self.window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
    }
}

impl Viewport for DomViewport {
    type Slide = HtmlElement;

    fn scroll_offset(&self) -> f64 {
        f64::from(self.list.scroll_left())
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.list.set_scroll_left(offset.round() as i32);
    }

    fn bounds(&self) -> Rect {
        to_rect(&self.list)
    }

    fn padding_left(&self) -> f64 {
        self.computed(&self.list, "padding-left")
            .map_or(0.0, |v| parse_px(&v))
    }

    fn gap(&self) -> f64 {
        self.computed(&self.list, "column-gap")
            .map_or(0.0, |v| parse_px(&v))
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide(&self, index: usize) -> Option<HtmlElement> {
        self.slides.get(index).cloned()
    }

    fn slide_bounds(&self, index: usize) -> Option<Rect> {
        if !self.is_slide_visible(index) {
            return None;
        }
        self.slides.get(index).map(|s| to_rect(s))
    }

    fn slide_offset_left(&self, index: usize) -> Option<f64> {
        let slide = self.slide_bounds(index)?;
        Some(slide.left() - self.bounds().left() + self.scroll_offset())
    }

    fn is_slide_visible(&self, index: usize) -> bool {
        self.slides.get(index).is_some_and(|slide| {
            self.computed(slide, "display")
                .map_or(true, |display| display != "none")
        })
    }
}

/// Applies carousel presentation to the slider's DOM.
#[derive(Debug)]
pub struct DomPresenter {
    document: Document,
    root: Element,
    list: Option<HtmlElement>,
    slides: Vec<HtmlElement>,
    previous: Option<HtmlElement>,
    next: Option<HtmlElement>,
    pagination: Option<Element>,
    dots: Vec<Element>,
    status: Option<Element>,
}

impl DomPresenter {
    /// Look up the list, controls and pagination host under `root`.
    pub fn new(document: Document, root: Element) -> Self {
        let list = find_html(&root, LIST_SELECTOR);
        let slides = list.as_ref().map(children).unwrap_or_default();
        let previous = find_html(&root, PREVIOUS_SELECTOR);
        let next = find_html(&root, NEXT_SELECTOR);
        let pagination = root.query_selector(PAGINATION_SELECTOR).ok().flatten();
        Self {
            document,
            root,
            list,
            slides,
            previous,
            next,
            pagination,
            dots: Vec::new(),
            status: None,
        }
    }

    /// Previous control, if present.
    pub const fn previous_control(&self) -> Option<&HtmlElement> {
        self.previous.as_ref()
    }

    /// Next control, if present.
    pub const fn next_control(&self) -> Option<&HtmlElement> {
        self.next.as_ref()
    }

    /// Pagination container, if present.
    pub const fn pagination_host(&self) -> Option<&Element> {
        self.pagination.as_ref()
    }

    fn status_element(&mut self, region: &RegionAttributes) -> Option<Element> {
        if let Some(existing) = self.document.get_element_by_id(STATUS_ID) {
            if self.root.contains(Some(existing.as_ref())) {
                return Some(existing);
            }
        }
        let status = self.document.create_element("div").ok()?;
        set_attributes(&status, &status_attributes(region));
        if let Err(err) = self.root.append_child(&status) {
            warn!(?err, "status element not attached");
            return None;
        }
        Some(status)
    }
}

impl Presenter for DomPresenter {
    fn has_pagination_host(&self) -> bool {
        self.pagination.is_some()
    }

    fn has_controls(&self) -> bool {
        self.previous.is_some() && self.next.is_some()
    }

    fn document_lang(&self) -> Option<String> {
        self.document
            .document_element()
            .and_then(|html| html.get_attribute("lang"))
            .filter(|lang| !lang.trim().is_empty())
    }

    fn init_region(&mut self, region: &RegionAttributes) {
        if let Some(list) = &self.list {
            set_attributes(list, &region_attributes(region));
        }
        self.status = self.status_element(region);
    }

    fn update_slide(&mut self, slide: &SlideAttributes) {
        let Some(element) = self.slides.get(slide.index) else {
            return;
        };
        set_attributes(element, &slide_attributes(slide));
        toggle_class(element, ACTIVE_SLIDE_CLASS, slide.has_active_class());
        if let Some(css) = width_css(&slide.width) {
            let style = element.style();
            if style.set_property("transition", &css.transition).is_err()
                || style.set_property("width", &css.width).is_err()
            {
                warn!(index = slide.index, "slide width not applied");
            }
        }
    }

    fn render_pagination(&mut self, dots: &[DotAttributes]) {
        let Some(host) = &self.pagination else {
            return;
        };
        host.set_inner_html("");
        self.dots.clear();
        for dot in dots {
            let Ok(button) = self.document.create_element("button") else {
                warn!(dot = dot.dot, "dot not created");
                continue;
            };
            button.set_class_name(DOT_CLASS);
            set_attributes(&button, &dot_attributes(dot));
            toggle_class(&button, ACTIVE_DOT_CLASS, dot.selected);
            if let Err(err) = host.append_child(&button) {
                warn!(?err, "dot not attached");
                continue;
            }
            self.dots.push(button);
        }
    }

    fn select_dot(&mut self, dot: Option<usize>) {
        for (index, button) in self.dots.iter().enumerate() {
            let selected = dot == Some(index);
            toggle_class(button, ACTIVE_DOT_CLASS, selected);
            let value = if selected { "true" } else { "false" };
            if let Err(err) = button.set_attribute("aria-selected", value) {
                warn!(?err, "dot selection not applied");
            }
        }
    }

    fn update_controls(&mut self, previous: &ControlAttributes, next: &ControlAttributes) {
        for (element, control) in [(&self.previous, previous), (&self.next, next)] {
            if let Some(element) = element {
                set_attributes(element, &control_attributes(control));
            }
        }
    }

    fn announce(&mut self, text: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(text));
        }
    }

    fn focus_slide(&mut self, index: usize) {
        let Some(slide) = self.slides.get(index) else {
            return;
        };
        let options = FocusOptions::new();
        options.set_prevent_scroll(true);
        if let Err(err) = slide.focus_with_options(&options) {
            warn!(index, ?err, "focus failed");
        }
    }
}
