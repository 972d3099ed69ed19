//! DOM wiring for the page embellishments
//!
//! Each embellishment is independent: a missing element only disables the
//! feature that needs it.

use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::page::{self, HeroParallax, NavbarStyle, fade_in, selectors, skill_bar};

/// Install every embellishment on the current document
pub fn install() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    smooth_anchor_scroll(&document)?;
    section_fade_in(&document)?;
    skill_bar_fill(&document)?;
    scroll_effects(&document)?;
    contact_form(&document)?;

    log::info!("Page embellishments installed");
    Ok(())
}

/// All elements matching `selector`, as `HtmlElement`s
fn html_elements(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn smooth_anchor_scroll(document: &Document) -> Result<(), JsValue> {
    for anchor in html_elements(document, selectors::IN_PAGE_ANCHORS)? {
        let link = anchor.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(selector) = page::anchor_target(&href) else {
                return;
            };
            let target = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(selector).ok().flatten());
            if let Some(target) = target {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
        anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Observer over intersecting entries' targets
fn observer(
    threshold: f64,
    root_margin: Option<&str>,
    mut on_visible: impl FnMut(HtmlElement, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(el) = entry.target().dyn_into::<HtmlElement>() {
                    on_visible(el, &observer);
                }
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

fn section_fade_in(document: &Document) -> Result<(), JsValue> {
    let sections = html_elements(document, selectors::SECTIONS)?;
    if sections.is_empty() {
        return Ok(());
    }

    let observer = observer(fade_in::THRESHOLD, Some(fade_in::ROOT_MARGIN), |el, _| {
        set_style(&el, "opacity", fade_in::SHOWN_OPACITY);
        set_style(&el, "transform", fade_in::SHOWN_TRANSFORM);
    })?;

    for section in &sections {
        set_style(section, "opacity", fade_in::HIDDEN_OPACITY);
        set_style(section, "transform", fade_in::HIDDEN_TRANSFORM);
        set_style(section, "transition", fade_in::TRANSITION);
        observer.observe(section);
    }
    log::debug!("Fade-in on {} sections", sections.len());
    Ok(())
}

fn skill_bar_fill(document: &Document) -> Result<(), JsValue> {
    let bars = html_elements(document, selectors::SKILL_BARS)?;
    if bars.is_empty() {
        return Ok(());
    }

    let observer = observer(skill_bar::THRESHOLD, None, |bar, observer| {
        let width = bar.style().get_property_value("width").unwrap_or_default();
        set_style(&bar, "width", skill_bar::EMPTY_WIDTH);
        observer.unobserve(&bar);

        let Some(window) = web_sys::window() else {
            return;
        };
        let refill = Closure::once(move || set_style(&bar, "width", &width));
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                refill.as_ref().unchecked_ref(),
                skill_bar::REFILL_DELAY_MS,
            )
            .is_ok()
        {
            refill.forget();
        }
    })?;

    for bar in &bars {
        observer.observe(bar);
    }
    Ok(())
}

/// Navbar background and hero parallax, both driven by window scroll
fn scroll_effects(document: &Document) -> Result<(), JsValue> {
    let navbar = query_html(document, selectors::NAVBAR);
    let hero = query_html(document, selectors::HERO);
    if navbar.is_none() && hero.is_none() {
        return Ok(());
    }

    let window = web_sys::window().ok_or("no window")?;
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let offset = window.scroll_y().unwrap_or(0.0);

        if let Some(navbar) = &navbar {
            let style = NavbarStyle::for_scroll(offset);
            set_style(navbar, "background", style.background);
            set_style(navbar, "box-shadow", style.box_shadow);
        }

        if let Some(hero) = &hero {
            let viewport = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            if let Some(parallax) = HeroParallax::for_scroll(offset, viewport) {
                set_style(hero, "transform", &parallax.transform());
                set_style(hero, "opacity", &parallax.opacity.to_string());
            }
        }
    });
    window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn contact_form(document: &Document) -> Result<(), JsValue> {
    let Some(form) = document
        .query_selector(selectors::CONTACT_FORM)?
        .and_then(|el: Element| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };

    let target = form.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(page::CONTACT_ACK);
        }
        target.reset();
    });
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
