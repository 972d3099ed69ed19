//! Page embellishments
//!
//! Scroll and UI rules for the rest of the site. Only the decisions live
//! here; `platform::page` applies them to the DOM.

/// CSS selectors the embellishments attach to
pub mod selectors {
    pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
    pub const SECTIONS: &str = ".section";
    pub const SKILL_BARS: &str = ".skill-progress";
    pub const NAVBAR: &str = ".navbar";
    pub const HERO: &str = ".hero-content";
    pub const CONTACT_FORM: &str = ".contact-form";
}

/// Sections fade and slide in the first time they scroll into view
pub mod fade_in {
    pub const HIDDEN_OPACITY: &str = "0";
    pub const HIDDEN_TRANSFORM: &str = "translateY(30px)";
    pub const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
    pub const SHOWN_OPACITY: &str = "1";
    pub const SHOWN_TRANSFORM: &str = "translateY(0)";
    /// Fraction of the section that must be visible
    pub const THRESHOLD: f64 = 0.1;
    pub const ROOT_MARGIN: &str = "0px 0px -100px 0px";
}

/// Skill bars refill from zero once, when half visible
pub mod skill_bar {
    pub const THRESHOLD: f64 = 0.5;
    pub const EMPTY_WIDTH: &str = "0";
    /// Delay before restoring the bar's width (ms)
    pub const REFILL_DELAY_MS: i32 = 100;
}

/// Scroll offset past which the navbar turns solid
pub const NAVBAR_SOLID_AFTER: f64 = 100.0;

/// Hero content moves at this fraction of the scroll speed
pub const PARALLAX_RATE: f64 = 0.5;

/// Shown after the contact form is submitted
pub const CONTACT_ACK: &str =
    "Mesajınız için teşekkürler! En kısa sürede size dönüş yapacağım.";

/// Navbar background and shadow for a scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl NavbarStyle {
    pub const SOLID: Self = Self {
        background: "rgba(10, 10, 15, 0.95)",
        box_shadow: "0 2px 10px rgba(0, 0, 0, 0.3)",
    };
    pub const TRANSLUCENT: Self = Self {
        background: "rgba(10, 10, 15, 0.8)",
        box_shadow: "none",
    };

    pub fn for_scroll(offset: f64) -> Self {
        if offset > NAVBAR_SOLID_AFTER {
            Self::SOLID
        } else {
            Self::TRANSLUCENT
        }
    }
}

/// Hero parallax transform for a scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroParallax {
    pub translate_y: f64,
    pub opacity: f64,
}

impl HeroParallax {
    /// `None` once the hero has scrolled fully out of the viewport; the last
    /// applied style is then left alone.
    pub fn for_scroll(offset: f64, viewport_height: f64) -> Option<Self> {
        if offset >= viewport_height {
            return None;
        }
        Some(Self {
            translate_y: offset * PARALLAX_RATE,
            opacity: 1.0 - offset / viewport_height,
        })
    }

    /// CSS `transform` value
    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

/// Selector for an in-page link target, e.g. `#about` -> `#about`.
///
/// A bare `#` has no target.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}
