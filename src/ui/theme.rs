//! Class helpers shared by pages so state-dependent styling stays in one place.

// ============================================
// BUTTONS
// ============================================

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-button nav-button-active"
    } else {
        "nav-button"
    }
}

/// Two-way switches such as retail/wholesale or percent/absolute.
pub fn segment(active: bool) -> &'static str {
    if active {
        "segment segment-active"
    } else {
        "segment"
    }
}

pub fn category_option(selected: bool) -> &'static str {
    if selected {
        "chip chip-selected"
    } else {
        "chip"
    }
}

pub const BTN_DANGER: &str = "btn-danger";
pub const BTN_CLEAR: &str = "chip-clear";

// ============================================
// PANELS / TEXT
// ============================================

pub const PANEL: &str = "panel";
pub const LABEL: &str = "field-label";
pub const HINT: &str = "text-muted";
pub const INPUT: &str = "field-input";
pub const ERROR_BOX: &str = "error-box";

pub fn breakdown_line(highlight: bool) -> &'static str {
    if highlight {
        "breakdown-line breakdown-profit"
    } else {
        "breakdown-line"
    }
}

pub fn rate_cell(rate: f64) -> &'static str {
    if rate <= 0.0 {
        "numeric text-muted"
    } else {
        "numeric"
    }
}
