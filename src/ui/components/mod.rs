pub mod calculator_form;
pub mod category_selector;
pub mod result_display;
pub mod sale_mode_toggle;
pub mod toast;
