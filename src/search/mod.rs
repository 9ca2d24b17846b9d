// Core search logic: pure, no I/O

pub mod ingredients;
pub mod pagination;
pub mod ranking;

pub use ingredients::parse_ingredient_list;
pub use pagination::{offset_for_page, page_window, PageItem, PageWindow};
pub use ranking::rank_by_missing_ingredients;
