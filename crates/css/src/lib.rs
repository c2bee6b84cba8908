pub mod cascade;
pub mod computed;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{attach_styles, get_inline_style, matches_selector, query_selector, query_selector_all};
pub use computed::{ComputedStyle, compute_style, compute_styles};
pub use syntax::{
    Declaration, Rule, Selector, Stylesheet, parse_declarations, parse_selector, parse_stylesheet,
};
pub use values::{Cursor, parse_color, parse_cursor};
