//! Console widgets.

mod form;
mod header;
mod table;

pub use form::render_form;
pub use header::render_header;
pub use table::render_table;
