//! Output generation: canvas animation script and HTML preview page

pub mod page;
pub mod script;

pub use page::{render_page, PageOptions};
pub use script::{finalize, ScriptEmitter};
