// Resume PDF rendering.
// Wraps the Markdown draft into Helvetica lines, paginates them on A4 and
// writes a self-contained PDF. The draft is printed as-is; Markdown is not
// interpreted.

pub mod handlers;
pub mod layout;
pub mod metrics;
pub mod pdf;
