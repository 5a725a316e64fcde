mod allow_list;
mod emitter;
mod fingerprint_index;
mod output;
mod reconciler;
mod store_export;
mod trust_list;

pub use allow_list::*;
pub use emitter::*;
pub use fingerprint_index::*;
pub use output::*;
pub use reconciler::*;
pub use store_export::*;
pub use trust_list::*;
