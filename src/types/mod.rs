mod cert;
mod subject;
mod trust_list;

pub use cert::*;
pub use subject::*;
pub use trust_list::*;
