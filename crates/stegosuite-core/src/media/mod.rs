mod compare;
mod types;

use std::path::Path;

pub use compare::*;
pub use types::*;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
