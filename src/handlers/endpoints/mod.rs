mod collection;
mod record;

pub use collection::{create, list};
pub use record::{delete, get, update};
