mod actor;
mod handle;
pub mod models;
mod refresh;
pub mod source;

pub use handle::SiteDirectoryHandle;
pub use refresh::run_refresh_loop;
