pub mod border;
pub mod clipboard;
pub mod error;
pub mod grid;
pub mod group_sort;
pub mod headers;
pub mod session;
pub mod store;

pub use border::BorderSpec;
pub use clipboard::BorderClipboard;
pub use error::GridError;
pub use grid::{parse_dimensions, BorderGrid};
pub use headers::{HeaderNaming, HeaderRegistry};
pub use session::EditorSession;
pub use store::BorderStore;
