// Pure UI-side state machines: pagination windows, the per-screen fetch
// protocol, and the cross-screen restaurant handoff. Nothing here touches
// the network or the terminal, which is what keeps it testable.

pub mod list;
pub mod pagination;
pub mod selection;

pub use list::ListScreen;
pub use pagination::Pagination;
pub use selection::SelectionHandoff;
