pub mod page;

pub use page::PageRenderer;
