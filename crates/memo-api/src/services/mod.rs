pub mod summary;

pub use summary::SummaryService;
