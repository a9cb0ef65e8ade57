pub mod cache;
pub mod sectors;
pub mod session;
pub mod signals;

pub use cache::TtlCache;
pub use sectors::SectorService;
pub use signals::{AnalysisError, Analyzer};
