pub mod trade_analyzer;
pub mod trade_record;

pub use trade_analyzer::{AnalysisResult, TradeAnalyzer};
pub use trade_record::TradeRecord;
