// Demand forecasting domain: records, vocabulary, feature encoding
pub mod features;
pub mod types;
pub mod vocabulary;
