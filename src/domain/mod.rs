// Demand forecasting domain
pub mod demand;

// Fare quoting domain
pub mod pricing;

// Domain-specific error types
pub mod errors;
