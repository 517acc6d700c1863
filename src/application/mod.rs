// Demand model training and serving
pub mod demand;

// Fare quoting on top of demand estimates
pub mod pricing;
