// Demand model lifecycle: training, serving, hot swap
pub mod model;
pub mod predictor;
pub mod trainer;
