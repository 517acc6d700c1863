// Fare quoting domain: schedules and quote value objects
pub mod fare;
