// Archive freshness tracking

pub mod detector;

pub use detector::{plan_updates, ChangeDetector, UpdatePlan};
