mod clocking;
mod timeline;

pub use clocking::{
    detect_clocking, ClockingAssessment, ClockingFlag, ClockingThresholds, FlagKind, FlagSeverity,
    RiskLevel,
};
pub use timeline::{MileagePoint, MileageTimeline};
