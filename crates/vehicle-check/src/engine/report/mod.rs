mod summary;
pub mod views;

pub use summary::{build_mot_summary, inspection_views};
pub use views::{
    InspectionView, LatestTestView, MotSummary, ScoreBand, VehicleReport,
};
