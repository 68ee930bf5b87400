use crate::engine::domain::InspectionRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// One odometer reading, normalized to miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MileagePoint {
    pub date: NaiveDate,
    pub miles: i64,
}

/// Chronological odometer readings with unreliable entries filtered out.
///
/// Fewer than two points means no timeline-dependent analysis can run;
/// callers must check `sufficient()` rather than treating an empty timeline
/// as a clean one.
#[derive(Debug, Clone, Default)]
pub struct MileageTimeline {
    points: Vec<MileagePoint>,
}

impl MileageTimeline {
    pub fn build(records: &[InspectionRecord]) -> Self {
        let points = records
            .iter()
            .filter_map(|record| {
                record.miles().map(|miles| MileagePoint {
                    date: record.date,
                    miles,
                })
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[MileagePoint] {
        &self.points
    }

    pub fn sufficient(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn first(&self) -> Option<&MileagePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&MileagePoint> {
        self.points.last()
    }

    /// Calendar span of the timeline in days.
    pub fn span_days(&self) -> Option<i64> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some((last.date - first.date).num_days()),
            _ => None,
        }
    }
}
