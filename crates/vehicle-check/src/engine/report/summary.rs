use super::views::{DefectItemView, InspectionView, LatestTestView, MotSummary};
use crate::engine::domain::{
    DefectObservation, DefectSeverity, InspectionRecord, TestResult, VehicleSnapshot,
};

pub fn build_mot_summary(snapshot: &VehicleSnapshot, records: &[InspectionRecord]) -> MotSummary {
    let total_passes = records
        .iter()
        .filter(|record| record.result == TestResult::Passed)
        .count();
    let total_failures = records
        .iter()
        .filter(|record| record.result == TestResult::Failed)
        .count();

    let latest = records.last();
    let current_odometer = records.iter().rev().find_map(InspectionRecord::miles);

    MotSummary {
        registration: snapshot.registration.clone(),
        make: snapshot.make.clone(),
        total_tests: records.len(),
        total_passes,
        total_failures,
        latest_test: latest.map(|record| LatestTestView {
            date: record.date,
            result: record.result,
            result_label: record.result.label(),
            odometer_miles: record.miles(),
        }),
        current_odometer,
    }
}

/// Per-test detail rows, newest first.
pub fn inspection_views(records: &[InspectionRecord]) -> Vec<InspectionView> {
    records
        .iter()
        .rev()
        .enumerate()
        .map(|(index, record)| {
            let advisories = defect_views(record, |severity| severity == DefectSeverity::Advisory);
            let dangerous = defect_views(record, |severity| severity == DefectSeverity::Dangerous);
            let failures = defect_views(record, |severity| {
                matches!(severity, DefectSeverity::Minor | DefectSeverity::Major)
            });

            InspectionView {
                test_number: index + 1,
                test_id: record.test_id.clone(),
                date: record.date,
                result: record.result,
                result_label: record.result.label(),
                odometer_miles: record.miles(),
                odometer_unit: record.odometer_unit.map(|unit| unit.label()),
                expiry_date: record.expiry_date,
                total_defects: record.defects.len(),
                advisories,
                failures,
                dangerous,
            }
        })
        .collect()
}

fn defect_views(
    record: &InspectionRecord,
    keep: impl Fn(DefectSeverity) -> bool,
) -> Vec<DefectItemView> {
    record
        .defects
        .iter()
        .filter(|defect| keep(defect.severity))
        .map(DefectObservation::to_view)
        .collect()
}

impl DefectObservation {
    fn to_view(&self) -> DefectItemView {
        DefectItemView {
            text: self.text.clone(),
            severity: self.severity,
            severity_label: self.severity.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domain::{OdometerResultType, OdometerUnit};

    fn record(sequence: u32, date: &str, result: TestResult, miles: Option<i64>) -> InspectionRecord {
        InspectionRecord {
            sequence,
            test_id: Some(format!("10000000{sequence}")),
            date: date.parse().expect("valid date"),
            result,
            odometer_value: miles,
            odometer_unit: Some(OdometerUnit::Miles),
            odometer_result: if miles.is_some() {
                OdometerResultType::Read
            } else {
                OdometerResultType::Unreadable
            },
            expiry_date: None,
            defects: Vec::new(),
        }
    }

    fn snapshot() -> VehicleSnapshot {
        VehicleSnapshot {
            registration: "AB12CDE".to_string(),
            make: Some("FORD".to_string()),
            colour: None,
            fuel_type: Some("PETROL".to_string()),
            year_of_manufacture: Some(2016),
            engine_capacity: None,
            co2_emissions: None,
            euro_status: None,
            tax_status: None,
            tax_due_date: None,
            mot_status: None,
            mot_expiry_date: None,
            date_of_last_v5c_issued: None,
            marked_for_export: None,
            type_approval: None,
        }
    }

    #[test]
    fn summary_counts_passes_and_failures() {
        let records = vec![
            record(1, "2022-05-01", TestResult::Failed, Some(40_000)),
            record(2, "2022-05-08", TestResult::Passed, Some(40_020)),
            record(3, "2023-05-01", TestResult::Passed, Some(47_500)),
        ];

        let summary = build_mot_summary(&snapshot(), &records);
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.total_passes, 2);
        assert_eq!(summary.total_failures, 1);
        assert_eq!(summary.current_odometer, Some(47_500));
        let latest = summary.latest_test.expect("latest test present");
        assert_eq!(latest.result_label, "PASSED");
    }

    #[test]
    fn current_odometer_skips_unreadable_latest_reading() {
        let records = vec![
            record(1, "2022-05-01", TestResult::Passed, Some(40_000)),
            record(2, "2023-05-01", TestResult::Passed, None),
        ];

        let summary = build_mot_summary(&snapshot(), &records);
        assert_eq!(summary.current_odometer, Some(40_000));
        assert_eq!(
            summary.latest_test.expect("latest test present").odometer_miles,
            None
        );
    }

    #[test]
    fn inspection_views_are_newest_first() {
        let records = vec![
            record(1, "2022-05-01", TestResult::Failed, Some(40_000)),
            record(2, "2023-05-01", TestResult::Passed, Some(47_500)),
        ];

        let views = inspection_views(&records);
        assert_eq!(views[0].test_number, 1);
        assert_eq!(views[0].date.to_string(), "2023-05-01");
        assert_eq!(views[1].date.to_string(), "2022-05-01");
    }
}
