use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use vehicle_check::engine::{
    normalize, HistoryAnalysisEngine, RawMotHistory, RawVehicleRecord, VehicleReport,
};
use vehicle_check::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Path to a DVLA-shaped vehicle enquiry JSON file
    #[arg(long)]
    pub(crate) vehicle: PathBuf,
    /// Path to a DVSA-shaped MOT history JSON file
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Override the reference date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Emit the full report as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reference date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Emit the full report as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        vehicle,
        history,
        today,
        json,
    } = args;

    let vehicle: RawVehicleRecord = serde_json::from_str(&std::fs::read_to_string(vehicle)?)?;
    let history: RawMotHistory = serde_json::from_str(&std::fs::read_to_string(history)?)?;

    let report = build_report(&vehicle, &history, today)?;
    emit_report(&report, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, json } = args;

    let vehicle: RawVehicleRecord = serde_json::from_str(SAMPLE_VEHICLE)?;
    let history: RawMotHistory = serde_json::from_str(SAMPLE_HISTORY)?;

    println!("Vehicle history check demo (bundled sample payloads)\n");
    let report = build_report(&vehicle, &history, today)?;
    emit_report(&report, json)
}

fn build_report(
    vehicle: &RawVehicleRecord,
    history: &RawMotHistory,
    today: Option<NaiveDate>,
) -> Result<VehicleReport, AppError> {
    let (snapshot, records) = normalize(vehicle, history)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    Ok(HistoryAnalysisEngine::default().analyze(&snapshot, &records, today))
}

fn emit_report(report: &VehicleReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    render_report(report);
    Ok(())
}

fn render_report(report: &VehicleReport) {
    let summary = &report.mot_summary;
    println!(
        "Vehicle {} ({}) evaluated {}",
        report.registration,
        summary.make.as_deref().unwrap_or("unknown make"),
        report.generated_on
    );
    println!(
        "MOT history: {} tests, {} passed, {} failed",
        summary.total_tests, summary.total_passes, summary.total_failures
    );
    if let Some(odometer) = summary.current_odometer {
        println!("Current odometer: {} miles", odometer);
    }

    match report.condition_score {
        Some(score) => {
            let band = report
                .condition_band
                .map(|band| band.label())
                .unwrap_or("Unrated");
            println!("\nCondition score: {}/100 ({})", score, band);
        }
        None => println!("\nCondition score: unavailable (no test history)"),
    }

    let clocking = &report.clocking_analysis;
    println!(
        "Mileage check: risk {:?}{}",
        clocking.risk_level,
        if clocking.clocked {
            " | CLOCKING SUSPECTED"
        } else {
            ""
        }
    );
    for flag in &clocking.flags {
        println!("  - [{:?}] {}", flag.severity, flag.detail);
    }
    if let Some(reason) = &clocking.reason {
        println!("  {}", reason);
    }

    if report.failure_patterns.is_empty() {
        println!("\nRecurring faults: none");
    } else {
        println!("\nRecurring faults");
        for pattern in &report.failure_patterns {
            println!(
                "  - {} x{} ({:?} concern)",
                pattern.category.label(),
                pattern.occurrences,
                pattern.concern_level
            );
        }
    }

    let compliance = &report.ulez_compliance;
    println!("\nEmission zones: {}", compliance.reason);
    if let Some(charge) = &compliance.daily_charge {
        println!("  Charges where non-compliant: {}", charge);
    }

    match &report.tax_calculation {
        Some(tax) => println!(
            "Road tax: band {} ({}), first year £{}, standard £{}/year",
            tax.band, tax.band_range, tax.first_year_rate, tax.annual_rate
        ),
        None => println!("Road tax: unavailable (no CO2 figure)"),
    }

    let stats = &report.vehicle_stats;
    if let Some(detail) = &stats.mot_expiry_detail {
        println!("MOT: {}", detail);
    }
    if let Some(detail) = &stats.tax_due_detail {
        println!("Tax: {}", detail);
    }
    if let Some(annual) = stats.estimated_annual_mileage {
        let assessment = stats
            .mileage_assessment
            .map(|assessment| assessment.label())
            .unwrap_or("Unclassified");
        println!("Estimated annual mileage: {} ({})", annual, assessment);
    }
    if let Some(insight) = &stats.v5c_insight {
        println!("Logbook: {}", insight);
    }
}

const SAMPLE_VEHICLE: &str = r#"{
  "registration": "LM18 XYZ",
  "make": "VOLKSWAGEN",
  "colour": "GREY",
  "fuelType": "DIESEL",
  "yearOfManufacture": 2018,
  "engineCapacity": 1968,
  "co2Emissions": 131,
  "euroStatus": "Euro 6",
  "taxStatus": "Taxed",
  "taxDueDate": "2026-02-01",
  "motStatus": "Valid",
  "motExpiryDate": "2026-04-18",
  "dateOfLastV5CIssued": "2022-06-10"
}"#;

const SAMPLE_HISTORY: &str = r#"{
  "registration": "LM18XYZ",
  "motTests": [
    {
      "completedDate": "2021-04-16T10:12:00Z",
      "testResult": "PASSED",
      "odometerValue": 31200,
      "odometerUnit": "MI",
      "odometerResultType": "READ",
      "expiryDate": "2022-04-15",
      "motTestNumber": "310000000001",
      "defects": [
        {"text": "Nearside front tyre worn close to legal limit", "type": "ADVISORY"}
      ]
    },
    {
      "completedDate": "2022-04-14T09:05:00Z",
      "testResult": "FAILED",
      "odometerValue": 40950,
      "odometerUnit": "MI",
      "odometerResultType": "READ",
      "motTestNumber": "310000000002",
      "defects": [
        {"text": "Offside front brake disc significantly worn", "type": "MAJOR"},
        {"text": "Windscreen wiper blade deteriorated", "type": "ADVISORY"}
      ]
    },
    {
      "completedDate": "2022-04-20T14:40:00Z",
      "testResult": "PASSED",
      "odometerValue": 40980,
      "odometerUnit": "MI",
      "odometerResultType": "READ",
      "expiryDate": "2023-04-19",
      "motTestNumber": "310000000003"
    },
    {
      "completedDate": "2023-04-18T11:30:00Z",
      "testResult": "PASSED",
      "odometerValue": 49800,
      "odometerUnit": "MI",
      "odometerResultType": "READ",
      "expiryDate": "2024-04-17",
      "motTestNumber": "310000000004",
      "defects": [
        {"text": "Front brake pad wearing thin", "type": "ADVISORY"}
      ]
    },
    {
      "completedDate": "2024-04-18T08:55:00Z",
      "testResult": "PASSED",
      "odometerValue": 58400,
      "odometerUnit": "MI",
      "odometerResultType": "READ",
      "expiryDate": "2025-04-17",
      "motTestNumber": "310000000005"
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_payloads_analyze_cleanly() {
        let vehicle: RawVehicleRecord =
            serde_json::from_str(SAMPLE_VEHICLE).expect("sample vehicle deserializes");
        let history: RawMotHistory =
            serde_json::from_str(SAMPLE_HISTORY).expect("sample history deserializes");

        let today = NaiveDate::from_ymd_opt(2025, 6, 1);
        let report = build_report(&vehicle, &history, today).expect("sample analyzes");

        assert_eq!(report.registration, "LM18XYZ");
        assert_eq!(report.mot_summary.total_tests, 5);
        assert!(!report.clocking_analysis.clocked);
        assert!(report.condition_score.expect("score present") >= 90);
        assert_eq!(
            report.tax_calculation.expect("tax bands").band,
            "H"
        );
    }
}
