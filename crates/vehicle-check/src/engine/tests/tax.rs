use super::common::{diesel_snapshot, electric_snapshot, petrol_snapshot};
use crate::engine::tax::{calculate_tax, TaxSchedule};

#[test]
fn electric_vehicles_pay_nothing_regardless_of_co2_data() {
    let mut snapshot = electric_snapshot();
    snapshot.co2_emissions = None;

    let band = calculate_tax(&snapshot, &TaxSchedule::standard()).expect("EV always bands");
    assert_eq!(band.band, "A");
    assert!(band.is_electric);
    assert_eq!(band.first_year_rate, 0);
    assert_eq!(band.annual_rate, 0);
    assert_eq!(band.monthly_total, 0.0);
}

#[test]
fn missing_co2_on_a_combustion_vehicle_yields_no_band() {
    let mut snapshot = petrol_snapshot();
    snapshot.co2_emissions = None;

    assert!(calculate_tax(&snapshot, &TaxSchedule::standard()).is_none());
}

#[test]
fn petrol_at_120_grams_lands_in_band_g() {
    let band = calculate_tax(&petrol_snapshot(), &TaxSchedule::standard()).expect("bands");
    assert_eq!(band.band, "G");
    assert_eq!(band.band_range, "111-130 g/km");
    assert_eq!(band.first_year_rate, 210);
    assert_eq!(band.annual_rate, 190);
    assert_eq!(band.six_month_rate, 99.75);
}

#[test]
fn bracket_edges_are_inclusive() {
    let schedule = TaxSchedule::standard();

    let mut snapshot = petrol_snapshot();
    snapshot.co2_emissions = Some(130);
    assert_eq!(calculate_tax(&snapshot, &schedule).expect("bands").band, "G");

    snapshot.co2_emissions = Some(131);
    assert_eq!(calculate_tax(&snapshot, &schedule).expect("bands").band, "H");

    snapshot.co2_emissions = Some(300);
    let top = calculate_tax(&snapshot, &schedule).expect("bands");
    assert_eq!(top.band, "M");
    assert_eq!(top.first_year_rate, 2_745);
}

#[test]
fn diesel_without_rde2_pays_the_first_year_supplement() {
    let mut snapshot = diesel_snapshot();
    snapshot.co2_emissions = Some(120);
    snapshot.euro_status = Some("Euro 6".to_string());

    let band = calculate_tax(&snapshot, &TaxSchedule::standard()).expect("bands");
    assert!(band.is_diesel);
    assert_eq!(band.band, "G");
    assert_eq!(band.first_year_rate, 250);
}

#[test]
fn rde2_certified_diesel_pays_the_standard_first_year_rate() {
    let mut snapshot = diesel_snapshot();
    snapshot.co2_emissions = Some(120);
    snapshot.euro_status = Some("Euro 6d".to_string());

    let band = calculate_tax(&snapshot, &TaxSchedule::standard()).expect("bands");
    assert!(band.is_diesel);
    assert_eq!(band.first_year_rate, 210);
}

#[test]
fn hybrids_get_the_alternative_fuel_discount() {
    let mut snapshot = petrol_snapshot();
    snapshot.fuel_type = Some("HYBRID ELECTRIC (CLEAN)".to_string());
    snapshot.co2_emissions = Some(95);

    let band = calculate_tax(&snapshot, &TaxSchedule::standard()).expect("bands");
    assert_eq!(band.band, "E");
    assert_eq!(band.annual_rate, 180);
    assert!(!band.is_electric);
}
