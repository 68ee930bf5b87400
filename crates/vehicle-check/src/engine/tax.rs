use crate::engine::domain::{FuelCategory, VehicleSnapshot};
use serde::Serialize;

/// One CO2 bracket of the first-registration VED table.
#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    pub max_co2: u32,
    pub band: &'static str,
    pub range: &'static str,
    pub first_year_rate: u32,
    /// First-year rate for diesels that do not meet RDE2.
    pub diesel_first_year_rate: u32,
}

/// Static VED rate tables, 2025/26, cars registered after 1 April 2017.
#[derive(Debug, Clone)]
pub struct TaxSchedule {
    brackets: &'static [TaxBracket],
    pub standard_annual_rate: u32,
    pub six_month_rate: f64,
    pub monthly_total: f64,
    pub alternative_fuel_discount: u32,
}

const STANDARD_BRACKETS: &[TaxBracket] = &[
    TaxBracket { max_co2: 0, band: "A", range: "0 g/km", first_year_rate: 0, diesel_first_year_rate: 0 },
    TaxBracket { max_co2: 50, band: "B", range: "1-50 g/km", first_year_rate: 10, diesel_first_year_rate: 30 },
    TaxBracket { max_co2: 75, band: "C", range: "51-75 g/km", first_year_rate: 30, diesel_first_year_rate: 135 },
    TaxBracket { max_co2: 90, band: "D", range: "76-90 g/km", first_year_rate: 135, diesel_first_year_rate: 165 },
    TaxBracket { max_co2: 100, band: "E", range: "91-100 g/km", first_year_rate: 165, diesel_first_year_rate: 185 },
    TaxBracket { max_co2: 110, band: "F", range: "101-110 g/km", first_year_rate: 185, diesel_first_year_rate: 210 },
    TaxBracket { max_co2: 130, band: "G", range: "111-130 g/km", first_year_rate: 210, diesel_first_year_rate: 250 },
    TaxBracket { max_co2: 150, band: "H", range: "131-150 g/km", first_year_rate: 250, diesel_first_year_rate: 295 },
    TaxBracket { max_co2: 170, band: "I", range: "151-170 g/km", first_year_rate: 295, diesel_first_year_rate: 350 },
    TaxBracket { max_co2: 190, band: "J", range: "171-190 g/km", first_year_rate: 350, diesel_first_year_rate: 395 },
    TaxBracket { max_co2: 225, band: "K", range: "191-225 g/km", first_year_rate: 395, diesel_first_year_rate: 650 },
    TaxBracket { max_co2: 255, band: "L", range: "226-255 g/km", first_year_rate: 650, diesel_first_year_rate: 2745 },
    TaxBracket { max_co2: u32::MAX, band: "M", range: "Over 255 g/km", first_year_rate: 2745, diesel_first_year_rate: 2745 },
];

impl TaxSchedule {
    pub fn standard() -> Self {
        Self {
            brackets: STANDARD_BRACKETS,
            standard_annual_rate: 190,
            six_month_rate: 99.75,
            monthly_total: 199.50,
            alternative_fuel_discount: 10,
        }
    }

    fn bracket_for(&self, co2: u32) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|bracket| co2 <= bracket.max_co2)
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }
}

/// Derived road-tax banding for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBand {
    pub band: &'static str,
    pub band_range: &'static str,
    pub co2_emissions: u32,
    pub fuel_type: Option<String>,
    pub first_year_rate: u32,
    pub annual_rate: u32,
    pub six_month_rate: f64,
    pub monthly_total: f64,
    pub is_electric: bool,
    pub is_diesel: bool,
}

/// Derive the applicable band and rates. Electric vehicles land in the
/// zero-rate band regardless of the CO2 field; otherwise missing CO2 data is
/// a rule-evaluation gap and yields `None`, never the cheapest band.
pub fn calculate_tax(snapshot: &VehicleSnapshot, schedule: &TaxSchedule) -> Option<TaxBand> {
    let fuel_type = snapshot
        .fuel_type
        .as_deref()
        .map(|fuel| fuel.trim().to_ascii_uppercase());
    let fuel_category = snapshot.fuel_category();

    if fuel_category == FuelCategory::ZeroEmission {
        return Some(TaxBand {
            band: "A",
            band_range: "0 g/km",
            co2_emissions: 0,
            fuel_type,
            first_year_rate: 0,
            annual_rate: 0,
            six_month_rate: 0.0,
            monthly_total: 0.0,
            is_electric: true,
            is_diesel: false,
        });
    }

    let co2 = snapshot.co2_emissions?;
    let bracket = schedule.bracket_for(co2);
    let is_diesel = fuel_category == FuelCategory::Diesel;

    // The diesel supplement applies to the first year only, and only when
    // RDE2 is not met. With no RDE data, a euro status mentioning "6d" is
    // the closest available signal that the vehicle is RDE2-certified.
    let rde2_met = snapshot
        .euro_status
        .as_deref()
        .map(|status| status.to_ascii_lowercase().contains("6d"))
        .unwrap_or(false);
    let first_year_rate = if is_diesel && !rde2_met {
        bracket.diesel_first_year_rate
    } else {
        bracket.first_year_rate
    };

    let alternative_fuel = fuel_type
        .as_deref()
        .map(|fuel| {
            fuel.contains("HYBRID")
                || fuel.contains("PLUG-IN")
                || matches!(fuel, "GAS" | "LPG" | "CNG")
        })
        .unwrap_or(false);
    let annual_rate = if alternative_fuel {
        schedule.standard_annual_rate - schedule.alternative_fuel_discount
    } else {
        schedule.standard_annual_rate
    };

    Some(TaxBand {
        band: bracket.band,
        band_range: bracket.range,
        co2_emissions: co2,
        fuel_type,
        first_year_rate,
        annual_rate,
        six_month_rate: schedule.six_month_rate,
        monthly_total: schedule.monthly_total,
        is_electric: false,
        is_diesel,
    })
}
