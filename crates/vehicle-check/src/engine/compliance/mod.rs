mod zones;

pub use zones::{ZoneRule, ZoneTable, ZoneType};

use crate::engine::domain::{FuelCategory, VehicleSnapshot};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Exempt,
    Compliant,
    NonCompliant,
    Unknown,
}

/// Per-zone verdict for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneComplianceResult {
    pub zone_id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub compliant: bool,
    pub charge: String,
    pub cars_affected: bool,
    pub zone_type: ZoneType,
}

/// Aggregate compliance across every UK emission zone. `compliant` is a
/// tri-state: `None` only when the euro standard could not be determined at
/// all, never a silent guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCompliance {
    pub compliant: Option<bool>,
    pub status: ComplianceStatus,
    pub reason: String,
    pub euro_standard: Option<u8>,
    pub euro_inferred: Option<bool>,
    pub fuel_type: Option<String>,
    pub daily_charge: Option<String>,
    pub zones: Vec<ZoneComplianceResult>,
    pub total_zones: usize,
    pub compliant_zones: usize,
    pub non_compliant_zones: usize,
    pub charges_apply_zones: usize,
}

/// Evaluate a snapshot against the zone table.
///
/// Petrol complies at Euro 4+, diesel at Euro 6+, zero-emission vehicles
/// everywhere. A missing euro status is inferred from year of manufacture
/// and fuel type when possible, and the inference is flagged.
pub fn evaluate_compliance(snapshot: &VehicleSnapshot, table: &ZoneTable) -> ZoneCompliance {
    let fuel_category = snapshot.fuel_category();
    let fuel_type = snapshot
        .fuel_type
        .as_deref()
        .map(|fuel| fuel.trim().to_ascii_uppercase());

    if fuel_category == FuelCategory::ZeroEmission {
        return exempt_result(table, fuel_type);
    }

    let (euro_standard, euro_inferred) =
        match resolve_euro_standard(snapshot, fuel_category) {
            Some(resolved) => resolved,
            None => {
                return ZoneCompliance {
                    compliant: None,
                    status: ComplianceStatus::Unknown,
                    reason: "Euro standard not available and could not be inferred".to_string(),
                    euro_standard: None,
                    euro_inferred: None,
                    fuel_type,
                    daily_charge: None,
                    zones: Vec::new(),
                    total_zones: table.len(),
                    compliant_zones: 0,
                    non_compliant_zones: 0,
                    charges_apply_zones: 0,
                };
            }
        };

    let mut zones = Vec::with_capacity(table.len());
    let mut charged: Vec<&ZoneRule> = Vec::new();

    for zone in table.zones() {
        let compliant = zone_compliant(zone, fuel_category, euro_standard);
        let charge = if !compliant && zone.cars_affected {
            charged.push(zone);
            zone.charge.to_string()
        } else {
            "No charge".to_string()
        };

        zones.push(ZoneComplianceResult {
            zone_id: zone.id,
            name: zone.name,
            region: zone.region,
            compliant,
            charge,
            cars_affected: zone.cars_affected,
            zone_type: zone.zone_type,
        });
    }

    let car_zones: Vec<&ZoneComplianceResult> =
        zones.iter().filter(|zone| zone.cars_affected).collect();
    let all_compliant = car_zones.iter().all(|zone| zone.compliant);
    let non_compliant_zones = car_zones.iter().filter(|zone| !zone.compliant).count();
    let compliant_zones = zones.iter().filter(|zone| zone.compliant).count();

    let mut reason = format!(
        "{} vehicle with Euro {}",
        fuel_label(&fuel_type),
        euro_standard
    );
    if euro_inferred {
        reason.push_str(" (estimated from year of manufacture)");
    }
    if all_compliant {
        reason.push_str(&format!(
            " meets emission requirements for all {} zones affecting cars",
            car_zones.len()
        ));
    } else {
        reason.push_str(&format!(
            " is non-compliant in {} zone{}",
            non_compliant_zones,
            if non_compliant_zones == 1 { "" } else { "s" }
        ));
    }

    ZoneCompliance {
        compliant: Some(all_compliant),
        status: if all_compliant {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        },
        reason,
        euro_standard: Some(euro_standard),
        euro_inferred: Some(euro_inferred),
        fuel_type,
        daily_charge: summarise_charges(&charged),
        total_zones: table.len(),
        compliant_zones,
        non_compliant_zones,
        charges_apply_zones: charged.len(),
        zones,
    }
}

fn exempt_result(table: &ZoneTable, fuel_type: Option<String>) -> ZoneCompliance {
    let zones: Vec<ZoneComplianceResult> = table
        .zones()
        .iter()
        .map(|zone| ZoneComplianceResult {
            zone_id: zone.id,
            name: zone.name,
            region: zone.region,
            compliant: true,
            charge: "Exempt".to_string(),
            cars_affected: zone.cars_affected,
            zone_type: zone.zone_type,
        })
        .collect();

    ZoneCompliance {
        compliant: Some(true),
        status: ComplianceStatus::Exempt,
        reason: format!(
            "{} vehicles are exempt from all UK emission zones",
            fuel_label(&fuel_type)
        ),
        euro_standard: None,
        euro_inferred: None,
        fuel_type,
        daily_charge: None,
        total_zones: table.len(),
        compliant_zones: zones.len(),
        non_compliant_zones: 0,
        charges_apply_zones: 0,
        zones,
    }
}

fn zone_compliant(zone: &ZoneRule, fuel_category: FuelCategory, euro_standard: u8) -> bool {
    if !zone.cars_affected {
        return true;
    }

    let min_euro = match fuel_category {
        FuelCategory::Diesel => zone.diesel_min_euro,
        // Petrol, other, and unknown combustion types use the petrol gate.
        _ => zone.petrol_min_euro,
    };

    match min_euro {
        Some(min_euro) => euro_standard >= min_euro,
        // No euro path into this zone (Oxford ZEZ): combustion never complies.
        None => false,
    }
}

fn resolve_euro_standard(
    snapshot: &VehicleSnapshot,
    fuel_category: FuelCategory,
) -> Option<(u8, bool)> {
    if let Some(explicit) = snapshot.euro_status.as_deref().and_then(parse_euro_number) {
        return Some((explicit, false));
    }

    let year = snapshot.year_of_manufacture?;
    Some((infer_euro_from_year(year, fuel_category), true))
}

/// Extract the euro tier from strings like "Euro 6", "EURO6D", "Euro 4+".
pub(crate) fn parse_euro_number(euro_status: &str) -> Option<u8> {
    euro_status
        .chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .map(|digit| digit as u8)
}

/// Year-of-manufacture approximation of the euro tier. A heuristic, not a
/// regulatory fact; callers mark the result as inferred.
pub(crate) fn infer_euro_from_year(year: i32, fuel_category: FuelCategory) -> u8 {
    if fuel_category == FuelCategory::Diesel {
        match year {
            y if y >= 2015 => 6,
            y if y >= 2009 => 5,
            y if y >= 2006 => 4,
            y if y >= 2001 => 3,
            _ => 2,
        }
    } else {
        match year {
            y if y >= 2011 => 6,
            y if y >= 2006 => 5,
            y if y >= 2001 => 4,
            y if y >= 1997 => 3,
            _ => 2,
        }
    }
}

fn summarise_charges(charged: &[&ZoneRule]) -> Option<String> {
    if charged.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    if let Some(highest) = charged
        .iter()
        .filter(|zone| zone.zone_type == ZoneType::DailyCharge)
        .max_by(|a, b| a.charge_amount.total_cmp(&b.charge_amount))
    {
        parts.push(format!("£{:.2}/day ({})", highest.charge_amount, highest.name));
    }
    if charged
        .iter()
        .any(|zone| zone.zone_type == ZoneType::Penalty)
    {
        parts.push("£60+ penalty (Scottish LEZs)".to_string());
    }

    Some(parts.join(" · "))
}

fn fuel_label(fuel_type: &Option<String>) -> String {
    match fuel_type.as_deref() {
        Some(fuel) if !fuel.is_empty() => {
            let lowered = fuel.to_lowercase();
            let mut chars = lowered.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => "Unknown".to_string(),
            }
        }
        _ => "Unknown".to_string(),
    }
}
