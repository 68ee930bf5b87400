use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    DailyCharge,
    Penalty,
}

/// One low-emission zone and its compliance predicate. A `None` euro minimum
/// means no euro standard exempts combustion vehicles (Oxford ZEZ).
#[derive(Debug, Clone, Copy)]
pub struct ZoneRule {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub zone_type: ZoneType,
    pub cars_affected: bool,
    pub charge: &'static str,
    pub charge_amount: f64,
    pub petrol_min_euro: Option<u8>,
    pub diesel_min_euro: Option<u8>,
}

/// All active UK emission zones, 2025/26. Read-only after process start.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: &'static [ZoneRule],
}

impl ZoneTable {
    pub fn standard() -> Self {
        Self {
            zones: STANDARD_ZONES,
        }
    }

    pub fn zones(&self) -> &[ZoneRule] {
        self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

const SCOTTISH_PENALTY: &str = "£60 first offence (doubles, max £480)";
const CARS_EXEMPT: &str = "N/A (cars exempt)";

const STANDARD_ZONES: &[ZoneRule] = &[
    ZoneRule {
        id: "london_ulez",
        name: "London ULEZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: true,
        charge: "£12.50/day",
        charge_amount: 12.50,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "london_lez",
        name: "London LEZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "birmingham_caz",
        name: "Birmingham CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: true,
        charge: "£8/day",
        charge_amount: 8.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "bristol_caz",
        name: "Bristol CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: true,
        charge: "£9/day",
        charge_amount: 9.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "bath_caz",
        name: "Bath CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "bradford_caz",
        name: "Bradford CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "portsmouth_caz",
        name: "Portsmouth CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "sheffield_caz",
        name: "Sheffield CAZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "tyneside_caz",
        name: "Tyneside CAZ (Newcastle/Gateshead)",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: false,
        charge: CARS_EXEMPT,
        charge_amount: 0.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "glasgow_lez",
        name: "Glasgow LEZ",
        region: "Scotland",
        zone_type: ZoneType::Penalty,
        cars_affected: true,
        charge: SCOTTISH_PENALTY,
        charge_amount: 60.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "edinburgh_lez",
        name: "Edinburgh LEZ",
        region: "Scotland",
        zone_type: ZoneType::Penalty,
        cars_affected: true,
        charge: SCOTTISH_PENALTY,
        charge_amount: 60.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "aberdeen_lez",
        name: "Aberdeen LEZ",
        region: "Scotland",
        zone_type: ZoneType::Penalty,
        cars_affected: true,
        charge: SCOTTISH_PENALTY,
        charge_amount: 60.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    ZoneRule {
        id: "dundee_lez",
        name: "Dundee LEZ",
        region: "Scotland",
        zone_type: ZoneType::Penalty,
        cars_affected: true,
        charge: SCOTTISH_PENALTY,
        charge_amount: 60.0,
        petrol_min_euro: Some(4),
        diesel_min_euro: Some(6),
    },
    // Only zero-emission vehicles escape the Oxford charge.
    ZoneRule {
        id: "oxford_zez",
        name: "Oxford ZEZ",
        region: "England",
        zone_type: ZoneType::DailyCharge,
        cars_affected: true,
        charge: "£4-£10/day (all non-EVs)",
        charge_amount: 4.0,
        petrol_min_euro: None,
        diesel_min_euro: None,
    },
];
