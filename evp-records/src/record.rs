use crate::error::RecordError;
use evp_utils::dates::is_plausible_model_year;
use serde::{Deserialize, Serialize};

/// Keyword identifying battery-electric vehicles in the type text.
pub const BATTERY_ELECTRIC_KEYWORD: &str = "Battery Electric";

/// Keyword identifying plug-in hybrids in the type text.
pub const PLUG_IN_HYBRID_KEYWORD: &str = "Plug-in Hybrid";

/// Broad propulsion category derived from the free-text vehicle type.
///
/// Upstream labels vary ("Battery Electric Vehicle (BEV)", "Plug-in Hybrid
/// Electric Vehicle (PHEV)", ...), so classification is by keyword rather
/// than by exact label.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Bev,
    Phev,
    Other,
}

impl VehicleKind {
    /// Classify a vehicle type text. Battery-electric wins if both keywords appear.
    pub fn classify(vehicle_type: &str) -> Self {
        if vehicle_type.contains(BATTERY_ELECTRIC_KEYWORD) {
            VehicleKind::Bev
        } else if vehicle_type.contains(PLUG_IN_HYBRID_KEYWORD) {
            VehicleKind::Phev
        } else {
            VehicleKind::Other
        }
    }
}

/// One registered electric vehicle.
///
/// Records are read-only once loaded. The same physical vehicle (VIN) can
/// appear on several rows, one per registration.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// First 10 characters of the VIN
    pub vin: String,
    /// Department of Licensing registration identifier
    pub dol_vehicle_id: String,
    pub county: String,
    pub city: String,
    /// Two-letter state code
    pub state: String,
    pub model_year: i32,
    pub make: String,
    pub model: String,
    pub electric_vehicle_type: String,
    /// Electric range in miles; 0 or negative means "not reported"
    pub electric_range: i32,
}

impl VehicleRecord {
    /// The electric range if it was actually reported.
    pub fn reported_range(&self) -> Option<u32> {
        u32::try_from(self.electric_range).ok().filter(|r| *r > 0)
    }

    pub fn kind(&self) -> VehicleKind {
        VehicleKind::classify(&self.electric_vehicle_type)
    }
}

/// A registration row exactly as it appears in the source, every field as text.
///
/// Header names follow the Washington State "Electric Vehicle Population
/// Data" export; camelCase aliases accept the JSON-style names. Columns not
/// listed here (postal code, utility, census tract, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawVehicleRow {
    #[serde(rename = "VIN (1-10)", alias = "VIN", alias = "vin", default)]
    pub vin: String,
    #[serde(rename = "DOL Vehicle ID", alias = "dolVehicleId", default)]
    pub dol_vehicle_id: String,
    #[serde(rename = "County", alias = "county", default)]
    pub county: String,
    #[serde(rename = "City", alias = "city", default)]
    pub city: String,
    #[serde(rename = "State", alias = "state", default)]
    pub state: String,
    #[serde(rename = "Model Year", alias = "modelYear", default)]
    pub model_year: String,
    #[serde(rename = "Make", alias = "make", default)]
    pub make: String,
    #[serde(rename = "Model", alias = "model", default)]
    pub model: String,
    #[serde(
        rename = "Electric Vehicle Type",
        alias = "electricVehicleType",
        default
    )]
    pub electric_vehicle_type: String,
    #[serde(rename = "Electric Range", alias = "electricRange", default)]
    pub electric_range: String,
}

/// Parse a range cell. Anything unparseable or not representable as whole
/// miles is "not reported" (0), never an error.
fn parse_range(cell: &str) -> i32 {
    let trimmed = cell.trim();
    if let Ok(miles) = trimmed.parse::<i32>() {
        return miles;
    }
    match trimmed.parse::<f64>().map(f64::round) {
        Ok(miles) if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&miles) => miles as i32,
        _ => 0,
    }
}

impl TryFrom<RawVehicleRow> for VehicleRecord {
    type Error = RecordError;

    fn try_from(row: RawVehicleRow) -> Result<Self, Self::Error> {
        let year_text = row.model_year.trim();
        if year_text.is_empty() {
            return Err(RecordError::MissingModelYear);
        }
        let model_year = year_text
            .parse::<i32>()
            .map_err(|_| RecordError::ModelYearParse(year_text.to_string()))?;
        if !is_plausible_model_year(model_year) {
            return Err(RecordError::ImplausibleModelYear(model_year));
        }

        let electric_vehicle_type = row.electric_vehicle_type.trim().to_string();
        if electric_vehicle_type.is_empty() {
            return Err(RecordError::MissingVehicleType);
        }

        Ok(VehicleRecord {
            vin: row.vin.trim().to_string(),
            dol_vehicle_id: row.dol_vehicle_id.trim().to_string(),
            county: row.county.trim().to_string(),
            city: row.city.trim().to_string(),
            state: row.state.trim().to_string(),
            model_year,
            make: row.make.trim().to_string(),
            model: row.model.trim().to_string(),
            electric_vehicle_type,
            electric_range: parse_range(&row.electric_range),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawVehicleRow {
        RawVehicleRow {
            vin: "5YJ3E1EB4L".to_string(),
            dol_vehicle_id: "125701579".to_string(),
            county: "King".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            model_year: "2020".to_string(),
            make: "TESLA".to_string(),
            model: "MODEL 3".to_string(),
            electric_vehicle_type: "Battery Electric Vehicle (BEV)".to_string(),
            electric_range: "308".to_string(),
        }
    }

    #[test]
    fn test_classify_by_keyword() {
        assert_eq!(
            VehicleKind::classify("Battery Electric Vehicle (BEV)"),
            VehicleKind::Bev
        );
        assert_eq!(
            VehicleKind::classify("Plug-in Hybrid Electric Vehicle (PHEV)"),
            VehicleKind::Phev
        );
        assert_eq!(VehicleKind::classify("BEV"), VehicleKind::Other);
        assert_eq!(
            VehicleKind::classify("Hydrogen Fuel Cell Vehicle"),
            VehicleKind::Other
        );
    }

    #[test]
    fn test_valid_row_converts() {
        let record: VehicleRecord = raw_row().try_into().unwrap();
        assert_eq!(record.model_year, 2020);
        assert_eq!(record.electric_range, 308);
        assert_eq!(record.reported_range(), Some(308));
        assert_eq!(record.kind(), VehicleKind::Bev);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut row = raw_row();
        row.city = "  Seattle ".to_string();
        row.model_year = " 2020 ".to_string();
        let record: VehicleRecord = row.try_into().unwrap();
        assert_eq!(record.city, "Seattle");
        assert_eq!(record.model_year, 2020);
    }

    #[test]
    fn test_unparseable_range_is_unknown() {
        for cell in ["", "n/a", "NaN", "---"] {
            let mut row = raw_row();
            row.electric_range = cell.to_string();
            let record: VehicleRecord = row.try_into().unwrap();
            assert_eq!(record.electric_range, 0, "cell {cell:?}");
            assert_eq!(record.reported_range(), None);
        }
    }

    #[test]
    fn test_fractional_range_rounds() {
        let mut row = raw_row();
        row.electric_range = "249.6".to_string();
        let record: VehicleRecord = row.try_into().unwrap();
        assert_eq!(record.electric_range, 250);
    }

    #[test]
    fn test_out_of_range_range_is_unknown() {
        for cell in ["1e12", "-1e12", "inf", "3000000000"] {
            let mut row = raw_row();
            row.electric_range = cell.to_string();
            let record: VehicleRecord = row.try_into().unwrap();
            assert_eq!(record.electric_range, 0, "cell {cell:?}");
            assert_eq!(record.reported_range(), None);
        }
    }

    #[test]
    fn test_negative_range_is_not_reported() {
        let mut row = raw_row();
        row.electric_range = "-1".to_string();
        let record: VehicleRecord = row.try_into().unwrap();
        assert_eq!(record.electric_range, -1);
        assert_eq!(record.reported_range(), None);
    }

    #[test]
    fn test_bad_model_year_rejected() {
        let mut row = raw_row();
        row.model_year = "N/A".to_string();
        let err = VehicleRecord::try_from(row).unwrap_err();
        assert_eq!(err, RecordError::ModelYearParse("N/A".to_string()));

        let mut row = raw_row();
        row.model_year = String::new();
        assert_eq!(
            VehicleRecord::try_from(row).unwrap_err(),
            RecordError::MissingModelYear
        );

        let mut row = raw_row();
        row.model_year = "1492".to_string();
        assert_eq!(
            VehicleRecord::try_from(row).unwrap_err(),
            RecordError::ImplausibleModelYear(1492)
        );
    }

    #[test]
    fn test_missing_type_rejected() {
        let mut row = raw_row();
        row.electric_vehicle_type = "   ".to_string();
        assert_eq!(
            VehicleRecord::try_from(row).unwrap_err(),
            RecordError::MissingVehicleType
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record: VehicleRecord = raw_row().try_into().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["modelYear"], 2020);
        assert_eq!(json["electricVehicleType"], "Battery Electric Vehicle (BEV)");
        assert_eq!(json["dolVehicleId"], "125701579");
    }
}
