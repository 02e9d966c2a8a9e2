//! Reverse-geocoding address extraction.
//!
//! Turns the `address` object of a Nominatim-style reverse-geocoding
//! response into a [`RawLocation`]. Nothing here touches the network; the
//! caller fetches the response and hands over the JSON.

use serde::Deserialize;

use super::types::RawLocation;

/// Address components as returned by reverse geocoders. Unknown keys are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AddressComponents {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub state_district: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city_district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A full reverse-geocoding response; only the address matters here.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: AddressComponents,
}

impl AddressComponents {
    /// First non-blank of `state`, `region`, `province`.
    pub fn region_text(&self) -> Option<&str> {
        first_present(&[&self.state, &self.region, &self.province])
    }

    /// First non-blank of `state_district`, `district`, `county`,
    /// `city_district`, `city`, `town`.
    pub fn sub_region_text(&self) -> Option<&str> {
        first_present(&[
            &self.state_district,
            &self.district,
            &self.county,
            &self.city_district,
            &self.city,
            &self.town,
        ])
    }

    pub fn to_raw_location(&self) -> RawLocation {
        RawLocation {
            region_text: self.region_text().map(str::to_string),
            sub_region_text: self.sub_region_text().map(str::to_string),
        }
    }
}

impl From<&ReverseGeocodeResponse> for RawLocation {
    fn from(resp: &ReverseGeocodeResponse) -> Self {
        resp.address.to_raw_location()
    }
}

/// Parse either a full response (`{"address": {...}}`) or a bare address object.
pub fn raw_location_from_json(value: &serde_json::Value) -> Result<RawLocation, serde_json::Error> {
    let address: AddressComponents = match value.get("address") {
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(value.clone())?,
    };
    Ok(address.to_raw_location())
}

fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}
