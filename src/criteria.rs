use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PRICE_STEP: u32 = 10_000;
pub const BEDROOMS_MAX: u32 = 10;
pub const POSTCODE_MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Any,
    House,
    Flat,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [Self::Any, Self::House, Self::Flat];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::House => "house",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Any,
    Sale,
    Rent,
}

impl ListingType {
    pub const ALL: [ListingType; 3] = [Self::Any, Self::Sale, Self::Rent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter values collected by the search form.
///
/// Serializes with the field names the search executor expects: unset
/// numbers become `null` and unset dates become `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    /// GBP, a multiple of [`PRICE_STEP`] when set
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_bedrooms: Option<u32>,
    pub max_bedrooms: Option<u32>,
    #[serde(with = "iso_date", default)]
    pub date_from: Option<NaiveDate>,
    #[serde(with = "iso_date", default)]
    pub date_to: Option<NaiveDate>,
    pub postcode: String,
}

impl SearchCriteria {
    /// One-line human readable description, e.g. `flat to rent, £200,000 – £400,000, in BR1`.
    pub fn summary(&self) -> String {
        let mut parts = vec![];

        let what = match self.property_type {
            PropertyType::Any => "any property",
            other => other.as_str(),
        };
        let what = match self.listing_type {
            ListingType::Any => what.to_string(),
            ListingType::Sale => format!("{what} for sale"),
            ListingType::Rent => format!("{what} to rent"),
        };
        parts.push(what);

        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => parts.push(format!("{} – {}", format_gbp(min), format_gbp(max))),
            (Some(min), None) => parts.push(format!("from {}", format_gbp(min))),
            (None, Some(max)) => parts.push(format!("up to {}", format_gbp(max))),
            (None, None) => {}
        }

        match (self.min_bedrooms, self.max_bedrooms) {
            (Some(min), Some(max)) => parts.push(format!("{min}–{max} beds")),
            (Some(min), None) => parts.push(format!("{min}+ beds")),
            (None, Some(max)) => parts.push(format!("up to {max} beds")),
            (None, None) => {}
        }

        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => parts.push(format!("added {from} – {to}")),
            (Some(from), None) => parts.push(format!("added since {from}")),
            (None, Some(to)) => parts.push(format!("added until {to}")),
            (None, None) => {}
        }

        if !self.postcode.is_empty() {
            parts.push(format!("in {}", self.postcode));
        }

        parts.join(", ")
    }
}

/// Identifies one of the form's nine fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PropertyType,
    ListingType,
    MinPrice,
    MaxPrice,
    MinBedrooms,
    MaxBedrooms,
    DateFrom,
    DateTo,
    Postcode,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Self::PropertyType,
        Self::ListingType,
        Self::MinPrice,
        Self::MaxPrice,
        Self::MinBedrooms,
        Self::MaxBedrooms,
        Self::DateFrom,
        Self::DateTo,
        Self::Postcode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PropertyType => "Property Type",
            Self::ListingType => "Listing Type",
            Self::MinPrice => "Min Price (£)",
            Self::MaxPrice => "Max Price (£)",
            Self::MinBedrooms => "Min Bedrooms",
            Self::MaxBedrooms => "Max Bedrooms",
            Self::DateFrom => "Date Added From",
            Self::DateTo => "Date Added To",
            Self::Postcode => "Postcode Area",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::PropertyType => "Select property type",
            Self::ListingType => "Select listing type",
            Self::MinPrice => "Min price",
            Self::MaxPrice => "Max price",
            Self::MinBedrooms => "Min beds",
            Self::MaxBedrooms => "Max beds",
            Self::DateFrom | Self::DateTo => "YYYY-MM-DD",
            Self::Postcode => "e.g. BR1, NW1, SW19",
        }
    }
}

/// Formats whole pounds with thousands separators, e.g. `£1,250,000`.
pub fn format_gbp(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('£');
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.collect_str(&date.format(FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
