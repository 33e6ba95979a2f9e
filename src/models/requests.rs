use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ParseError;
use crate::models::domain::{Location, Property, PropertyType};

/// Numeric field as sent by the listing form: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Finite numeric value, or `None` for blank or unparseable input
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// Loosely-typed listing record as supplied by the surrounding application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    #[serde(rename = "listingName", default)]
    pub listing_name: Option<String>,
    #[serde(rename = "propertyType", default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<RawNumber>,
    #[serde(default)]
    pub bathrooms: Option<RawNumber>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub size: Option<RawNumber>,
    #[serde(rename = "amenityCount", default)]
    pub amenity_count: Option<RawNumber>,
    #[serde(default)]
    pub age: Option<RawNumber>,
    #[serde(rename = "parkingSpots", default)]
    pub parking_spots: Option<RawNumber>,
    #[serde(default)]
    pub condition: Option<RawNumber>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub canton: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

impl RawProperty {
    /// Coerce every field into a strongly-typed `Property`
    pub fn parse(&self) -> Result<Property, ParseError> {
        let property_type = required_text("propertyType", &self.property_type)?.parse::<PropertyType>()?;

        let condition = required_number("condition", &self.condition)?;
        if !(1.0..=4.0).contains(&condition) || condition.fract() != 0.0 {
            return Err(ParseError::ConditionOutOfRange(condition));
        }

        Ok(Property {
            listing_name: required_text("listingName", &self.listing_name)?,
            property_type,
            bedrooms: required_count("bedrooms", &self.bedrooms)?,
            bathrooms: required_number("bathrooms", &self.bathrooms)?,
            price: required_number("price", &self.price)?,
            size: required_number("size", &self.size)?,
            amenity_count: required_count("amenityCount", &self.amenity_count)?,
            age: required_count("age", &self.age)?,
            parking_spots: required_count("parkingSpots", &self.parking_spots)?,
            condition: condition as u8,
            location: Location {
                province: required_text("province", &self.province)?,
                canton: required_text("canton", &self.canton)?,
                district: required_text("district", &self.district)?,
            },
        })
    }
}

impl From<&Property> for RawProperty {
    fn from(property: &Property) -> Self {
        Self {
            listing_name: Some(property.listing_name.clone()),
            property_type: Some(property.property_type.to_string()),
            bedrooms: Some(RawNumber::Number(property.bedrooms as f64)),
            bathrooms: Some(RawNumber::Number(property.bathrooms)),
            price: Some(RawNumber::Number(property.price)),
            size: Some(RawNumber::Number(property.size)),
            amenity_count: Some(RawNumber::Number(property.amenity_count as f64)),
            age: Some(RawNumber::Number(property.age as f64)),
            parking_spots: Some(RawNumber::Number(property.parking_spots as f64)),
            condition: Some(RawNumber::Number(property.condition as f64)),
            province: Some(property.location.province.clone()),
            canton: Some(property.location.canton.clone()),
            district: Some(property.location.district.clone()),
        }
    }
}

fn required_text(field: &'static str, value: &Option<String>) -> Result<String, ParseError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ParseError::MissingField(field)),
    }
}

fn required_number(field: &'static str, value: &Option<RawNumber>) -> Result<f64, ParseError> {
    let raw = match value {
        None => return Err(ParseError::MissingField(field)),
        Some(RawNumber::Text(s)) if s.trim().is_empty() => {
            return Err(ParseError::MissingField(field))
        }
        Some(raw) => raw,
    };

    let number = raw.as_f64().ok_or_else(|| ParseError::InvalidNumber {
        field,
        value: match raw {
            RawNumber::Number(n) => n.to_string(),
            RawNumber::Text(s) => s.clone(),
        },
    })?;

    if number < 0.0 {
        return Err(ParseError::NegativeValue { field, value: number });
    }
    Ok(number)
}

fn required_count(field: &'static str, value: &Option<RawNumber>) -> Result<u32, ParseError> {
    let number = required_number(field, value)?;
    if number.fract() != 0.0 || number > u32::MAX as f64 {
        return Err(ParseError::InvalidNumber {
            field,
            value: number.to_string(),
        });
    }
    Ok(number as u32)
}

/// Request to score comparables against a base property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreComparablesRequest {
    pub base: RawProperty,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub comparables: Vec<RawProperty>,
}

/// Request for price-per-area statistics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PricingRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub comparables: Vec<RawProperty>,
}
