//! Customer details entered on the first checkout step.

use serde::{Deserialize, Serialize};

/// Free-text fields from the details form.
///
/// Only presence is checked. Phone numbers and addresses are taken as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub address: String,
    /// Optional landmark to help the rider.
    #[serde(default)]
    pub landmark: String,
    /// Delivery area form value (e.g., "montalban").
    #[serde(default)]
    pub delivery_area: String,
    /// Requested delivery time, as typed.
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default)]
    pub notes: String,
}

impl CustomerDetails {
    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required = [
            ("name", &self.name),
            ("contact number", &self.contact_number),
            ("address", &self.address),
            ("delivery area", &self.delivery_area),
            ("delivery time", &self.delivery_time),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    /// All five required fields are filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
