//! Invoice and address blocks

use crate::compose::Contributor;
use crate::types::constants::params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billing address block, nested under [`Invoice`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillTo {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Street address (free text; may contain wire delimiter characters)
    pub street: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
}

impl BillTo {
    /// Create an empty billing address
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the last name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the street address
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Set the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the postal code
    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    /// Set the country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Contributor for BillTo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::BILLTOFIRSTNAME, self.first_name.clone()),
            (params::BILLTOLASTNAME, self.last_name.clone()),
            (params::BILLTOSTREET, self.street.clone()),
            (params::BILLTOCITY, self.city.clone()),
            (params::BILLTOSTATE, self.state.clone()),
            (params::BILLTOZIP, self.zip.clone()),
            (params::BILLTOCOUNTRY, self.country.clone()),
            (params::BILLTOPHONE, self.phone.clone()),
            (params::BILLTOEMAIL, self.email.clone()),
        ]
    }
}

/// Shipping address block, nested under [`Invoice`] after [`BillTo`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipTo {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Street address
    pub street: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// Country code
    pub country: Option<String>,
}

impl ShipTo {
    /// Create an empty shipping address
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the last name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the street address
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Set the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the postal code
    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    /// Set the country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

impl Contributor for ShipTo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::SHIPTOFIRSTNAME, self.first_name.clone()),
            (params::SHIPTOLASTNAME, self.last_name.clone()),
            (params::SHIPTOSTREET, self.street.clone()),
            (params::SHIPTOCITY, self.city.clone()),
            (params::SHIPTOSTATE, self.state.clone()),
            (params::SHIPTOZIP, self.zip.clone()),
            (params::SHIPTOCOUNTRY, self.country.clone()),
        ]
    }
}

/// Invoice block: amount, references, comments, and nested addresses.
///
/// Contribution recurses depth-first: the invoice's own fields first, then
/// the billing address, then the shipping address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    /// Transaction amount
    pub amt: Option<Decimal>,
    /// Invoice number
    pub inv_num: Option<String>,
    /// Purchase order number
    pub po_num: Option<String>,
    /// Free-text comment
    pub comment1: Option<String>,
    /// Second free-text comment
    pub comment2: Option<String>,
    /// Billing address
    pub bill_to: Option<BillTo>,
    /// Shipping address
    pub ship_to: Option<ShipTo>,
}

impl Invoice {
    /// Create an empty invoice
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transaction amount
    pub fn with_amt(mut self, amt: Decimal) -> Self {
        self.amt = Some(amt);
        self
    }

    /// Set the invoice number
    pub fn with_inv_num(mut self, inv_num: impl Into<String>) -> Self {
        self.inv_num = Some(inv_num.into());
        self
    }

    /// Set the purchase order number
    pub fn with_po_num(mut self, po_num: impl Into<String>) -> Self {
        self.po_num = Some(po_num.into());
        self
    }

    /// Set the first comment
    pub fn with_comment1(mut self, comment1: impl Into<String>) -> Self {
        self.comment1 = Some(comment1.into());
        self
    }

    /// Set the second comment
    pub fn with_comment2(mut self, comment2: impl Into<String>) -> Self {
        self.comment2 = Some(comment2.into());
        self
    }

    /// Attach a billing address
    pub fn with_bill_to(mut self, bill_to: BillTo) -> Self {
        self.bill_to = Some(bill_to);
        self
    }

    /// Attach a shipping address
    pub fn with_ship_to(mut self, ship_to: ShipTo) -> Self {
        self.ship_to = Some(ship_to);
        self
    }
}

impl Contributor for Invoice {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::AMT, self.amt.map(|a| a.to_string())),
            (params::INVNUM, self.inv_num.clone()),
            (params::PONUM, self.po_num.clone()),
            (params::COMMENT1, self.comment1.clone()),
            (params::COMMENT2, self.comment2.clone()),
        ]
    }

    fn children(&self) -> Vec<&dyn Contributor> {
        let mut children: Vec<&dyn Contributor> = Vec::new();
        if let Some(bill_to) = &self.bill_to {
            children.push(bill_to);
        }
        if let Some(ship_to) = &self.ship_to {
            children.push(ship_to);
        }
        children
    }
}
