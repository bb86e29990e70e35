//! Gateway credentials

use crate::compose::Contributor;
use crate::types::constants::params;
use crate::{PayflowError, Result};
use serde::{Deserialize, Serialize};

/// Gateway login credentials (USER/VENDOR/PARTNER/PWD)
///
/// Contributed first on every wire message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Login user; for single-user accounts the same as `vendor`
    pub user: String,
    /// Merchant vendor id
    pub vendor: String,
    /// Partner id assigned by the reseller (e.g., "PayPal")
    pub partner: String,
    /// Gateway password
    pub pwd: String,
}

impl UserInfo {
    /// Create a credentials block
    pub fn new(
        user: impl Into<String>,
        vendor: impl Into<String>,
        partner: impl Into<String>,
        pwd: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            vendor: vendor.into(),
            partner: partner.into(),
            pwd: pwd.into(),
        }
    }

    /// Check the credential shape before any connection is attempted
    pub fn validate(&self) -> Result<()> {
        if self.user.is_empty() || self.vendor.is_empty() || self.partner.is_empty() {
            return Err(PayflowError::config(
                "User, vendor, and partner are all required",
            ));
        }
        if self.pwd.is_empty() {
            return Err(PayflowError::config("Password is required"));
        }
        Ok(())
    }
}

impl Contributor for UserInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (params::USER, Some(self.user.clone())),
            (params::VENDOR, Some(self.vendor.clone())),
            (params::PARTNER, Some(self.partner.clone())),
            (params::PWD, Some(self.pwd.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_credentials() {
        assert!(UserInfo::new("u", "v", "PayPal", "pw").validate().is_ok());
        assert!(UserInfo::new("", "v", "PayPal", "pw").validate().is_err());
        assert!(UserInfo::new("u", "v", "PayPal", "").validate().is_err());
    }

    #[test]
    fn test_field_table_order() {
        let user = UserInfo::new("u", "v", "PayPal", "pw");
        let names: Vec<_> = user.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            [params::USER, params::VENDOR, params::PARTNER, params::PWD]
        );
    }
}
