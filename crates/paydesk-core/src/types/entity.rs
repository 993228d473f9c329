//! Entity kinds served by the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::record::EntityFieldMap;

/// The kinds of record the back-office can browse.
///
/// # Example
///
/// ```
/// use paydesk_core::EntityKind;
///
/// let kind: EntityKind = "transfers".parse().unwrap();
/// assert_eq!(kind, EntityKind::Transfer);
/// assert_eq!(kind.segment(), "transfers");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Bank configurations.
    Bank,
    /// Member records.
    Member,
    /// Fund transfers.
    Transfer,
    /// QR payments.
    QrPayment,
}

impl EntityKind {
    /// All entity kinds, in menu order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Bank,
        EntityKind::Member,
        EntityKind::Transfer,
        EntityKind::QrPayment,
    ];

    /// The collection path segment, shared by the API and snapshot files.
    pub fn segment(&self) -> &'static str {
        match self {
            EntityKind::Bank => "banks",
            EntityKind::Member => "members",
            EntityKind::Transfer => "transfers",
            EntityKind::QrPayment => "qr-payments",
        }
    }

    /// Singular name used in file names and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bank => "bank",
            EntityKind::Member => "member",
            EntityKind::Transfer => "transfer",
            EntityKind::QrPayment => "qr-payment",
        }
    }

    /// The built-in field roles for this entity.
    pub fn field_map(&self) -> EntityFieldMap {
        match self {
            EntityKind::Bank => EntityFieldMap {
                id: "bankCode".to_string(),
                status: Some("status".to_string()),
                bank: Some("bankCode".to_string()),
                timestamp: "createdAt".to_string(),
                amount: None,
                search: vec![
                    "bankCode".to_string(),
                    "bankName".to_string(),
                    "accountName".to_string(),
                ],
            },
            EntityKind::Member => EntityFieldMap {
                id: "id".to_string(),
                status: Some("status".to_string()),
                bank: Some("bankCode".to_string()),
                timestamp: "createdAt".to_string(),
                amount: None,
                search: vec![
                    "id".to_string(),
                    "memberCode".to_string(),
                    "name".to_string(),
                    "email".to_string(),
                    "phone".to_string(),
                ],
            },
            EntityKind::Transfer => EntityFieldMap {
                id: "id".to_string(),
                status: Some("status".to_string()),
                bank: Some("bankCode".to_string()),
                timestamp: "createdAt".to_string(),
                amount: Some("amount".to_string()),
                search: vec![
                    "id".to_string(),
                    "reference".to_string(),
                    "senderName".to_string(),
                    "receiverName".to_string(),
                    "receiverAccount".to_string(),
                ],
            },
            EntityKind::QrPayment => EntityFieldMap {
                id: "id".to_string(),
                status: Some("status".to_string()),
                bank: Some("bankCode".to_string()),
                timestamp: "createdAt".to_string(),
                amount: Some("amount".to_string()),
                search: vec![
                    "id".to_string(),
                    "reference".to_string(),
                    "merchantName".to_string(),
                    "payerName".to_string(),
                ],
            },
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank" | "banks" => Ok(EntityKind::Bank),
            "member" | "members" => Ok(EntityKind::Member),
            "transfer" | "transfers" => Ok(EntityKind::Transfer),
            "qr" | "qr-payment" | "qr-payments" | "qr_payment" | "qr_payments" => {
                Ok(EntityKind::QrPayment)
            }
            _ => Err(InvalidInputError::Entity {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("bank".parse::<EntityKind>().unwrap(), EntityKind::Bank);
        assert_eq!("Members".parse::<EntityKind>().unwrap(), EntityKind::Member);
        assert_eq!("qr".parse::<EntityKind>().unwrap(), EntityKind::QrPayment);
        assert_eq!(
            "qr-payments".parse::<EntityKind>().unwrap(),
            EntityKind::QrPayment
        );
    }

    #[test]
    fn rejects_unknown() {
        assert!("wallets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn only_payments_carry_amounts() {
        assert!(EntityKind::Transfer.field_map().amount.is_some());
        assert!(EntityKind::QrPayment.field_map().amount.is_some());
        assert!(EntityKind::Member.field_map().amount.is_none());
        assert!(EntityKind::Bank.field_map().amount.is_none());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&EntityKind::QrPayment).unwrap();
        assert_eq!(json, "\"qr-payment\"");
    }
}
