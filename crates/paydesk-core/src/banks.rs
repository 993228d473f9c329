//! Bank code directory.
//!
//! Maps the three-digit clearing codes used by the gateway to short names
//! and display names.

use serde::Serialize;

/// One entry of the bank directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    pub code: &'static str,
    pub short_name: &'static str,
    pub name: &'static str,
}

const fn bank(code: &'static str, short_name: &'static str, name: &'static str) -> BankInfo {
    BankInfo {
        code,
        short_name,
        name,
    }
}

/// All known banks, ordered by code.
pub const BANKS: &[BankInfo] = &[
    bank("002", "BBL", "Bangkok Bank"),
    bank("004", "KBANK", "Kasikornbank"),
    bank("006", "KTB", "Krungthai Bank"),
    bank("011", "TTB", "TMBThanachart Bank"),
    bank("014", "SCB", "Siam Commercial Bank"),
    bank("017", "CITI", "Citibank"),
    bank("022", "CIMBT", "CIMB Thai Bank"),
    bank("024", "UOBT", "United Overseas Bank (Thai)"),
    bank("025", "BAY", "Bank of Ayudhya (Krungsri)"),
    bank("030", "GSB", "Government Savings Bank"),
    bank("033", "GHB", "Government Housing Bank"),
    bank("034", "BAAC", "Bank for Agriculture and Agricultural Cooperatives"),
    bank("066", "ISBT", "Islamic Bank of Thailand"),
    bank("067", "TISCO", "TISCO Bank"),
    bank("069", "KKP", "Kiatnakin Phatra Bank"),
    bank("070", "ICBCT", "ICBC (Thai)"),
    bank("071", "TCD", "Thai Credit Bank"),
    bank("073", "LHFG", "Land and Houses Bank"),
];

/// Look a bank up by code or short name.
///
/// Codes are compared trimmed; short names case-insensitively. Codes given
/// without leading zeros (`"14"`) are padded to three digits.
pub fn lookup(code: &str) -> Option<&'static BankInfo> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    let padded = if code.len() < 3 && code.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>3}", code)
    } else {
        code.to_string()
    };

    BANKS
        .iter()
        .find(|b| b.code == padded || b.short_name.eq_ignore_ascii_case(code))
}

/// The display name for a bank code, or the code itself when unknown.
pub fn display_name(code: &str) -> String {
    match lookup(code) {
        Some(bank) => bank.name.to_string(),
        None => code.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code() {
        assert_eq!(lookup("014").unwrap().short_name, "SCB");
        assert_eq!(lookup(" 002 ").unwrap().name, "Bangkok Bank");
    }

    #[test]
    fn lookup_pads_short_codes() {
        assert_eq!(lookup("4").unwrap().short_name, "KBANK");
        assert_eq!(lookup("14").unwrap().short_name, "SCB");
    }

    #[test]
    fn lookup_by_short_name() {
        assert_eq!(lookup("kbank").unwrap().code, "004");
    }

    #[test]
    fn unknown_codes_display_as_is() {
        assert!(lookup("999").is_none());
        assert!(lookup("").is_none());
        assert_eq!(display_name(" 999 "), "999");
        assert_eq!(display_name("025"), "Bank of Ayudhya (Krungsri)");
    }

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in BANKS.windows(2) {
            assert!(pair[0].code < pair[1].code);
        }
    }
}
