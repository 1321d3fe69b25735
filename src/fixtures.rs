//! The fixed set of fixtures consumed by the SafePay scanner
//!
//! Categories describe what each payload is meant to look like to the
//! downstream classifier. Nothing in this crate evaluates them.

use serde::Serialize;
use std::fmt;

/// Scenario a fixture is meant to exercise downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureCategory {
    /// Well-formed UPI payment URI
    SafePayment,
    /// Plain benign web URL
    SafeUrl,
    /// Unusually long URL carrying account-verification keywords
    Suspicious,
    /// URL on a domain the scanner treats as known-malicious
    MaliciousDomain,
    /// URL carrying the simulated LSB steganography marker
    Steganography,
}

impl FixtureCategory {
    /// Short machine-friendly label
    pub fn label(self) -> &'static str {
        match self {
            Self::SafePayment => "safe_payment",
            Self::SafeUrl => "safe_url",
            Self::Suspicious => "suspicious",
            Self::MaliciousDomain => "malicious_domain",
            Self::Steganography => "steganography",
        }
    }

    /// Human-readable description of the expected downstream verdict
    pub fn description(self) -> &'static str {
        match self {
            Self::SafePayment => "valid UPI payment request, expected to scan as safe",
            Self::SafeUrl => "ordinary web link, expected to scan as safe",
            Self::Suspicious => "long URL with 'verify-account' keyword, expected to scan as suspicious",
            Self::MaliciousDomain => "known phishing domain, expected to scan as malicious",
            Self::Steganography => {
                "carries the LSB modification marker, expected to scan as malicious"
            }
        }
    }
}

impl fmt::Display for FixtureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One payload and the file it is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Downstream scenario
    pub category: FixtureCategory,
    /// Text encoded into the symbol
    pub payload: &'static str,
    /// File name inside the output directory
    pub file_name: &'static str,
}

/// Every fixture, in generation order
pub const FIXTURES: [Fixture; 5] = [
    Fixture {
        category: FixtureCategory::SafePayment,
        payload: "upi://pay?pa=yourname@bank&pn=YourName&mc=0000",
        file_name: "safe_upi_qr.png",
    },
    Fixture {
        category: FixtureCategory::SafeUrl,
        payload: "https://www.example.com/safe_page",
        file_name: "safe_url_qr.png",
    },
    Fixture {
        category: FixtureCategory::Suspicious,
        payload: concat!(
            "https://suspicious-long-domain.info/verify-account-security-update-now-or-your-account-will-be-locked/",
            "please-click-here-to-reconfirm-your-details-immediately-avoid-disruption-to-service-important-notice",
        ),
        file_name: "suspicious_long_url_qr.png",
    },
    Fixture {
        category: FixtureCategory::MaliciousDomain,
        payload: "https://phishing.xyz/login?session=expired",
        file_name: "malicious_domain_qr.png",
    },
    Fixture {
        category: FixtureCategory::Steganography,
        payload: "https://legit-website.com/data?id=123&payload=LSB_MODIFIED_DATA_HIDDEN_SECRET_CODE_ABCDEF",
        file_name: "malicious_lsb_steganography_qr.png",
    },
];
