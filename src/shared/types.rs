//! Address and amount types for custody operations

use crate::shared::constants::{ADDRESS_BYTES, ADDRESS_LENGTH, NATIVE_DECIMALS};
use crate::shared::error::{CustodyError, CustodyResult};
use crate::shared::utils::keccak256;
use ethers::types::U256;
use secp256k1::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An account address derived from a secp256k1 public key.
///
/// The canonical text form is the EIP-55 checksummed rendering. Equality is
/// defined over the underlying 20 bytes, so two parses of the same address in
/// different casings compare equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_BYTES],
    text: String,
}

impl Address {
    /// Derive the address from a public key: keccak256 of the uncompressed
    /// point without its 0x04 prefix, last 20 bytes, checksum-cased.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let encoded = public_key.serialize_uncompressed();
        let hash = keccak256(&encoded[1..]);

        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes.copy_from_slice(&hash[12..]);
        Self::from_fixed_bytes(bytes)
    }

    /// Build an address from raw bytes, computing the checksummed text form.
    pub fn from_fixed_bytes(bytes: [u8; ADDRESS_BYTES]) -> Self {
        let text = Self::checksum(&bytes);
        Self { bytes, text }
    }

    /// Parse and validate an address string.
    ///
    /// All-lowercase and all-uppercase bodies are accepted and re-canonicalised;
    /// a mixed-case body must match the EIP-55 checksum exactly.
    pub fn parse(input: &str) -> CustodyResult<Self> {
        let body = input.strip_prefix("0x").ok_or_else(|| {
            CustodyError::invalid_destination("address must start with 0x")
        })?;

        if input.len() != ADDRESS_LENGTH {
            return Err(CustodyError::invalid_destination(format!(
                "address must be {} characters, got {}",
                ADDRESS_LENGTH,
                input.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| {
            CustodyError::invalid_destination("address contains non-hex characters")
        })?;

        let address = Self::from_fixed_bytes(bytes);

        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        if has_upper && has_lower && input != address.text {
            return Err(CustodyError::invalid_destination("checksum mismatch"));
        }

        Ok(address)
    }

    /// The checksummed text form, including the 0x prefix.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The raw 20 address bytes.
    pub fn as_fixed_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.bytes
    }

    // EIP-55: uppercase a hex digit wherever the corresponding nibble of
    // keccak256(lowercase hex body) is >= 8.
    fn checksum(bytes: &[u8; ADDRESS_BYTES]) -> String {
        let lower = hex::encode(bytes);
        let hash = keccak256(lower.as_bytes());

        let mut text = String::with_capacity(ADDRESS_LENGTH);
        text.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                text.push(c.to_ascii_uppercase());
            } else {
                text.push(c);
            }
        }
        text
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.text)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for Address {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A monetary amount in 18-decimal fixed point.
///
/// Stored as an exact wei count; no floating point appears anywhere in the
/// representation or the parsing path, so "1.5" is exactly
/// 1_500_000_000_000_000_000 wei with no rounding drift.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(U256);

impl Amount {
    /// Parse a non-negative decimal literal with at most 18 fractional digits.
    pub fn parse(input: &str) -> CustodyResult<Self> {
        if input.is_empty() {
            return Err(CustodyError::invalid_amount("empty input"));
        }
        if input.starts_with('+') || input.starts_with('-') {
            return Err(CustodyError::invalid_amount(
                "amount must be an unsigned decimal",
            ));
        }

        let (int_part, frac_part) = match input.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(CustodyError::invalid_amount("trailing decimal point"));
                }
                (int_part, frac_part)
            }
            None => (input, ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CustodyError::invalid_amount("malformed integer part"));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CustodyError::invalid_amount("malformed fractional part"));
        }
        if frac_part.len() > NATIVE_DECIMALS {
            return Err(CustodyError::invalid_amount(format!(
                "more than {} decimal places",
                NATIVE_DECIMALS
            )));
        }

        let int = U256::from_dec_str(int_part)
            .map_err(|_| CustodyError::invalid_amount("integer part out of range"))?;
        let mut wei = int
            .checked_mul(U256::exp10(NATIVE_DECIMALS))
            .ok_or_else(|| CustodyError::invalid_amount("amount out of range"))?;

        if !frac_part.is_empty() {
            let frac = U256::from_dec_str(frac_part)
                .map_err(|_| CustodyError::invalid_amount("fractional part out of range"))?;
            let scaled = frac
                .checked_mul(U256::exp10(NATIVE_DECIMALS - frac_part.len()))
                .ok_or_else(|| CustodyError::invalid_amount("amount out of range"))?;
            wei = wei
                .checked_add(scaled)
                .ok_or_else(|| CustodyError::invalid_amount("amount out of range"))?;
        }

        Ok(Self(wei))
    }

    /// Construct from an exact wei count.
    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// The exact wei count.
    pub fn as_wei(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = U256::exp10(NATIVE_DECIMALS);
        let int = self.0 / scale;
        let frac = self.0 % scale;

        if frac.is_zero() {
            write!(f, "{}", int)
        } else {
            let digits = frac.to_string();
            let padded = format!("{}{}", "0".repeat(NATIVE_DECIMALS - digits.len()), digits);
            write!(f, "{}.{}", int, padded.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self)
    }
}

impl FromStr for Amount {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // EIP-55 reference vectors
    const CHECKSUMMED: &[&str] = &[
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_parse_lowercase_recanonicalises() {
        for expected in CHECKSUMMED {
            let address = Address::parse(&expected.to_lowercase())
                .expect("lowercase form must parse");
            assert_eq!(address.as_str(), *expected);
        }
    }

    #[test]
    fn test_parse_uppercase_body_accepted() {
        let upper = format!("0x{}", CHECKSUMMED[0][2..].to_uppercase());
        let address = Address::parse(&upper).expect("uppercase form must parse");
        assert_eq!(address.as_str(), CHECKSUMMED[0]);
    }

    #[test]
    fn test_parse_valid_checksum() {
        for expected in CHECKSUMMED {
            let address = Address::parse(expected).expect("checksummed form must parse");
            assert_eq!(address.as_str(), *expected);
        }
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        // Swap the case of one letter in an otherwise valid checksummed address.
        let mangled = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        let result = Address::parse(mangled);
        assert!(matches!(result, Err(CustodyError::InvalidDestination(_))));
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let result = Address::parse("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert!(matches!(result, Err(CustodyError::InvalidDestination(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse(&format!("{}00", CHECKSUMMED[0])).is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let result = Address::parse("0xzz20a0cf47c7b9be7a2e6ba89f429762e7b9adb1");
        assert!(matches!(result, Err(CustodyError::InvalidDestination(_))));
    }

    #[test]
    fn test_address_equality_ignores_input_casing() {
        let lower = Address::parse(&CHECKSUMMED[1].to_lowercase()).unwrap();
        let mixed = Address::parse(CHECKSUMMED[1]).unwrap();
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_address_serde_round_trip() {
        let address = Address::parse(CHECKSUMMED[2]).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", CHECKSUMMED[2]));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_amount_parse_whole_and_fractional() {
        assert_eq!(
            Amount::parse("1.5").unwrap().as_wei(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(Amount::parse("0").unwrap().as_wei(), U256::zero());
        assert_eq!(
            Amount::parse("2").unwrap().as_wei(),
            U256::from(2_000_000_000_000_000_000u128)
        );
        // one wei
        assert_eq!(
            Amount::parse("0.000000000000000001").unwrap().as_wei(),
            U256::one()
        );
    }

    #[test]
    fn test_amount_parse_rejects_malformed_input() {
        for input in ["", "-1", "+1", "1.", ".5", "1.2.3", "1e18", "one", "1.1234567890123456789"] {
            let result = Amount::parse(input);
            assert!(
                matches!(result, Err(CustodyError::InvalidAmount(_))),
                "expected InvalidAmount for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_amount_display_is_shortest_exact_form() {
        assert_eq!(Amount::parse("1.5").unwrap().to_string(), "1.5");
        assert_eq!(Amount::parse("1.500").unwrap().to_string(), "1.5");
        assert_eq!(Amount::parse("2").unwrap().to_string(), "2");
        assert_eq!(Amount::parse("0").unwrap().to_string(), "0");
        assert_eq!(
            Amount::from_wei(U256::one()).to_string(),
            "0.000000000000000001"
        );
    }

    #[test]
    fn test_amount_serde_round_trip() {
        let amount = Amount::parse("3.25").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"3.25\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    proptest! {
        #[test]
        fn amount_display_parse_round_trip(wei in any::<u128>()) {
            let amount = Amount::from_wei(U256::from(wei));
            let back = Amount::parse(&amount.to_string()).unwrap();
            prop_assert_eq!(back, amount);
        }
    }
}
