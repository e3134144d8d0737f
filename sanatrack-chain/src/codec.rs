//! Conversions between application units and on-chain encodings.
//!
//! The contract stores coordinates as integers scaled by 1e6 (one
//! micro-degree, about 11 cm on the ground). Encoding rounds half away
//! from zero; decoding divides back. Tuple outputs from view calls are
//! narrowed field by field, with explicit bounds checks instead of silent
//! truncation.

use alloy::primitives::{I256, U256};

use crate::contract::ChildRegistry;
use crate::error::{Error, Result};
use crate::types::{Child, LocationRecord};

/// Micro-degrees per degree.
const COORDINATE_SCALE: f64 = 1_000_000.0;

/// Encode degrees as wire micro-degrees.
///
/// Rounding is half-away-from-zero, the same rule for latitude and
/// longitude.
///
/// # Errors
///
/// Returns [`Error::Precondition`] for non-finite input or magnitudes
/// whose scaled value cannot be represented.
pub fn encode_coordinate(degrees: f64) -> Result<i64> {
    if !degrees.is_finite() {
        return Err(Error::precondition(format!(
            "coordinate {degrees} is not a finite number"
        )));
    }
    let scaled = (degrees * COORDINATE_SCALE).round();
    if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
        return Err(Error::precondition(format!(
            "coordinate {degrees} is outside the encodable range"
        )));
    }
    Ok(scaled as i64)
}

/// Decode wire micro-degrees back to degrees.
#[must_use]
pub fn decode_coordinate(micro_degrees: i64) -> f64 {
    micro_degrees as f64 / COORDINATE_SCALE
}

/// Narrow a contract `uint256` to `u64`, naming the field on failure.
pub(crate) fn narrow_u256(value: U256, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::decode(format!("{field} {value} exceeds u64 range")))
}

/// Narrow a contract `int256` to `i64`, naming the field on failure.
pub(crate) fn narrow_i256(value: I256, field: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::decode(format!("{field} {value} exceeds i64 range")))
}

/// Decode a `getChild` tuple into a [`Child`].
///
/// # Errors
///
/// Returns [`Error::Decode`] when a numeric field exceeds its
/// application-side range.
pub fn decode_child(raw: ChildRegistry::getChildReturn) -> Result<Child> {
    let ChildRegistry::getChildReturn {
        id,
        name,
        age,
        emergencyContact: emergency_contact,
        primaryParent: primary_parent,
        registeredAt: registered_at,
    } = raw;
    Ok(Child {
        id: narrow_u256(id, "child id")?,
        name,
        age: u32::try_from(age)
            .map_err(|_| Error::decode(format!("age {age} exceeds u32 range")))?,
        emergency_contact,
        primary_parent,
        registered_at: narrow_u256(registered_at, "registration timestamp")?,
    })
}

/// Decode a `getLatestLocation` tuple into a [`LocationRecord`].
///
/// # Errors
///
/// Returns [`Error::Decode`] when a coordinate or timestamp exceeds its
/// application-side range.
pub fn decode_location(raw: ChildRegistry::getLatestLocationReturn) -> Result<LocationRecord> {
    let ChildRegistry::getLatestLocationReturn {
        latitude,
        longitude,
        zone,
        timestamp,
        isEmergency: is_emergency,
    } = raw;
    Ok(LocationRecord {
        latitude: decode_coordinate(narrow_i256(latitude, "latitude")?),
        longitude: decode_coordinate(narrow_i256(longitude, "longitude")?),
        zone,
        timestamp: narrow_u256(timestamp, "location timestamp")?,
        is_emergency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode_coordinate(-33.918861).unwrap(), -33_918_861);
        assert_eq!(encode_coordinate(18.4233).unwrap(), 18_423_300);
        assert_eq!(decode_coordinate(18_423_300), 18.4233);
        assert_eq!(decode_coordinate(-33_918_861), -33.918861);
    }

    #[test]
    fn ties_round_away_from_zero() {
        let half = 1.5 / COORDINATE_SCALE;
        assert_eq!(encode_coordinate(half).unwrap(), 2);
        assert_eq!(encode_coordinate(-half).unwrap(), -2);
    }

    #[test]
    fn round_trip_stays_within_half_a_micro_degree() {
        for i in -1800..=1800 {
            let degrees = f64::from(i) * 0.1 + 0.000_123_4;
            let decoded = decode_coordinate(encode_coordinate(degrees).unwrap());
            assert!(
                (decoded - degrees).abs() <= 0.5e-6,
                "round trip drifted for {degrees}: got {decoded}"
            );
        }
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(matches!(
            encode_coordinate(f64::NAN),
            Err(Error::Precondition(_))
        ));
        assert!(matches!(
            encode_coordinate(f64::INFINITY),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn oversized_wire_values_are_rejected() {
        assert!(matches!(
            narrow_u256(U256::MAX, "child id"),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            narrow_i256(I256::MIN, "latitude"),
            Err(Error::Decode(_))
        ));
    }

    fn sample_location() -> ChildRegistry::getLatestLocationReturn {
        ChildRegistry::getLatestLocationReturn {
            latitude: I256::try_from(-33_918_861i64).unwrap(),
            longitude: I256::try_from(18_423_300i64).unwrap(),
            zone: "Gardens, Cape Town".to_owned(),
            timestamp: U256::from(1_754_000_000u64),
            isEmergency: false,
        }
    }

    #[test]
    fn location_decode_is_idempotent() {
        let first = decode_location(sample_location()).unwrap();
        let second = decode_location(sample_location()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.latitude, -33.918861);
        assert_eq!(first.longitude, 18.4233);
        assert!(!first.is_emergency);
    }

    #[test]
    fn child_decode_narrows_with_bounds_checks() {
        let raw = ChildRegistry::getChildReturn {
            id: U256::from(3u64),
            name: "Asha".to_owned(),
            age: U256::from(9u64),
            emergencyContact: "+27 82 000 0000".to_owned(),
            primaryParent: alloy::primitives::Address::repeat_byte(0x42),
            registeredAt: U256::from(1_754_000_000u64),
        };
        let child = decode_child(raw).unwrap();
        assert_eq!(child.id, 3);
        assert_eq!(child.age, 9);

        let oversized = ChildRegistry::getChildReturn {
            id: U256::MAX,
            name: "Asha".to_owned(),
            age: U256::from(9u64),
            emergencyContact: String::new(),
            primaryParent: alloy::primitives::Address::ZERO,
            registeredAt: U256::ZERO,
        };
        assert!(matches!(decode_child(oversized), Err(Error::Decode(_))));
    }
}
