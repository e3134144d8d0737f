//! Fixed ABI binding for the on-chain child registry.
//!
//! The contract's schema is an external given; this module declares it
//! with `sol!` and produces bound handles capable of both mutating
//! (`send`) and view calls. No partial bindings: a handle only exists once
//! a real address and a live provider are both present.

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::DynProvider;
use alloy::sol;

use crate::error::{Error, Result};

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract ChildRegistry {
        event ChildRegistered(uint256 indexed childId, string name, address indexed parent);
        event LocationUpdated(uint256 indexed childId, int256 latitude, int256 longitude, string zone);

        function registerChild(string memory _name, uint256 _age, string memory _emergencyContact) external returns (uint256 childId);
        function updateLocation(uint256 _childId, int256 _latitude, int256 _longitude, string memory _zone) external;
        function getChild(uint256 _childId) external view returns (uint256 id, string memory name, uint256 age, string memory emergencyContact, address primaryParent, uint256 registeredAt);
        function getChildrenForParent(address _parent) external view returns (uint256[] memory);
        function getLatestLocation(uint256 _childId) external view returns (int256 latitude, int256 longitude, string memory zone, uint256 timestamp, bool isEmergency);
    }
}

/// A registry handle bound to an address and a signer-backed provider.
pub type BoundRegistry = ChildRegistry::ChildRegistryInstance<DynProvider<Ethereum>>;

/// Bind the registry at `address` through `provider`.
///
/// # Errors
///
/// Returns [`Error::Config`] for the zero address; configuration
/// validation should have caught it earlier, but a binding must never be
/// produced for it.
pub fn bind(address: Address, provider: DynProvider<Ethereum>) -> Result<BoundRegistry> {
    if address == Address::ZERO {
        return Err(Error::config("cannot bind registry at the zero address"));
    }
    Ok(ChildRegistry::new(address, provider))
}
