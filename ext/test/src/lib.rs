//! rpcgate-test: Reference query domain for conformance testing
//!
//! A small, realistic set of Cosmos-style query requests with their REST
//! routes. It exercises every field kind the builder supports and the
//! interesting routing cases:
//!
//! - literal and wildcard templates under the same prefix (`blocks/latest`
//!   vs `blocks/{height}`)
//! - multi-segment wildcards (`denoms_metadata/{denom=**}`)
//! - a field whose identifier differs from its serialization name
//!   ([`staking::QueryValidatorRequest`])
//! - message, enum, bool and integer fields
//!
//! # Example
//!
//! ```
//! use rpcgate::prelude::*;
//! use rpcgate_test::bank::QueryAllBalancesRequest;
//!
//! let registry = rpcgate_test::registry();
//! let table = rpcgate_test::gateway_config().template_table().unwrap();
//!
//! let m = match_uri("/cosmos/bank/v1beta1/balances/cosmos1xyz", &table).unwrap();
//! let msg = build_from_match(&registry, &m).unwrap();
//! assert_eq!(msg.downcast_ref::<QueryAllBalancesRequest>().unwrap().address, "cosmos1xyz");
//! ```

use rpcgate::{GatewayConfig, QueryRequest, TypeRegistry, TypeRegistryBuilder};
use serde::{Deserialize, Serialize};

pub mod gov;
pub mod json;

#[cfg(feature = "fixtures")]
pub mod build_fixture;

/// Pagination options carried by list queries.
///
/// A message-typed field: it can be set from a JSON body but never from a
/// path parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    /// Opaque continuation key.
    pub key: String,
    /// Number of items to skip.
    #[serde(deserialize_with = "json::uint64")]
    pub offset: u64,
    /// Maximum number of items to return.
    #[serde(deserialize_with = "json::uint64")]
    pub limit: u64,
    /// Whether to include the total count.
    pub count_total: bool,
    /// Whether to iterate in descending order.
    pub reverse: bool,
}

/// REST routes for the reference domain, in registration order.
pub const ROUTES: &[(&str, &str)] = &[
    ("/cosmos/bank/v1beta1/params", bank::QueryParamsRequest::TYPE_NAME),
    ("/cosmos/bank/v1beta1/balances/{address}", bank::QueryAllBalancesRequest::TYPE_NAME),
    (
        "/cosmos/bank/v1beta1/balances/{address}/by_denom/{denom=**}",
        bank::QueryBalanceRequest::TYPE_NAME,
    ),
    ("/cosmos/bank/v1beta1/denoms_metadata/{denom=**}", bank::QueryDenomMetadataRequest::TYPE_NAME),
    ("/cosmos/gov/v1/proposals", gov::QueryProposalsRequest::TYPE_NAME),
    ("/cosmos/gov/v1/proposals/{proposal_id}", gov::QueryProposalRequest::TYPE_NAME),
    ("/cosmos/staking/v1beta1/validators/{validator_addr}", staking::QueryValidatorRequest::TYPE_NAME),
    (
        "/cosmos/staking/v1beta1/validators/{validator_addr}/delegations/{delegator_addr}",
        staking::QueryDelegationRequest::TYPE_NAME,
    ),
    ("/cosmos/base/tendermint/v1beta1/blocks/latest", tendermint::GetLatestBlockRequest::TYPE_NAME),
    ("/cosmos/base/tendermint/v1beta1/blocks/{height}", tendermint::GetBlockByHeightRequest::TYPE_NAME),
];

/// Register all reference request types with the given builder.
#[must_use]
pub fn register(builder: TypeRegistryBuilder) -> TypeRegistryBuilder {
    builder
        .message::<bank::QueryParamsRequest>()
        .message::<bank::QueryBalanceRequest>()
        .message::<bank::QueryAllBalancesRequest>()
        .message::<bank::QueryDenomMetadataRequest>()
        .message::<gov::QueryProposalRequest>()
        .message::<gov::QueryProposalsRequest>()
        .message::<staking::QueryValidatorRequest>()
        .message::<staking::QueryDelegationRequest>()
        .message::<tendermint::GetLatestBlockRequest>()
        .message::<tendermint::GetBlockByHeightRequest>()
}

/// A registry holding every reference request type.
#[must_use]
pub fn registry() -> TypeRegistry {
    register(TypeRegistry::builder()).build()
}

/// Gateway configuration with every route in [`ROUTES`].
#[must_use]
pub fn gateway_config() -> GatewayConfig {
    ROUTES
        .iter()
        .fold(GatewayConfig::default(), |config, (template, type_name)| {
            config.with_route(*template, *type_name)
        })
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{gateway_config, register, registry, PageRequest, ROUTES};
    pub use rpcgate::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcgate::TypeResolver;

    #[test]
    fn test_every_route_resolves() {
        let registry = registry();
        let config = gateway_config();

        assert_eq!(config.routes.len(), ROUTES.len());
        config.validate_types(&registry).unwrap();
        assert_eq!(config.template_table().unwrap().len(), ROUTES.len());
    }

    #[test]
    fn test_every_type_is_routed() {
        let registry = registry();
        for name in registry.type_names() {
            assert!(
                ROUTES.iter().any(|(_, type_name)| *type_name == name),
                "{name} has no route"
            );
        }
    }

    #[test]
    fn test_field_names_are_serialization_names() {
        let registry = registry();
        let validator = registry
            .resolve(staking::QueryValidatorRequest::TYPE_NAME)
            .unwrap();
        assert_eq!(validator.field_names(), ["validator_addr"]);

        let balances = registry
            .resolve(bank::QueryAllBalancesRequest::TYPE_NAME)
            .unwrap();
        assert_eq!(balances.field_names(), ["address", "pagination", "resolve_denom"]);
    }
}
