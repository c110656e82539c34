//! Network-wide DNS and feature settings. These models carry no semantic
//! rules; their validation is the structural check alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validate::SchemaModel;

/// DNS resolver settings for every gateway in a network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkDnsConfig {
    /// Whether gateways cache DNS answers.
    pub enable_caching: bool,
    /// TTL in seconds for locally served records.
    pub local_ttl: i32,
    /// Records served by the gateways.
    #[serde(default, skip_serializing_if = "NetworkDnsRecords::is_empty")]
    pub records: NetworkDnsRecords,
}

impl SchemaModel for NetworkDnsConfig {
    const SCHEMA_NAME: &'static str = "network_dns_config.schema.json";
    const MODEL_NAME: &'static str = "network dns config";
}

/// Custom DNS records, served in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkDnsRecords(pub Vec<DnsConfigRecord>);

impl NetworkDnsRecords {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no records are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, DnsConfigRecord> {
        self.0.iter()
    }
}

impl From<Vec<DnsConfigRecord>> for NetworkDnsRecords {
    fn from(records: Vec<DnsConfigRecord>) -> Self {
        Self(records)
    }
}

impl SchemaModel for NetworkDnsRecords {
    const SCHEMA_NAME: &'static str = "network_dns_records.schema.json";
    const MODEL_NAME: &'static str = "network dns records";
}

/// Records served for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DnsConfigRecord {
    /// Domain name the records answer for.
    pub domain: String,
    /// IPv4 addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub a_record: Vec<String>,
    /// IPv6 addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aaaa_record: Vec<String>,
    /// Canonical names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cname_record: Vec<String>,
}

/// Network-wide feature toggles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkFeatures {
    /// Feature name to value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, String>,
}

impl SchemaModel for NetworkFeatures {
    const SCHEMA_NAME: &'static str = "network_features.schema.json";
    const MODEL_NAME: &'static str = "network features";
}
