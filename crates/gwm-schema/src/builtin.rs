//! Schemas compiled into the crate.
//!
//! One schema per gateway model, plus `dns_config_record.schema.json`
//! which is only reached through `$ref`.

/// `(filename, contents)` for every embedded schema.
pub const BUILTIN_SCHEMAS: [(&str, &str); 8] = [
    (
        "challenge_key.schema.json",
        include_str!("../schemas/challenge_key.schema.json"),
    ),
    (
        "gateway_device.schema.json",
        include_str!("../schemas/gateway_device.schema.json"),
    ),
    (
        "magmad_gateway.schema.json",
        include_str!("../schemas/magmad_gateway.schema.json"),
    ),
    (
        "magmad_gateway_configs.schema.json",
        include_str!("../schemas/magmad_gateway_configs.schema.json"),
    ),
    (
        "dns_config_record.schema.json",
        include_str!("../schemas/dns_config_record.schema.json"),
    ),
    (
        "network_dns_records.schema.json",
        include_str!("../schemas/network_dns_records.schema.json"),
    ),
    (
        "network_dns_config.schema.json",
        include_str!("../schemas/network_dns_config.schema.json"),
    ),
    (
        "network_features.schema.json",
        include_str!("../schemas/network_features.schema.json"),
    ),
];
