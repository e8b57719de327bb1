// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the configuration composition crate.
//!
//! This example demonstrates:
//! - Creating a client factory for one configuration scope
//! - Registering a root configuration shared by every feature
//! - Registering features that inherit and override root fields
//! - Lazily resolving clients from merged configuration
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use featcfg::prelude::*;

/// A pretend queue client; a real application would wrap an SDK handle.
#[derive(Debug)]
struct QueueClient {
    url: String,
    region: String,
    group_id: String,
}

fn build_queue_client(scope: &str, feature: &str, merged: ConfigMap) -> Result<QueueClient> {
    let missing = merged.missing_fields(&["url", "region"]);
    if !missing.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            scope: scope.to_string(),
            feature: feature.to_string(),
            missing,
        });
    }
    Ok(QueueClient {
        url: merged.get("url").unwrap().as_string(),
        region: merged.get("region").unwrap().as_string(),
        group_id: merged
            .get("group_id")
            .map(|v| v.as_string())
            .unwrap_or_else(|| "default".to_string()),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== featcfg: Basic Usage ===\n");

    let mut factory: ClientFactory<ConfigMap, ConfigMap, QueueClient> =
        ClientFactory::new("queue", build_queue_client);

    // Root configuration, shared by every queue in this scope.
    factory.register_root(
        ConfigMap::new()
            .with("region", "us-east-1")
            .with("group_id", "default"),
    )?;

    // Two features: "orders" overrides the consumer group, "invoices" keeps
    // the root defaults.
    factory.register_features(vec![
        (
            "orders",
            ConfigMap::new()
                .with("url", "https://queue/orders")
                .with("group_id", "priority"),
        ),
        (
            "invoices",
            ConfigMap::new().with("url", "https://queue/invoices"),
        ),
    ])?;

    println!(
        "registered features: {:?}\n",
        factory.feature_names().collect::<Vec<_>>()
    );

    for name in ["orders", "invoices"] {
        let client = factory.client(name).await?;
        println!("--- {} ---", name);
        println!("  url:      {}", client.url);
        println!("  region:   {} (inherited from root)", client.region);
        println!("  group_id: {}", client.group_id);
    }

    // Resolving again returns the same cached client.
    let first = factory.client("orders").await?;
    let second = factory.client("orders").await?;
    println!(
        "\nsame client instance on re-resolution: {}",
        std::sync::Arc::ptr_eq(&first, &second)
    );

    Ok(())
}
