// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compile-time checked merge with typed configuration structs.
//!
//! `ConfigMap` is convenient for dynamic option bags, but the overlay
//! contract works just as well on concrete structs, where the precedence
//! rule is checked by the compiler field by field.
//!
//! To run this example:
//! ```bash
//! cargo run --example typed_overlay
//! ```

use featcfg::prelude::*;

#[derive(Clone, Debug, Default)]
struct BucketRoot {
    region: String,
    endpoint: String,
}

#[derive(Clone, Debug)]
struct BucketOverrides {
    name: String,
    endpoint: Option<String>,
}

#[derive(Debug)]
struct BucketConfig {
    name: String,
    region: String,
    endpoint: String,
}

impl Overlay<BucketRoot> for BucketOverrides {
    type Merged = BucketConfig;

    fn overlay(self, base: BucketRoot) -> BucketConfig {
        BucketConfig {
            name: self.name,
            region: base.region,
            endpoint: self.endpoint.unwrap_or(base.endpoint),
        }
    }
}

/// A pretend bucket client built from merged configuration.
#[derive(Debug)]
struct BucketClient {
    config: BucketConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== featcfg: Typed Overlay ===\n");

    let mut factory: ClientFactory<BucketRoot, BucketOverrides, BucketClient> =
        ClientFactory::new(
            "storage",
            |_: &str, _: &str, merged: BucketConfig| -> Result<BucketClient> {
                Ok(BucketClient { config: merged })
            },
        );

    factory.register_root(BucketRoot {
        region: "us-east-1".to_string(),
        endpoint: "https://storage.example.com".to_string(),
    })?;

    factory.register_features(vec![
        (
            "media",
            BucketOverrides {
                name: "media".to_string(),
                endpoint: None,
            },
        ),
        (
            "backups",
            BucketOverrides {
                name: "backups".to_string(),
                endpoint: Some("https://backup.example.com".to_string()),
            },
        ),
    ])?;

    for name in ["media", "backups"] {
        let client = factory.client(name).await?;
        println!("{}: {:?}", name, client.config);
    }

    Ok(())
}
