// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred registration example.
//!
//! This example demonstrates:
//! - An async root factory with an injected dependency
//! - Async feature options
//! - A failing feature whose error is cached and re-surfaced
//!
//! To run this example:
//! ```bash
//! cargo run --example async_root
//! ```

use featcfg::prelude::*;

/// Stand-in for an external settings service resolved by the host.
struct SettingsSource {
    region: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== featcfg: Deferred Registration ===\n");

    let resolver = StaticResolver::new().with(
        "settings",
        SettingsSource {
            region: "eu-west-1".to_string(),
        },
    );

    let mut factory: ClientFactory<ConfigMap, ConfigMap, String> = ClientFactory::new(
        "queue",
        |_: &str, _: &str, merged: ConfigMap| -> Result<String> {
            Ok(format!(
                "{} @ {}",
                merged
                    .get("url")
                    .map(|v| v.as_string())
                    .unwrap_or_default(),
                merged
                    .get("region")
                    .map(|v| v.as_string())
                    .unwrap_or_default(),
            ))
        },
    )
    .with_resolver(resolver);

    // Root configuration comes from the settings service, resolved lazily on
    // the first client build.
    factory.register_root_async(vec!["settings".to_string()], |deps| async move {
        let settings = downcast::<SettingsSource>(&deps[0]).expect("settings source");
        Ok::<_, BoxedError>(ConfigMap::new().with("region", settings.region.clone()))
    })?;

    factory.register_features_async(vec![
        AsyncFeature::new("notif", vec![], |_deps| async {
            Ok::<_, BoxedError>(ConfigMap::new().with("url", "https://queue/notif"))
        }),
        AsyncFeature::new("broken", vec![], |_deps| async {
            Err::<ConfigMap, BoxedError>("bad url".into())
        }),
    ])?;

    let client = factory.client("notif").await?;
    println!("notif client: {}", client);

    match factory.client("broken").await {
        Err(error) => println!("broken feature failed as expected: {}", error),
        Ok(_) => unreachable!("the broken factory always fails"),
    }

    Ok(())
}
