//! Shipped search provider implementations.

use reqwest::{Client, Proxy};

use crate::{ProviderRegistry, Result, SearchConfig};

// International providers
mod brave;
mod duckduckgo;
mod tavily;
mod wikipedia;

// Chinese providers
mod sogou;

pub use brave::Brave;
pub use duckduckgo::DuckDuckGo;
pub use tavily::Tavily;
pub use wikipedia::Wikipedia;

pub use sogou::Sogou;

/// Names of the providers this crate ships, in default registration order.
pub const PROVIDER_NAMES: &[&str] = &["duckduckgo", "brave", "wikipedia", "sogou", "tavily"];

/// Environment variable consulted for the Tavily API key when the
/// configuration has none.
pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

/// Builds the HTTP client shared by all shipped providers.
pub fn http_client(proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

/// Builds a registry of the shipped providers.
///
/// `only` restricts registration to the named providers (in the given
/// order); `None` registers every shipped provider. Tavily is registered
/// only when an API key is configured or present in the environment.
pub fn build_registry(config: &SearchConfig, only: Option<&[String]>) -> Result<ProviderRegistry> {
    let client = http_client(config.proxy.as_deref())?;
    let names: Vec<String> = match only {
        Some(names) => names.iter().map(|n| n.to_lowercase()).collect(),
        None => PROVIDER_NAMES.iter().map(|n| n.to_string()).collect(),
    };

    let mut registry = ProviderRegistry::new();
    for name in &names {
        let settings = config.provider_settings(name).cloned().unwrap_or_default();
        match name.as_str() {
            "duckduckgo" | "ddg" => registry.register(DuckDuckGo::with_client(client.clone()).with_settings(&settings)),
            "brave" => registry.register(Brave::with_client(client.clone()).with_settings(&settings)),
            "wikipedia" | "wiki" => registry.register(Wikipedia::with_client(client.clone()).with_settings(&settings)),
            "sogou" => registry.register(Sogou::with_client(client.clone()).with_settings(&settings)),
            "tavily" => {
                let key = settings
                    .api_key
                    .clone()
                    .or_else(|| std::env::var(TAVILY_API_KEY_ENV).ok())
                    .filter(|key| !key.trim().is_empty());
                match key {
                    Some(key) => registry.register(Tavily::with_client(client.clone(), key).with_settings(&settings)),
                    None => tracing::warn!("Tavily is not configured with an API key, skipping"),
                }
            }
            other => tracing::warn!("Unknown provider '{}', skipping", other),
        }
    }
    Ok(registry)
}

/// Applies a timeout override from provider settings.
fn apply_timeout(config: &mut crate::ProviderConfig, settings: &crate::ProviderSettings) {
    if let Some(timeout) = settings.timeout {
        config.timeout = timeout;
    }
}
