//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, CartConfig, CatalogSettings, LogFormat, LoggingConfig, ServerConfig,
    StoreConfig,
};
