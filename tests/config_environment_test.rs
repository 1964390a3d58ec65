// ABOUTME: Tests for environment-driven server configuration parsing
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use innkeeper_server::config::environment::{Environment, ServerConfig};
use innkeeper_server::constants::{defaults, env_config, limits};
use serial_test::serial;

fn clear_config_env() {
    std::env::remove_var(env_config::DATABASE_URL);
    std::env::remove_var(env_config::DATABASE_MAX_CONNECTIONS);
    std::env::remove_var(env_config::HTTP_PORT);
    std::env::remove_var(env_config::JWT_SECRET);
    std::env::remove_var(env_config::JWT_EXPIRY_HOURS);
    std::env::remove_var(env_config::CORS_ALLOWED_ORIGINS);
    std::env::remove_var(env_config::ENVIRONMENT);
}

#[test]
#[serial]
fn test_from_env_uses_development_fallbacks() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, defaults::HTTP_PORT);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.database.max_connections,
        limits::DATABASE_MAX_CONNECTIONS
    );
    assert_eq!(config.auth.jwt_secret, defaults::JWT_SECRET);
    assert_eq!(config.auth.jwt_expiry_hours, limits::SESSION_EXPIRY_HOURS);
    assert_eq!(config.cors.allowed_origins, "*");
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_config_env();
    std::env::set_var(env_config::HTTP_PORT, "9090");
    std::env::set_var(env_config::DATABASE_URL, "sqlite::memory:");
    std::env::set_var(env_config::DATABASE_MAX_CONNECTIONS, "4");
    std::env::set_var(env_config::JWT_SECRET, "configured-secret");
    std::env::set_var(env_config::JWT_EXPIRY_HOURS, "48");
    std::env::set_var(env_config::ENVIRONMENT, "production");
    std::env::set_var(env_config::CORS_ALLOWED_ORIGINS, "https://admin.example.com");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert!(config.database.url.is_memory());
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(config.auth.jwt_secret, "configured-secret");
    assert_eq!(config.auth.jwt_expiry_hours, 48);
    assert!(config.environment.is_production());
    assert_eq!(config.cors.allowed_origins, "https://admin.example.com");

    clear_config_env();
}

#[test]
#[serial]
fn test_from_env_rejects_invalid_port() {
    clear_config_env();
    std::env::set_var(env_config::HTTP_PORT, "not-a-port");

    let err = ServerConfig::from_env().unwrap_err();
    assert!(err.to_string().contains(env_config::HTTP_PORT));

    clear_config_env();
}

#[test]
#[serial]
fn test_summary_never_contains_the_secret() {
    clear_config_env();
    std::env::set_var(env_config::JWT_SECRET, "super-sensitive-value");

    let config = ServerConfig::from_env().unwrap();
    assert!(!config.summary().contains("super-sensitive-value"));

    clear_config_env();
}
