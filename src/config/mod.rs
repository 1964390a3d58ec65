// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: All configuration is sourced from process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

/// Environment-based configuration management
pub mod environment;
