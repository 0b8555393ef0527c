// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - Credential rule: exclusivity and completeness over every presence combination
//! - Version rule: unknown versions and orchestration short-circuits

mod version_rules;
