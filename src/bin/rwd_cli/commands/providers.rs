// ABOUTME: Provider listing command for rwd-cli
// ABOUTME: Prints the native catalog and every registered Connect IQ provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use run_with_data::providers::global_registry;

use crate::helpers::display::display_provider;

/// Print the registered providers, optionally with their fields
pub fn list(with_fields: bool) {
    let registry = global_registry();
    println!("\nRegistered Metric Providers:");
    println!("{}", "=".repeat(80));
    for provider in registry.providers() {
        display_provider(provider, with_fields);
    }
}
