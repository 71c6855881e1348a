// ABOUTME: Re-exports command modules for rwd-cli
// ABOUTME: Provider listing and activity commands (list, describe, resample)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod activities;
pub mod providers;
