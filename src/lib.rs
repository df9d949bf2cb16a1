// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // plugins + model client
pub mod config;     // config + registry
pub mod engine;     // step dispatch
pub mod errors;     // error handling
pub mod observability;
pub mod task;       // step grammar
pub mod traits;     // unified abstractions
