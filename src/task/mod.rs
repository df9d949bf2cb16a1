// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod step;

pub use step::{TaskStep, MODEL_QUERY_PREFIX, PLUGIN_ACTION_PREFIX};
