// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Logging macros that forward to `tracing` when the `tracing` feature is enabled and
//! expand to nothing otherwise.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

// Defined under distinct names: `warn` also names a built-in attribute, so
// re-exporting a local `macro_rules! warn` by that name is ambiguous.
#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_info {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }
    #[allow(unused_imports)]
    pub(crate) use {
        noop_debug as debug, noop_info as info, noop_trace as trace, noop_warn as warn,
    };
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop::*;
