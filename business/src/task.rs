//! Fire-and-forget execution of Send futures.
//!
//! - **native**: `tokio::spawn` on the ambient runtime. The caller must be
//!   inside a runtime context (`Runtime::enter` in the binary, `#[tokio::test]`
//!   in tests).
//! - **WASM**: `wasm_bindgen_futures::spawn_local` on the JS event loop.

use std::future::Future;

pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Completion is reported through channels, not the join handle.
        drop(tokio::spawn(future));
    }

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }
}
