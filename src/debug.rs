//! Debug overlay utilities for web platform
//!
//! Provides functions to update the on-screen debug display
//! with the latest recognized gesture and tracker usage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Update the debug status line
#[cfg(target_arch = "wasm32")]
pub fn update_status(status: &str) {
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = updateDebugStatus)]
        fn update_debug_status(status: &str);
    }
    update_debug_status(status);
}

/// Show the most recent gesture
#[cfg(target_arch = "wasm32")]
pub fn update_gesture(gesture: &str) {
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = updateDebugGesture)]
        fn update_debug_gesture(gesture: &str);
    }
    update_debug_gesture(gesture);
}

/// Show live contacts and tracker pool usage
#[cfg(target_arch = "wasm32")]
pub fn update_contacts(active: usize, pool_usage: &str) {
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = updateDebugContacts)]
        fn update_debug_contacts(active: u32, pool_usage: &str);
    }
    update_debug_contacts(active as u32, pool_usage);
}

/// Increment the frame counter
#[cfg(target_arch = "wasm32")]
pub fn increment_frame_count() {
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = incrementFrameCount)]
        fn increment_frame_count_js();
    }
    increment_frame_count_js();
}

// No-op versions for non-WASM platforms
#[cfg(not(target_arch = "wasm32"))]
pub fn update_status(_status: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn update_gesture(_gesture: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn update_contacts(_active: usize, _pool_usage: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn increment_frame_count() {}
