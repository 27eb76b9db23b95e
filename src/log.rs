//! Console logging. Writes to the browser console on wasm32; other targets
//! (unit tests) discard the message.

#[cfg(target_arch = "wasm32")]
pub fn info(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(message: &str) {
    let _ = message;
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(message: &str) {
    let _ = message;
}
