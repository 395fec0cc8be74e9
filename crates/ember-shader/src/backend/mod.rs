//! Driver backends implementing [`crate::GraphicsContext`].

#[cfg(all(feature = "glow", not(target_arch = "wasm32")))]
mod opengl;
