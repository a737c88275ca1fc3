//! `wasm-bindgen` surface for driving a tiling from a browser front end.

pub mod tiling_js;

pub use tiling_js::TilingJs;
