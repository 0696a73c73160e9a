//! HTTP adapter for the SolidActions platform API

mod client;
mod envelope;

pub use client::HttpPlatformApi;
