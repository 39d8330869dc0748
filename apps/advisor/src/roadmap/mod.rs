// Roadmap assembly (builder) and console rendering (render).
// The builder produces plain data; rendering to text or JSON is up to the caller.

pub mod builder;
pub mod render;
