pub mod client;

pub use client::DocumentClient;
