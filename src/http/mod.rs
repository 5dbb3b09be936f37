//! HTTP module containing the transport used by the transfer engine.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`transport`] - The [`Transport`] trait and its reqwest implementation
//!
//! # Examples
//!
//! ```rust,no_run
//! use ictfd::http::{create_http_client, HttpClientConfig, HttpTransport, Transport};
//! use reqwest::Url;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let transport = HttpTransport::new(client);
//! let url = Url::parse("https://example.com/file.zip")?;
//! let response = transport.open(&url, Duration::from_secs(5)).await?;
//! println!("Length: {}", response.total_size());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
pub use transport::{HttpTransport, TransferResponse, Transport};
