//! Terminal administration client for a remote users collection.
//!
//! The crate keeps a list view, an edit form and the server of record in
//! step: the list is fetched on activation, mutations go through a
//! [`api::UsersGateway`], and every accepted mutation is followed by a full
//! refetch of the list.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use roster::api::HttpUsersGateway;
//! use roster::config::{DeleteRefresh, Settings};
//! use roster::view::{SubmitOutcome, UsersView};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env();
//! let gateway = HttpUsersGateway::from_settings(reqwest::Client::new(), &settings);
//! let mut view = UsersView::new(Arc::new(gateway), DeleteRefresh::OnSuccess);
//! view.activate().await?;
//!
//! view.start_create();
//! view.set_field("username", "ada")?;
//! if let SubmitOutcome::Conflict(message) = view.save().await {
//!     eprintln!("{}", message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod console;
pub mod models;
pub mod session;
pub mod store;
pub mod table;
pub mod view;
