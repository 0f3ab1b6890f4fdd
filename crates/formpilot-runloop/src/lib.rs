//! # FormPilot RunLoop
//!
//! Tick-driven control loop that sequences the fill pipeline over a live
//! [`Page`](formpilot_dom::Page).
//!
//! ## States
//!
//! ```text
//!  Idle ──start──▶ Observing ──▶ Planning ──▶ Executing ──progress──▶ Observing
//!                     │                          │
//!                     │◀──── no progress ────────┘
//!                     ▼
//!              proceed control? ──yes──▶ Navigating ──click ok──▶ Observing
//!                     │                       │
//!                     no                 click failed
//!                     ▼                       ▼
//!                 Succeeded             Recovering ──▶ Stopped
//! ```
//!
//! ## Key Components
//!
//! - [`ControlLoop`]: Owns the state machine and drives ticks
//! - [`RefreshObserver`]: Re-scans on page mutations and publishes the field set
//! - [`SingleFlight`]: Latch shared by ticks and refresh passes
//! - [`StatusBoard`]: Status, log and status subscription
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use formpilot_config::Config;
//! use formpilot_dom::{Document, Page};
//! use formpilot_runloop::ControlLoop;
//! use formpilot_store::MemoryProfileStore;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let page = Arc::new(Page::new(Document::from_html("<input id=\"email\">")?));
//! let store = Arc::new(MemoryProfileStore::new());
//! let control = Arc::new(ControlLoop::new(page, store, &Config::default()));
//! control.spawn()?.await?;
//! println!("{}", control.status());
//! # Ok(())
//! # }
//! ```

pub mod control_loop;
pub mod error;
pub mod latch;
pub mod observer;
pub mod status;

pub use control_loop::ControlLoop;
pub use error::{RunLoopError, RunLoopResult};
pub use latch::{FlightGuard, SingleFlight};
pub use observer::RefreshObserver;
pub use status::StatusBoard;
