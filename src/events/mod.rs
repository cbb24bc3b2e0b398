//! # Events Module
//!
//! Progress reporting decoupled from presentation.
//!
//! ## Design
//! The engine emits events through a channel; a UI layer (the CLI spinner,
//! or anything else) subscribes on its own thread. Events never carry
//! control flow: a dropped receiver just means nobody is watching.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! let listener = std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Walk(WalkEvent::Progress(p)) = event {
//!             println!("{} files hashed", p.files_hashed);
//!         }
//!     }
//! });
//!
//! let (index, summary) = pipeline.build_index(&sender)?;
//! drop(sender);
//! listener.join().ok();
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
