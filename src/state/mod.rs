/// State management module
///
/// This module holds everything the gallery knows about the session:
/// - The immutable catalog loaded from the metadata document (data.rs)
/// - Shuffling helpers (shuffle.rs)
/// - Per-artist reveal progress (disclosure.rs)
/// - The selection engine that decides what to show next (selection.rs)
/// - The single-shot "load more" trigger (trigger.rs)

pub mod data;
pub mod disclosure;
pub mod selection;
pub mod shuffle;
pub mod trigger;
