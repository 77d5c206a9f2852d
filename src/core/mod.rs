//! Core building blocks: the data-URI codec, upload intake, download naming,
//! the comparator slider model, the workflow state machine and service
//! configuration. These are toolkit-independent primitives consumed by the
//! high-level `api` module, the GUI and the CLI.
pub mod comparator;
pub mod datauri;
pub mod intake;
pub mod naming;
pub mod params;
pub mod state;
