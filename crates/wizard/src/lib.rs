//! `stockpick-wizard` — the resource-selection wizard state machine.
//!
//! A bounded four-step navigation machine (List → Inventory → Product → Item)
//! over a read-only catalog snapshot. The machine itself is synchronous and
//! single-threaded: the only asynchronous activity, the per-inventory product
//! load, is modeled as a correlation-tagged request/completion pair so stale
//! responses can be discarded instead of cancelled. [`WizardDriver`] provides
//! the tokio glue for hosts that want loads dispatched automatically.

pub mod availability;
pub mod driver;
pub mod loads;
pub mod step;
pub mod wizard;

pub use availability::{eligible_assets, eligible_inventories, eligible_lots, eligible_products};
pub use driver::WizardDriver;
pub use loads::{LoadOutcome, LoadRequest, ProductLoads};
pub use step::{WizardStep, WizardState};
pub use wizard::{Breadcrumb, Commit, ItemOptions, ItemPick, SelectionWizard, WizardConfig};
