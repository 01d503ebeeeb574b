//! domkit widgets
//!
//! Best-effort UI bindings over a `domkit_dom::Document`. Activation never
//! fails loudly: an unusable target yields `None` and a malformed widget
//! degrades to a no-op.

mod bindings;
pub mod collapsible;
pub mod counter;
pub mod floating_label;

pub use collapsible::{
    Collapsible, CollapsibleConfig, CollapsibleOptions, CollapsibleRegistry, ParseToggleStateError,
    ToggleCallback, ToggleState, Toggleable,
};
pub use counter::CounterConfig;
pub use floating_label::FloatingLabelConfig;
