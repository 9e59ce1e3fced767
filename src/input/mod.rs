mod bindings;
mod dispatch;
mod ids;

pub use bindings::{default_bindings, ActionBinding, AxisBinding, BindingError, InputBindings};
pub use dispatch::{
    dispatch_actions, dispatch_axes, handle_gamepad_disconnect, ActionEvent, AxisEvent,
};
pub use ids::{ActionId, AxisId};
