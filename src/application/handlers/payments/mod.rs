//! Payment settlement handlers.

mod process_gateway_callback;

pub use process_gateway_callback::{
    CallbackResolution, ProcessGatewayCallbackCommand, ProcessGatewayCallbackHandler,
};
