//! Payment adapters.

mod simulated;

pub use simulated::SimulatedPaymentGateway;
