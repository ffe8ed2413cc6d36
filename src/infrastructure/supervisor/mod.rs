mod shutdown_safeguard;

pub use shutdown_safeguard::ShutdownSafeguard;
